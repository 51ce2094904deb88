pub mod affinity;
pub mod agenda;
pub mod candidates;
pub mod events;
pub mod recommendations;
pub mod schedule;
pub mod scoring;
