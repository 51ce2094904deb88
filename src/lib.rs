//! Personal agenda recommendations for multi-event conferences.
//!
//! Given the talks and exhibitors a user has saved, suggests further ones they
//! have not saved yet, ranked by affinity to the tracks and sectors they
//! already show interest in, and skipping talks that clash with their schedule.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
