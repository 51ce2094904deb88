mod agenda;
mod catalog;
mod recommendation;

pub use agenda::{Agenda, EventDetail, SaveOutcome};
pub use catalog::{Event, Exhibitor, LabelCount, SavedSlot, Talk};
pub use recommendation::{AffinityCounts, Recommendations, ScoredCandidate};
