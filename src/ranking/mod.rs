pub mod ranker;
pub mod types;

pub use ranker::{compare_users, Comparison};
pub use types::{ComparisonTable, Marker, MarkerAssignment, RankedModeEntry, MAX_COMPARED_USERS};
