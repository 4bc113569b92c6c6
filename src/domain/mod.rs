pub mod models;

pub use models::{GeneralActivityRecord, Mode, ProfileStats, RatingRecord};
