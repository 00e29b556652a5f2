//! Canonicalization of upstream records into [`crate::models::Game`].

pub mod canonical;
pub mod status;

pub use canonical::{from_box_score, from_game, GameRecord};
pub use status::{parse_datetime, parse_status, period_name};
