pub mod game_service;

pub use game_service::{eastern_date, DataSource, GameService};
