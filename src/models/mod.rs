pub mod game;

pub use game::{sort_games, Game, GameListResponse, GameStatus, SharedGameList, Team};
