pub mod balldontlie;
pub mod provider;
pub mod records;

pub use balldontlie::BalldontlieClient;
pub use provider::GameProvider;
pub use records::{RawBoxScore, RawGame, RawTeam};
