pub mod auth;
pub mod error;
pub mod routes;

pub use auth::ApiKeyGuard;
pub use error::ApiError;
pub use routes::{router, AppState};
