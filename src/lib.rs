pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod security;
pub mod server;
pub mod service;
pub mod transform;
