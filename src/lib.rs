pub mod config;
pub mod crypto;
pub mod db;
pub mod session;
pub mod web;

pub use db::DbPool;

use axum_extra::extract::cookie::Key;
use config::Config;

pub struct AppState {
    pub config: Config,
    pub db: DbPool,
    /// Signs the session cookie; regenerated on every start
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        Self {
            config,
            db,
            cookie_key: Key::generate(),
        }
    }
}
