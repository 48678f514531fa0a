use crate::db::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod session;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
