//! In-memory users resource service, plus a client for the public
//! restful-api.dev `/objects` sandbox.

pub mod app;
pub mod config;
pub mod errors;
pub mod logging;
pub mod routes;
pub mod sandbox;
pub mod services;
pub mod state;

pub use app::build_app;
pub use config::AppConfig;
pub use state::users::{new_store, IdPolicy, User, UserStore};
