pub mod system_routes;
pub mod user_routes;
