pub mod auth_routes;
pub mod catalog_routes;
pub mod history_routes;
pub mod session_routes;
