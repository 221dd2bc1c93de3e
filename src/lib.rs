pub mod db;
pub mod forms;
pub mod server;
pub mod web;
