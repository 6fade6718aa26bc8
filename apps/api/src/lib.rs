pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod resume;
pub mod roadmap;
pub mod routes;
pub mod state;
