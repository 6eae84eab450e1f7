pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod storage;
pub mod utils;
