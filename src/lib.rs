pub mod api;
pub mod config;
pub mod docs;
pub mod engine;
pub mod feed;
pub mod model;
pub mod routes;
pub mod settings;
pub mod utils;
