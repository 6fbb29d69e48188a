pub mod config;
pub mod controller;
pub mod logging;
pub mod render;
pub mod store;
