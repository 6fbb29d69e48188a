pub mod engine;
pub mod serialization;
pub mod session;
pub mod state;
pub mod table;
pub mod view;
