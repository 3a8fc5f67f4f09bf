pub mod app;
pub mod backend;
pub mod config;
pub mod conversation;
pub mod message;
pub mod persistence;
pub mod pipeline;
pub mod preferences;
pub mod reveal;
pub mod store;
pub mod text_wrapping;
