pub mod config;
pub mod data;
pub mod format;
pub mod messaging;
pub mod text;
