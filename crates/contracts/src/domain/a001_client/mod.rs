pub mod aggregate;

pub use aggregate::{Client, ClientField, ClientId, Roll};
