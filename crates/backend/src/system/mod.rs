pub mod initialization;
pub mod middleware;
pub mod state;
pub mod tasks;
pub mod tracing;
