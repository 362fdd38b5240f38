pub mod executor;

pub use executor::NotificationExecutor;
