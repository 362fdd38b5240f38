pub mod details;
pub mod error;
pub mod executor;
pub mod grouping;
pub mod messages;
pub mod session;
pub mod session_store;

pub use error::BotError;
pub use executor::{ClientLookupExecutor, LookupSettings};
pub use session::{Session, SessionState};
pub use session_store::{InMemorySessionStore, SessionStore};
