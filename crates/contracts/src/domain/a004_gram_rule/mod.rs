pub mod aggregate;

pub use aggregate::{find_gram, GramRule};
