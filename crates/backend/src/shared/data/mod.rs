pub mod document;
pub mod firestore;
pub mod memory_store;
pub mod store;

pub use document::Document;
pub use firestore::FirestoreStore;
pub use memory_store::InMemoryDocumentStore;
pub use store::{DocumentStore, StoreError};
