//! Notes system — a flat JSON file mirrored by an in-memory collection
//!
//! The store loads the file once at startup and rewrites it in full after
//! every mutation. Listing goes through the stateless query stage.

pub mod error;
pub mod file_ops;
pub mod query;
pub mod store;

pub use error::NoteStoreError;
pub use query::ListQuery;
pub use store::NoteStore;
