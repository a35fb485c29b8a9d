//! Document storage: the [`DocumentStore`] port and its backends.

pub mod error;
pub mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod model;
mod store;

pub use error::{StoreError, StoreResult};
pub use fs::FsDocumentStore;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockDocumentStore;
pub use model::{DocumentId, DocumentMeta, NewDocument, Submitter};
pub use store::DocumentStore;
