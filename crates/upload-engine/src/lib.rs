//! Certmill Upload Engine
//!
//! Transfers rendered artifacts to a destination container. The backend
//! is polymorphic: a folder-based object store rooted on the local
//! filesystem, or an authenticated Google Drive folder. Either way the
//! contract is the same — resolve-or-create the named container, transfer
//! the bytes once, and convert every failure into a value rather than an
//! error crossing the adapter boundary.

pub mod backend;

pub use backend::drive::DriveBackend;
pub use backend::folder::FolderStoreBackend;
pub use backend::UploadBackend;
