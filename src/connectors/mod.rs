//! Adapters for services living outside this process.
//!
//! Each connector is a trait injected into routes as
//! `web::Data<Arc<dyn Trait>>`, so handlers never depend on the client
//! behind it and tests can run against the in-memory implementation.

pub mod errors;
pub mod image_store;

pub use errors::ConnectorError;
pub use image_store::{ImageStore, InMemoryImageStore, S3ImageStore, StoredImage};

pub use image_store::init as init_image_store;
