//! Materializes directory and file trees from declarative manifests.
//!
//! A [`Manifest`] lists directories to ensure and files to write under a root. The
//! manifest comes from a TOML descriptor or one of the built-ins in [`source`].
//! [`materialize`] then applies it, creating parents as needed and overwriting existing
//! file content.
pub mod api;
pub mod errors;
pub mod manifest;
pub mod materializer;
pub mod paths;
pub mod preview;
pub mod prompt;
pub mod source;

pub use manifest::{DirectorySpec, FileSpec, Manifest};
pub use materializer::{materialize, Materializer, Reporter, Summary};
