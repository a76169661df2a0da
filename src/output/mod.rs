//! Output module
//!
//! Object storage access shared by both stages.
//!
//! # Overview
//!
//! Destinations are parsed from URLs and wrap an [`object_store::ObjectStore`]:
//! - `s3://`, `r2://`, `gs://`, `az://` for cloud storage
//! - plain or `file://` paths for the local filesystem
//!
//! All writes are whole-object overwrites.

mod cloud;

pub use cloud::CloudDestination;
