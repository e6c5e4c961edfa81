//! Getting data into the registry.
//!
//! The registry itself is purely in-memory. This module holds the
//! collaborators that feed it: a serde-backed [`Feed`] file format and a
//! seeded [`synthetic`] generator for demonstration data.

pub mod feed;
pub use feed::{Feed, FeedFormat, IngestError, Ingested, LoadError};

pub mod synthetic;
pub use synthetic::SyntheticParams;
