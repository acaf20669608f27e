//! Poster linking library - shared modules for both binaries.

pub mod library;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod progress;
pub mod safety;
pub mod scoring;
pub mod store;
pub mod update;
pub mod variants;
