//! Rendering module for gridmap.
//!
//! This module turns map scripts into documents and writes them out as
//! JSON.

mod json;
mod map;

pub use json::{document_path, read_document, write_document, DOCUMENT_EXTENSION};
pub use map::MapPainter;
