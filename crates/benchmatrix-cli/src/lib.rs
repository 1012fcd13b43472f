//! benchmatrix CLI library
//!
//! Exposes the document loader so it can be tested without the binary.

pub mod loader;
