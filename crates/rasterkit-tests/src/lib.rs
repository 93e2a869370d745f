//! Integration tests for rasterkit crates.
//!
//! End-to-end checks that exercise the core buffer, the transforms and the
//! codecs together.
