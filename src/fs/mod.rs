//! Filesystem utilities for tidyhook.
//!
//! The only file tidyhook writes is the tag sweep manifest; it goes through
//! [`atomic_write_file`] so a reader never sees a half-written JSON document.

pub mod atomic;

pub use atomic::atomic_write_file;
