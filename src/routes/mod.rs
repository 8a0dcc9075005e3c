//! Routes Module
//!
//! Route tree assembly; the handlers live next to their domains.

pub mod router;

pub use router::app;
