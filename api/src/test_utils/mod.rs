//! Test utilities
//!
//! An in-process harness that runs the real router on a loopback socket so
//! tests exercise the full HTTP stack.

pub mod harness;

pub use harness::*;
