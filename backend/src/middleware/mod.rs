//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as correlation identifiers and request logging.

pub mod trace;

pub use trace::Trace;
