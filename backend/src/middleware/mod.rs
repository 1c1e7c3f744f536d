//! Request middleware.
//!
//! Cross-cutting request lifecycle concerns live here; today that is the
//! per-request trace identifier.

pub mod trace;

pub use trace::Trace;
