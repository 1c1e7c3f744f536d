//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM.
//!
//! The in-memory adapters live next to their ports in `domain::ports` so
//! development and tests can run without a database.

pub mod persistence;
