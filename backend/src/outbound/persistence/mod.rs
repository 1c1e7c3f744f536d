//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - Adapters only translate between row structs and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Driver failures are mapped onto each port's `Connection`/`Query` errors.
//!
//! # Example
//!
//! ```ignore
//! use complaint_backend::outbound::persistence::{DbPool, DieselComplaintRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/complaints")).await?;
//! let complaints = DieselComplaintRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_basic_error_mapping;
mod diesel_complaint_repository;
mod diesel_token_repository;
mod diesel_user_profile_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_complaint_repository::DieselComplaintRepository;
pub use diesel_token_repository::DieselTokenRepository;
pub use diesel_user_profile_repository::DieselUserProfileRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
