//! Shared helpers for the embedded PostgreSQL integration suites.
//!
//! Database resets and row seeding go through the synchronous `postgres`
//! client so the adapters under test only ever see rows they did not write.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

/// Render a `postgres` error with its SQLSTATE and detail when present.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!("postgres error {:?}: {}", db_error.code(), db_error.message());
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Whether `SKIP_TEST_CLUSTER` is `1`, `true` or `yes` (any case).
fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .is_ok_and(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Skip when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Connect to `url`, rendering failures for test output.
pub fn connect(url: &str) -> Result<Client, String> {
    Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))
}

/// Drop and recreate `name` on `cluster`.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let mut admin = connect(&cluster.connection().database_url("postgres"))?;
    admin
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\"; CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| format_postgres_error(&err))
}

/// Insert an account row, returning its id.
pub fn seed_account(
    client: &mut Client,
    username: &str,
    password_hash: &str,
) -> Result<Uuid, String> {
    let user_id = Uuid::new_v4();
    client
        .execute(
            "INSERT INTO accounts (user_id, username, password_hash) VALUES ($1, $2, $3)",
            &[&user_id, &username, &password_hash],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(user_id)
}

/// Insert a council-office profile for an existing account.
pub fn seed_profile(client: &mut Client, user_id: Uuid, district: &str) -> Result<(), String> {
    client
        .execute(
            "INSERT INTO user_profiles (user_id, full_name, district, borough) \
             VALUES ($1, 'Council Staffer', $2, 'Manhattan')",
            &[&user_id, &district],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(())
}
