//! Embedded PostgreSQL bootstrap for the Diesel adapter suites.
//!
//! `pg-embed-setup-unpriv` installs into `/var/tmp` unless `PG_RUNTIME_DIR`
//! and `PG_DATA_DIR` are set. Sandboxed runners cannot write there, so when
//! either variable is missing both are pointed at a fresh directory under the
//! cargo target directory for the duration of the bootstrap. Bootstraps are
//! serialised because they mutate the process environment.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Attempts after the first when the binary download fails transiently.
const MAX_RETRIES: u32 = 3;

/// First retry delay; doubled on every further attempt.
const RETRY_DELAY: Duration = Duration::from_millis(500);

const TRANSIENT_MARKERS: [&str; 7] = [
    "error decoding response body",
    "connection reset",
    "connection refused",
    "timed out",
    "timeout",
    "temporarily unavailable",
    "dns error",
];

fn scratch_root() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("target")
                .join("pg-embed")
        },
        |target| PathBuf::from(target).join("pg-embed"),
    )
}

fn scratch_dirs() -> std::io::Result<(String, String)> {
    let base = scratch_root().join(format!("complaints-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime = base.join("install");
    let data = base.join("data");
    std::fs::create_dir_all(&runtime)?;
    std::fs::create_dir_all(&data)?;
    Ok((
        runtime.to_string_lossy().into_owned(),
        data.to_string_lossy().into_owned(),
    ))
}

fn is_transient(message: &str) -> bool {
    let lowered = message.to_lowercase();
    TRANSIENT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Start a throwaway cluster, retrying transient download failures.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _serialised = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let needs_dirs =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_dirs {
        let (runtime, data) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime)),
            ("PG_DATA_DIR", Some(data)),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => last_error = format!("{err:?}"),
        }
        if attempt == MAX_RETRIES || !is_transient(&last_error) {
            break;
        }
        let delay = RETRY_DELAY * 2_u32.pow(attempt);
        eprintln!("pg-embed: attempt {} failed, retrying in {delay:?}: {last_error}", attempt + 1);
        std::thread::sleep(delay);
    }
    Err(last_error)
}
