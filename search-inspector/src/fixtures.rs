use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Read a JSON fixture from disk
///
/// Works for anything the search crate knows how to deserialize: game trees, maze snapshots and
/// search configs.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("Couldn't read fixture {}", path.display()))?;
    debug!(path = %path.display(), bytes = contents.len(), "Read fixture");

    serde_json::from_str(&contents)
        .wrap_err_with(|| format!("{} is not a valid fixture", path.display()))
}
