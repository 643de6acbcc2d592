//! Version-tagged persistence of core values.
//!
//! A session file is a version line followed by the JSON rendering of
//! the value. Loading verifies the version line before touching the
//! payload and fails with a version conflict on any mismatch.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// The version stamped on every session file.
pub const SESSION_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Write `value` to `path`, prefixed with the library version.
pub fn save<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let body = serde_json::to_string(value)?;
    fs::write(path, format!("{SESSION_VERSION}\n{body}"))?;
    Ok(())
}

/// Read a value written by [`save`], verifying the version line first.
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let text = fs::read_to_string(path)?;
    let (version, body) = text.split_once('\n').ok_or(Error::MalformedSession)?;
    if version != SESSION_VERSION {
        return Err(Error::VersionConflict {
            required: version.to_owned(),
            found: SESSION_VERSION.to_owned(),
        });
    }
    Ok(serde_json::from_str(body)?)
}
