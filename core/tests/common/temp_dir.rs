// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary state directory management for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

/// A temporary state directory, removed when dropped.
#[derive(Debug)]
pub struct TempState {
    dir: TempDir,
}

impl TempState {
    /// Directory for the local storage database.
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.dir.path().join("state")
    }

    /// Path of the local storage database inside the state directory.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.state_dir().join("baatasari.db")
    }
}

/// Sets up a temporary state directory for integration tests.
///
/// The `state` subdirectory is not created, opening the storage must do it.
///
/// # Errors
///
/// Returns an error if the temporary directory cannot be created.
pub fn setup_temp_state() -> Result<TempState, Box<dyn std::error::Error>> {
    Ok(TempState {
        dir: tempfile::tempdir()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_state_is_removed_on_drop() {
        let base = {
            let temp = setup_temp_state().unwrap();
            let base = temp.state_dir().parent().unwrap().to_path_buf();
            assert!(base.exists());
            assert!(!temp.state_dir().exists());
            base
        };
        assert!(!base.exists());
    }
}
