// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Draft factories built through field updates
//! - Storage setup over a temporary state directory

mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use fixtures::{apply_all, complete_draft, complete_updates, test_config};
#[allow(unused_imports)]
pub use temp_dir::{TempState, setup_temp_state};
