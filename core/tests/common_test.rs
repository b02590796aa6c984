// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration test for the common module.
//!
//! Verifies that common test utilities work correctly.

mod common;

use baatasari_core::validate;
use common::{complete_draft, setup_temp_state, test_config};

#[test]
fn common_module_temp_state_works() {
    let temp = setup_temp_state().unwrap();
    let config = test_config(&temp.state_dir());
    assert_eq!(config.database_path(), Some(temp.database_path()));
}

#[test]
fn common_module_complete_draft_is_valid() {
    let draft = complete_draft();
    assert_eq!(draft.contact_info.mobile, "+91 9876543210");
    assert!(validate(&draft).is_empty());
}
