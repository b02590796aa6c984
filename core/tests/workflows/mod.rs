// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the baatasari-core crate.
//!
//! These tests drive the organizer the way the console pages do: filling the
//! wizard step by step, and opening it prefilled from other pages.

mod event_creation;
mod prefill;
