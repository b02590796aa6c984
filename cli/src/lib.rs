// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod cmd_analytics;
mod cmd_artist_request;
mod cmd_create_event;
mod cmd_dashboard;
mod cmd_draft;
mod cmd_generate_completion;
mod cmd_manage_events;
mod cmd_stalls;
mod config;
mod formatter;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::Config;
