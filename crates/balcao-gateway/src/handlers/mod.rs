// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers, grouped by resource.

pub mod billing;
pub mod discord;
pub mod search;
pub mod stores;
