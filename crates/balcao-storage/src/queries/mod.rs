// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules for the passive record tables.

pub mod payments;
pub mod stores;
