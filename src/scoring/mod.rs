// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers, and their order.
//!
//! The weights live in [`Scorer`] and can be overridden from a JSON file. The
//! ordering of the final list lives in [`ranking`].

mod core;
pub mod ranking;

pub use self::core::*;
