// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the Appboy SDK.
//!
//! Every outbound request carries the same `User-Agent` so Appboy support can
//! attribute traffic to this SDK and its version.

mod client;

pub use client::{builder, builder_with_user_agent, user_agent};
