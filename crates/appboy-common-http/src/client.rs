// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client builders with a consistent User-Agent header.

use reqwest::ClientBuilder;

const SDK_NAME: &str = "appboy-rust";
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a new HTTP client builder with the standard SDK User-Agent header.
///
/// # Example
/// ```ignore
/// let client = appboy_common_http::builder()
///     .timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	builder_with_user_agent(user_agent())
}

/// Creates a new HTTP client builder with a custom User-Agent header.
pub fn builder_with_user_agent(user_agent: impl Into<String>) -> ClientBuilder {
	reqwest::Client::builder().user_agent(user_agent.into())
}

/// Returns the standard SDK User-Agent string.
///
/// Format: `appboy-rust/{version}`
pub fn user_agent() -> String {
	format!("{SDK_NAME}/{SDK_VERSION}")
}
