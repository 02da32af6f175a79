// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Appboy API endpoints.

use std::fmt;

/// Default Appboy API host.
pub const DEFAULT_BASE_URL: &str = "https://api.appboy.com";

/// The API endpoints this SDK posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// User attributes, purchases and custom events.
	Track,
	/// Push token removal. Appboy keeps this separate from the track endpoint.
	DeletePushTokens,
	/// API-triggered campaign delivery.
	CampaignTrigger,
}

impl Endpoint {
	/// Path of the endpoint relative to the API host.
	pub fn path(&self) -> &'static str {
		match self {
			Endpoint::Track => "/users/track",
			Endpoint::DeletePushTokens => "/push_notification/remove",
			Endpoint::CampaignTrigger => "/campaigns/trigger/send",
		}
	}

	/// Full URL of the endpoint for the given base URL.
	///
	/// A trailing `/` on `base_url` is ignored.
	pub fn url(&self, base_url: &str) -> String {
		format!("{}{}", base_url.trim_end_matches('/'), self.path())
	}
}

impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.path())
	}
}
