// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Appboy SDK.

use appboy_core::Endpoint;
use thiserror::Error;

/// Appboy SDK errors.
#[derive(Debug, Error)]
pub enum AppboyError {
	/// App group id is missing or empty.
	#[error("invalid app group id: must not be empty")]
	InvalidAppGroupId,

	/// Base URL could not be parsed.
	#[error("invalid base URL: {0}")]
	InvalidBaseUrl(String),

	/// A campaign trigger exceeded the per-request recipient limit.
	#[error(
		"campaign trigger for campaign_id {campaign_id} has {count} recipients which exceeds the maximum of {max} per request; split the recipients across multiple requests"
	)]
	TooManyRecipients {
		campaign_id: String,
		count: usize,
		max: usize,
	},

	/// Request body could not be encoded.
	#[error("serialization error: {0}")]
	SerializationError(#[from] serde_json::Error),

	/// HTTP request failed before a response was received.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Appboy answered with something other than 201 Created.
	#[error("{endpoint} expected status 201 but received {status} with payload '{body}'")]
	UnexpectedStatus {
		endpoint: Endpoint,
		status: u16,
		/// Response body, verbatim.
		body: String,
	},
}

impl AppboyError {
	/// True for failures of the network call itself or a non-201 response.
	pub fn is_transport(&self) -> bool {
		matches!(
			self,
			AppboyError::RequestFailed(_) | AppboyError::UnexpectedStatus { .. }
		)
	}

	/// True for request contents rejected before anything was sent.
	pub fn is_validation(&self) -> bool {
		matches!(self, AppboyError::TooManyRecipients { .. })
	}

	/// HTTP status of a rejected request, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			AppboyError::UnexpectedStatus { status, .. } => Some(*status),
			AppboyError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}
}

/// Result type alias for Appboy operations.
pub type Result<T> = std::result::Result<T, AppboyError>;
