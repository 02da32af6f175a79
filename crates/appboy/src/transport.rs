// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transport abstraction for posting request bodies to Appboy.

use appboy_core::Endpoint;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, trace};

use crate::client::ClientConfig;
use crate::error::{AppboyError, Result};

/// Status and body of an HTTP response, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
	pub status: u16,
	pub body: String,
}

impl TransportResponse {
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}
}

/// Sends an encoded JSON body to an Appboy endpoint.
///
/// Implementations only move bytes. Deciding whether a status means success
/// is done by the caller, so a transport returns `Ok` for any response it
/// managed to receive and `Err` only when the exchange itself failed.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn post(&self, endpoint: Endpoint, body: String) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	http_client: reqwest::Client,
	base_url: String,
}

impl HttpTransport {
	/// Creates a transport from client configuration.
	pub fn new(config: &ClientConfig) -> Result<Self> {
		let builder = match &config.user_agent {
			Some(user_agent) => appboy_common_http::builder_with_user_agent(user_agent.clone()),
			None => appboy_common_http::builder(),
		};
		let http_client = builder.timeout(config.request_timeout).build()?;

		Ok(Self {
			http_client,
			base_url: config.base_url.trim_end_matches('/').to_string(),
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn post(&self, endpoint: Endpoint, body: String) -> Result<TransportResponse> {
		let url = endpoint.url(&self.base_url);

		debug!(url = %url, bytes = body.len(), "Posting to Appboy");
		trace!(body = %body, "Request body");

		let response = self
			.http_client
			.post(&url)
			.header(CONTENT_TYPE, "application/json")
			.body(body)
			.send()
			.await
			.map_err(|e| {
				error!(url = %url, error = %e, "Network error during Appboy request");
				AppboyError::RequestFailed(e)
			})?;

		let status = response.status().as_u16();
		let body = response.text().await.map_err(|e| {
			error!(url = %url, status, error = %e, "Failed to read Appboy response body");
			AppboyError::RequestFailed(e)
		})?;

		trace!(status, body = %body, "Response body");

		Ok(TransportResponse { status, body })
	}
}
