// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Appboy client and app-scoped client.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use appboy_core::DEFAULT_BASE_URL;
use tracing::info;

use crate::campaign::CampaignTriggerRequest;
use crate::error::{AppboyError, Result};
use crate::track::TrackRequest;
use crate::transport::{HttpTransport, Transport};

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// API host, e.g. `https://api.appboy.com`.
	pub base_url: String,
	/// Timeout for each HTTP request.
	pub request_timeout: Duration,
	/// Overrides the default `appboy-rust/{version}` User-Agent.
	pub user_agent: Option<String>,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			request_timeout: Duration::from_secs(5),
			user_agent: None,
		}
	}
}

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
	app_group_id: Option<String>,
	config: ClientConfig,
	transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
	pub fn new() -> Self {
		Self {
			app_group_id: None,
			config: ClientConfig::default(),
			transport: None,
		}
	}

	/// Sets the app group id sent with every request.
	pub fn app_group_id(mut self, app_group_id: impl Into<String>) -> Self {
		self.app_group_id = Some(app_group_id.into());
		self
	}

	/// Sets the API host.
	///
	/// Example: `https://rest.iad-01.braze.com`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.config.base_url = url.into();
		self
	}

	/// Sets the HTTP request timeout.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.config.request_timeout = timeout;
		self
	}

	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.config.user_agent = Some(user_agent.into());
		self
	}

	/// Replaces the HTTP transport. The base URL, timeout and User-Agent are
	/// ignored when a transport is supplied.
	pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
		self.transport = Some(transport);
		self
	}

	pub fn build(self) -> Result<Client> {
		let app_group_id = self
			.app_group_id
			.filter(|id| !id.trim().is_empty())
			.ok_or(AppboyError::InvalidAppGroupId)?;

		let transport = match self.transport {
			Some(transport) => transport,
			None => {
				reqwest::Url::parse(&self.config.base_url)
					.map_err(|_| AppboyError::InvalidBaseUrl(self.config.base_url.clone()))?;
				Arc::new(HttpTransport::new(&self.config)?) as Arc<dyn Transport>
			}
		};

		info!(
			app_group_id = %app_group_id,
			base_url = %self.config.base_url.trim_end_matches('/'),
			"Appboy client initialized"
		);

		Ok(Client {
			inner: Arc::new(ClientInner {
				app_group_id,
				transport,
			}),
		})
	}
}

impl Default for ClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct ClientInner {
	app_group_id: String,
	transport: Arc<dyn Transport>,
}

/// Entry point for the Appboy API, scoped to one app group.
///
/// # Example
///
/// ```ignore
/// use appboy::{Client, Event, Properties};
///
/// let client = Client::new("app-group-id")?;
/// let app = client.app_client("ios-app-id");
///
/// let mut request = app.track_request("user-42");
/// request.set_email("ada@example.com").add_push_token("apns-token");
/// request.add_event(Event::new("signed_up"));
/// client.send_track(&request).await?;
///
/// let mut trigger = client.campaign_trigger_request("campaign-id");
/// trigger.add_recipient("user-42", Properties::new().insert("like_count", 31));
/// client.send_campaign_trigger(&trigger).await?;
/// ```
#[derive(Clone)]
pub struct Client {
	inner: Arc<ClientInner>,
}

impl Client {
	pub fn builder() -> ClientBuilder {
		ClientBuilder::new()
	}

	/// Creates a client with the default configuration.
	pub fn new(app_group_id: impl Into<String>) -> Result<Self> {
		Self::builder().app_group_id(app_group_id).build()
	}

	pub fn app_group_id(&self) -> &str {
		&self.inner.app_group_id
	}

	pub fn transport(&self) -> &dyn Transport {
		self.inner.transport.as_ref()
	}

	/// Scopes the client to one app, for requests that carry push tokens.
	pub fn app_client(&self, app_id: impl Into<String>) -> AppClient {
		AppClient {
			client: self.clone(),
			app_id: app_id.into(),
		}
	}

	pub fn campaign_trigger_request(&self, campaign_id: impl Into<String>) -> CampaignTriggerRequest {
		CampaignTriggerRequest::new(self.inner.app_group_id.clone(), campaign_id)
	}

	/// Sends a track request with this client's transport.
	pub async fn send_track(&self, request: &TrackRequest) -> Result<()> {
		request.send(self.transport()).await
	}

	/// Sends a campaign trigger with this client's transport.
	pub async fn send_campaign_trigger(&self, request: &CampaignTriggerRequest) -> Result<()> {
		request.send(self.transport()).await
	}
}

impl fmt::Debug for Client {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Client")
			.field("app_group_id", &self.inner.app_group_id)
			.finish_non_exhaustive()
	}
}

/// A [`Client`] bound to one app id.
#[derive(Debug, Clone)]
pub struct AppClient {
	client: Client,
	app_id: String,
}

impl AppClient {
	pub fn app_id(&self) -> &str {
		&self.app_id
	}

	pub fn client(&self) -> &Client {
		&self.client
	}

	/// Starts a track request for the user with `external_id`.
	pub fn track_request(&self, external_id: impl Into<String>) -> TrackRequest {
		TrackRequest::new(self.client.app_group_id(), self.app_id.clone(), external_id)
	}
}
