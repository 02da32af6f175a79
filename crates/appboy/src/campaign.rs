// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Campaign trigger request builder.

use appboy_core::{Properties, RawCampaignRecipient, RawCampaignTriggerRequest};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::raw;
use crate::transport::Transport;

/// Recipients for one API-triggered campaign.
///
/// Appboy accepts at most [`appboy_core::MAX_CAMPAIGN_RECIPIENTS`] recipients
/// per request. The builder does not split larger batches: sending more is
/// reported as an error so the caller decides how to chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignTriggerRequest {
	app_group_id: String,
	campaign_id: String,
	#[serde(default)]
	recipients: Vec<RawCampaignRecipient>,
}

impl CampaignTriggerRequest {
	pub fn new(app_group_id: impl Into<String>, campaign_id: impl Into<String>) -> Self {
		Self {
			app_group_id: app_group_id.into(),
			campaign_id: campaign_id.into(),
			recipients: Vec::new(),
		}
	}

	/// Appends a recipient. The recipient limit is checked by
	/// [`CampaignTriggerRequest::send`], not here.
	///
	/// Trigger properties are a JSON object: pass [`Properties`] or a
	/// `serde_json::Map`. A loose `serde_json::Value` must go through
	/// `Properties::try_from`, which rejects non-objects.
	pub fn add_recipient(
		&mut self,
		external_id: impl Into<String>,
		trigger_properties: impl Into<Properties>,
	) -> &mut Self {
		self
			.recipients
			.push(RawCampaignRecipient::new(external_id, trigger_properties));
		self
	}

	pub fn campaign_id(&self) -> &str {
		&self.campaign_id
	}

	pub fn app_group_id(&self) -> &str {
		&self.app_group_id
	}

	pub fn recipients(&self) -> &[RawCampaignRecipient] {
		&self.recipients
	}

	pub fn len(&self) -> usize {
		self.recipients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.recipients.is_empty()
	}

	pub fn to_raw(&self) -> RawCampaignTriggerRequest {
		RawCampaignTriggerRequest {
			app_group_id: self.app_group_id.clone(),
			campaign_id: self.campaign_id.clone(),
			recipients: self.recipients.clone(),
		}
	}

	/// Triggers the campaign for every recipient in one request.
	///
	/// Fails with [`crate::AppboyError::TooManyRecipients`] before sending if
	/// the recipient limit is exceeded.
	#[instrument(skip(self, transport), fields(campaign_id = %self.campaign_id, recipients = self.recipients.len()))]
	pub async fn send(&self, transport: &dyn Transport) -> Result<()> {
		raw::post_campaign_trigger_request(transport, &self.to_raw()).await
	}
}
