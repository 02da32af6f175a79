// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire types for `/campaigns/trigger/send`.

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::payload::Payload;
use crate::properties::Properties;

/// Maximum number of recipients Appboy accepts in one campaign trigger.
pub const MAX_CAMPAIGN_RECIPIENTS: usize = 50;

/// Body of a `/campaigns/trigger/send` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCampaignTriggerRequest {
	pub app_group_id: String,
	pub campaign_id: String,
	pub recipients: Vec<RawCampaignRecipient>,
}

impl RawCampaignTriggerRequest {
	/// Returns true if the recipient count is within [`MAX_CAMPAIGN_RECIPIENTS`].
	pub fn is_within_limit(&self) -> bool {
		self.recipients.len() <= MAX_CAMPAIGN_RECIPIENTS
	}
}

impl Payload for RawCampaignTriggerRequest {
	const ENDPOINT: Endpoint = Endpoint::CampaignTrigger;

	fn to_body(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}

/// One addressee of a campaign trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCampaignRecipient {
	#[serde(rename = "external_user_id")]
	pub external_id: String,
	/// Values available to the campaign's message templates.
	#[serde(default)]
	pub trigger_properties: Properties,
}

impl RawCampaignRecipient {
	pub fn new(external_id: impl Into<String>, trigger_properties: impl Into<Properties>) -> Self {
		Self {
			external_id: external_id.into(),
			trigger_properties: trigger_properties.into(),
		}
	}
}
