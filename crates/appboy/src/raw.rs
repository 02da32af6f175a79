// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Low-level API: post wire values directly.
//!
//! Builders in this crate project themselves into the types from
//! [`appboy_core`] and call these functions. Callers that need something the
//! builders do not cover (for example several users in one track request)
//! can assemble the wire values themselves.

use appboy_core::{
	Endpoint, Payload, RawCampaignTriggerRequest, RawPushTokenDeleteRequest, RawTrackRequest,
	MAX_CAMPAIGN_RECIPIENTS,
};
use tracing::{debug, error};

use crate::error::{AppboyError, Result};
use crate::transport::{Transport, TransportResponse};

/// Status code Appboy answers with when a request was accepted.
pub const SUCCESS_STATUS: u16 = 201;

/// Posts to `/users/track`, flattening custom attributes into each
/// attribute object.
pub async fn post_track_request(transport: &dyn Transport, request: &RawTrackRequest) -> Result<()> {
	post(transport, request).await
}

/// Posts to `/push_notification/remove`.
pub async fn post_delete_push_token_request(
	transport: &dyn Transport,
	request: &RawPushTokenDeleteRequest,
) -> Result<()> {
	post(transport, request).await
}

/// Posts to `/campaigns/trigger/send`.
///
/// Fails without sending anything if the request has more than
/// [`MAX_CAMPAIGN_RECIPIENTS`] recipients. Oversized batches are not split.
pub async fn post_campaign_trigger_request(
	transport: &dyn Transport,
	request: &RawCampaignTriggerRequest,
) -> Result<()> {
	if !request.is_within_limit() {
		let count = request.recipients.len();
		error!(
			campaign_id = %request.campaign_id,
			count,
			max = MAX_CAMPAIGN_RECIPIENTS,
			"Campaign trigger exceeds recipient limit"
		);
		return Err(AppboyError::TooManyRecipients {
			campaign_id: request.campaign_id.clone(),
			count,
			max: MAX_CAMPAIGN_RECIPIENTS,
		});
	}

	post(transport, request).await
}

async fn post<P>(transport: &dyn Transport, payload: &P) -> Result<()>
where
	P: Payload + Sync,
{
	let endpoint = P::ENDPOINT;
	let body = payload.to_body().map_err(|e| {
		error!(endpoint = %endpoint, error = %e, "Failed to encode Appboy request");
		AppboyError::SerializationError(e)
	})?;

	debug!(endpoint = %endpoint, bytes = body.len(), "Sending Appboy request");

	let response = transport.post(endpoint, body).await?;
	check_status(endpoint, response)
}

/// Maps a response to success only if Appboy answered 201.
pub fn check_status(endpoint: Endpoint, response: TransportResponse) -> Result<()> {
	if response.status == SUCCESS_STATUS {
		debug!(endpoint = %endpoint, "Appboy request accepted");
		return Ok(());
	}

	error!(
		endpoint = %endpoint,
		status = response.status,
		body = %response.body,
		"Appboy rejected request"
	);
	Err(AppboyError::UnexpectedStatus {
		endpoint,
		status: response.status,
		body: response.body,
	})
}
