// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire types for the Appboy REST API.
//!
//! Every struct in this crate mirrors one JSON body the Appboy API accepts.
//! Field names are part of the vendor contract and must not change.
//!
//! The crate performs no I/O. It knows how to turn a request into the exact
//! JSON text that goes on the wire, including the flattening of user-supplied
//! custom attributes into the attribute object.

pub mod campaign;
pub mod endpoint;
pub mod payload;
pub mod properties;
pub mod time;
pub mod track;

pub use campaign::{RawCampaignRecipient, RawCampaignTriggerRequest, MAX_CAMPAIGN_RECIPIENTS};
pub use endpoint::{Endpoint, DEFAULT_BASE_URL};
pub use payload::Payload;
pub use properties::Properties;
pub use time::{format_time, parse_time, TIME_FORMAT};
pub use track::{
	merge_custom_attributes, RawAttributes, RawEvent, RawPurchase, RawPushToken,
	RawPushTokenDeleteRequest, RawTrackRequest,
};
