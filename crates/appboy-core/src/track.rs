// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire types for `/users/track` and `/push_notification/remove`.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::endpoint::Endpoint;
use crate::payload::Payload;
use crate::properties::Properties;

/// Body of a `/users/track` request.
///
/// A single track request can carry attribute updates, purchases and custom
/// events for several users. Batching this way does not count against the
/// API rate limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawTrackRequest {
	pub app_group_id: String,
	/// Per-user attribute updates.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub attributes: Vec<RawAttributes>,
	/// Purchases, each bound to a user.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub purchases: Vec<RawPurchase>,
	/// Custom events, each bound to a user.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub events: Vec<RawEvent>,
}

impl RawTrackRequest {
	pub fn new(app_group_id: impl Into<String>) -> Self {
		Self {
			app_group_id: app_group_id.into(),
			attributes: Vec::new(),
			purchases: Vec::new(),
			events: Vec::new(),
		}
	}

	/// Serializes the request into a JSON value with every attribute
	/// object's custom attributes flattened into it.
	///
	/// Custom attributes cannot be expressed as struct fields, so the typed
	/// record is serialized first and the custom keys are injected into the
	/// resulting objects afterwards.
	pub fn to_json_value(&self) -> serde_json::Result<Value> {
		let mut value = serde_json::to_value(self)?;

		if let Some(Value::Array(objects)) = value.get_mut("attributes") {
			for (object, attributes) in objects.iter_mut().zip(&self.attributes) {
				if let Value::Object(object) = object {
					merge_custom_attributes(object, &attributes.custom_attributes);
				}
			}
		}

		Ok(value)
	}
}

impl Payload for RawTrackRequest {
	const ENDPOINT: Endpoint = Endpoint::Track;

	fn to_body(&self) -> serde_json::Result<String> {
		serde_json::to_string(&self.to_json_value()?)
	}
}

/// Attribute update for one user.
///
/// `custom_attributes` is not serialized by serde; it is flattened into the
/// attribute object by [`RawTrackRequest::to_json_value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawAttributes {
	/// The id of the user in the caller's database.
	pub external_id: String,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub push_tokens: Vec<RawPushToken>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(skip)]
	pub custom_attributes: Properties,
}

impl RawAttributes {
	pub fn new(external_id: impl Into<String>) -> Self {
		Self {
			external_id: external_id.into(),
			..Default::default()
		}
	}
}

/// Injects custom attributes as top-level keys of a serialized attribute
/// object.
///
/// Keys already present in `target` belong to the typed record and are left
/// untouched.
pub fn merge_custom_attributes(target: &mut Map<String, Value>, custom: &Properties) {
	for (key, value) in custom.iter() {
		target
			.entry(key.clone())
			.or_insert_with(|| value.clone());
	}
}

/// A push token bound to an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPushToken {
	pub app_id: String,
	pub token: String,
}

impl RawPushToken {
	pub fn new(app_id: impl Into<String>, token: impl Into<String>) -> Self {
		Self {
			app_id: app_id.into(),
			token: token.into(),
		}
	}
}

/// A purchase made by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPurchase {
	pub external_id: String,
	pub product_id: String,
	/// ISO 4217 currency code.
	pub currency: String,
	/// Must be finite; NaN and infinities fail serialization.
	#[serde(serialize_with = "serialize_finite_price")]
	pub price: f64,
	pub quantity: u32,
	/// See [`crate::time::TIME_FORMAT`].
	pub time: String,
	#[serde(default, skip_serializing_if = "Properties::is_empty")]
	pub properties: Properties,
}

fn serialize_finite_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
	if !price.is_finite() {
		return Err(serde::ser::Error::custom(format!(
			"purchase price must be a finite number, got {price}"
		)));
	}
	serializer.serialize_f64(*price)
}

/// A named custom event for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
	pub external_id: String,
	pub name: String,
	/// See [`crate::time::TIME_FORMAT`].
	pub time: String,
	#[serde(default, skip_serializing_if = "Properties::is_empty")]
	pub properties: Properties,
	/// Only update users that already exist in Appboy.
	#[serde(
		rename = "_update_existing_only",
		default,
		skip_serializing_if = "std::ops::Not::not"
	)]
	pub update_existing_only: bool,
}

/// Body of a `/push_notification/remove` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPushTokenDeleteRequest {
	pub app_group_id: String,
	pub push_tokens: Vec<RawPushToken>,
}

impl Payload for RawPushTokenDeleteRequest {
	const ENDPOINT: Endpoint = Endpoint::DeletePushTokens;

	fn to_body(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}
