// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Track request builder for a single user.

use appboy_core::{
	Properties, RawAttributes, RawPushToken, RawPushTokenDeleteRequest, RawTrackRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::event::{Event, PurchaseEvent, TrackEvent};
use crate::raw;
use crate::transport::Transport;

/// Attribute name with a dedicated slot on the wire.
const FIRST_NAME: &str = "first_name";
/// Attribute name with a dedicated slot on the wire.
const EMAIL: &str = "email";

/// Accumulates attribute changes, push tokens and events for one user.
///
/// Created with [`crate::AppClient::track_request`]. Nothing is sent until
/// [`TrackRequest::send`] is called. The request can be persisted with serde
/// and sent later; a reconstructed request produces the same payload.
///
/// # Example
///
/// ```ignore
/// let mut request = app_client.track_request("user-42");
/// request
///     .set_first_name("Ada")
///     .set_email("ada@example.com")
///     .set_custom_attribute("plan", "gold")
///     .add_push_token("apns-token");
/// request.add_event(Event::new("signed_up"));
/// client.send_track(&request).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRequest {
	app_group_id: String,
	app_id: String,
	external_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	first_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	last_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	email: Option<String>,
	#[serde(default)]
	custom_attributes: Properties,
	#[serde(default)]
	push_tokens: Vec<String>,
	#[serde(default)]
	deleted_push_tokens: Vec<String>,
	#[serde(default)]
	purchases: Vec<PurchaseEvent>,
	#[serde(default)]
	events: Vec<Event>,
}

impl TrackRequest {
	pub fn new(
		app_group_id: impl Into<String>,
		app_id: impl Into<String>,
		external_id: impl Into<String>,
	) -> Self {
		Self {
			app_group_id: app_group_id.into(),
			app_id: app_id.into(),
			external_id: external_id.into(),
			first_name: None,
			last_name: None,
			email: None,
			custom_attributes: Properties::new(),
			push_tokens: Vec::new(),
			deleted_push_tokens: Vec::new(),
			purchases: Vec::new(),
			events: Vec::new(),
		}
	}

	pub fn set_first_name(&mut self, name: impl Into<String>) -> &mut Self {
		self.first_name = Some(name.into());
		self
	}

	pub fn set_last_name(&mut self, name: impl Into<String>) -> &mut Self {
		self.last_name = Some(name.into());
		self
	}

	pub fn set_email(&mut self, email: impl Into<String>) -> &mut Self {
		self.email = Some(email.into());
		self
	}

	/// Sets a custom user attribute, sent as a top-level key of the user's
	/// attribute object.
	///
	/// `first_name` and `email` are routed to their dedicated fields instead.
	/// [`TrackRequest::set_first_name`] and [`TrackRequest::set_email`] take
	/// precedence over a custom attribute of the same name no matter the
	/// call order.
	pub fn set_custom_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.custom_attributes.set(key, value);
		self
	}

	/// Registers a push token for the client's app.
	pub fn add_push_token(&mut self, token: impl Into<String>) -> &mut Self {
		self.push_tokens.push(token.into());
		self
	}

	/// Queues removal of a push token for the client's app.
	///
	/// Removals are sent in a separate request after the track request.
	pub fn remove_push_token(&mut self, token: impl Into<String>) -> &mut Self {
		self.deleted_push_tokens.push(token.into());
		self
	}

	pub fn add_purchase_event(&mut self, event: PurchaseEvent) -> &mut Self {
		self.purchases.push(event);
		self
	}

	pub fn add_generic_event(&mut self, event: Event) -> &mut Self {
		self.events.push(event);
		self
	}

	/// Appends a purchase or a custom event to its ordered sequence.
	pub fn add_event(&mut self, event: impl Into<TrackEvent>) -> &mut Self {
		match event.into() {
			TrackEvent::Purchase(purchase) => self.add_purchase_event(purchase),
			TrackEvent::Generic(event) => self.add_generic_event(event),
		}
	}

	pub fn app_group_id(&self) -> &str {
		&self.app_group_id
	}

	pub fn app_id(&self) -> &str {
		&self.app_id
	}

	pub fn external_id(&self) -> &str {
		&self.external_id
	}

	pub fn custom_attributes(&self) -> &Properties {
		&self.custom_attributes
	}

	pub fn purchases(&self) -> &[PurchaseEvent] {
		&self.purchases
	}

	pub fn events(&self) -> &[Event] {
		&self.events
	}

	pub fn push_tokens(&self) -> &[String] {
		&self.push_tokens
	}

	pub fn deleted_push_tokens(&self) -> &[String] {
		&self.deleted_push_tokens
	}

	/// Projects the request into the `/users/track` body.
	pub fn to_raw(&self) -> RawTrackRequest {
		let mut attributes = RawAttributes {
			external_id: self.external_id.clone(),
			push_tokens: self.push_token_records(&self.push_tokens),
			first_name: self.reserved_attribute(FIRST_NAME, &self.first_name),
			last_name: self.last_name.clone(),
			email: self.reserved_attribute(EMAIL, &self.email),
			custom_attributes: Properties::new(),
		};

		for (key, value) in self.custom_attributes.iter() {
			if !is_reserved(key) {
				attributes.custom_attributes.set(key.clone(), value.clone());
			}
		}

		RawTrackRequest {
			app_group_id: self.app_group_id.clone(),
			attributes: vec![attributes],
			purchases: self
				.purchases
				.iter()
				.map(|p| p.to_raw(&self.external_id))
				.collect(),
			events: self
				.events
				.iter()
				.map(|e| e.to_raw(&self.external_id))
				.collect(),
		}
	}

	/// Projects queued push token removals into the
	/// `/push_notification/remove` body, or `None` if nothing is queued.
	pub fn to_raw_delete(&self) -> Option<RawPushTokenDeleteRequest> {
		if self.deleted_push_tokens.is_empty() {
			return None;
		}

		Some(RawPushTokenDeleteRequest {
			app_group_id: self.app_group_id.clone(),
			push_tokens: self.push_token_records(&self.deleted_push_tokens),
		})
	}

	/// Sends the track request, then the push token removals if any are
	/// queued.
	///
	/// Removals are only sent once the track request succeeded. The first
	/// failure is returned and nothing is retried.
	#[instrument(skip(self, transport), fields(external_id = %self.external_id))]
	pub async fn send(&self, transport: &dyn Transport) -> Result<()> {
		raw::post_track_request(transport, &self.to_raw()).await?;

		if let Some(delete) = self.to_raw_delete() {
			debug!(count = delete.push_tokens.len(), "Removing push tokens");
			raw::post_delete_push_token_request(transport, &delete).await?;
		}

		Ok(())
	}

	fn push_token_records(&self, tokens: &[String]) -> Vec<RawPushToken> {
		tokens
			.iter()
			.map(|token| RawPushToken::new(self.app_id.clone(), token.clone()))
			.collect()
	}

	/// Resolves a reserved attribute: the dedicated setter wins, otherwise a
	/// string custom attribute of the same name is used.
	fn reserved_attribute(&self, key: &str, slot: &Option<String>) -> Option<String> {
		if slot.is_some() {
			return slot.clone();
		}

		match self.custom_attributes.get(key) {
			Some(Value::String(value)) => Some(value.clone()),
			Some(other) => {
				warn!(key, value = %other, "Dropping non-string value for reserved attribute");
				None
			}
			None => None,
		}
	}
}

fn is_reserved(key: &str) -> bool {
	key == FIRST_NAME || key == EMAIL
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::AppboyError;
	use crate::test_support::RecordingTransport;
	use appboy_core::Endpoint;
	use chrono::{TimeZone, Utc};
	use proptest::prelude::*;
	use serde_json::json;

	fn request() -> TrackRequest {
		TrackRequest::new("foo", "blah", "holah")
	}

	fn epoch(secs: i64) -> chrono::DateTime<Utc> {
		Utc.timestamp_opt(secs, 0).unwrap()
	}

	#[tokio::test]
	async fn test_empty_request_sends_external_id_only() {
		let transport = RecordingTransport::new();
		request().send(&transport).await.unwrap();

		let bodies = transport.bodies_for(Endpoint::Track);
		assert_eq!(bodies.len(), 1);
		assert_eq!(
			bodies[0],
			json!({"app_group_id": "foo", "attributes": [{"external_id": "holah"}]})
		);
		assert!(bodies[0]["attributes"][0].get("push_token_import").is_none());
	}

	#[tokio::test]
	async fn test_attributes_and_push_tokens() {
		let transport = RecordingTransport::new();
		let mut track = request();
		track
			.set_first_name("foo")
			.set_email("test@test.com")
			.set_custom_attribute("baz", "bar")
			.add_push_token("apple-token");

		track.send(&transport).await.unwrap();

		let body = &transport.bodies_for(Endpoint::Track)[0];
		let attribute = &body["attributes"][0];
		assert_eq!(attribute["first_name"], "foo");
		assert_eq!(attribute["email"], "test@test.com");
		assert_eq!(attribute["baz"], "bar");
		assert_eq!(attribute["push_tokens"][0]["app_id"], "blah");
		assert_eq!(attribute["push_tokens"][0]["token"], "apple-token");
	}

	#[test]
	fn test_dedicated_setter_wins_over_custom_attribute() {
		let mut before = request();
		before
			.set_first_name("dedicated")
			.set_custom_attribute("first_name", "custom");

		let mut after = request();
		after
			.set_custom_attribute("email", "custom@test.com")
			.set_email("dedicated@test.com");

		assert_eq!(
			before.to_raw().attributes[0].first_name.as_deref(),
			Some("dedicated")
		);
		assert_eq!(
			after.to_raw().attributes[0].email.as_deref(),
			Some("dedicated@test.com")
		);
	}

	#[test]
	fn test_reserved_custom_attribute_routes_to_slot() {
		let mut track = request();
		track.set_custom_attribute("email", "routed@test.com");

		let raw = track.to_raw();
		assert_eq!(raw.attributes[0].email.as_deref(), Some("routed@test.com"));
		assert!(!raw.attributes[0].custom_attributes.contains_key("email"));

		let value = raw.to_json_value().unwrap();
		assert_eq!(value["attributes"][0]["email"], "routed@test.com");
	}

	#[test]
	fn test_reserved_custom_attribute_with_non_string_is_dropped() {
		let mut track = request();
		track.set_custom_attribute("first_name", 42);

		let raw = track.to_raw();
		assert!(raw.attributes[0].first_name.is_none());
		assert!(raw.attributes[0].custom_attributes.is_empty());
	}

	#[test]
	fn test_last_name_slot() {
		let mut track = request();
		track.set_last_name("Lovelace");

		let value = track.to_raw().to_json_value().unwrap();
		assert_eq!(value["attributes"][0]["last_name"], "Lovelace");
	}

	#[tokio::test]
	async fn test_purchase_event() {
		let transport = RecordingTransport::new();
		let mut purchase = PurchaseEvent::new();
		purchase
			.set_product_id("blah")
			.set_currency_usd()
			.set_price(4.29)
			.set_quantity(1)
			.set_time(epoch(0));

		let mut track = request();
		track.add_event(purchase);
		track.send(&transport).await.unwrap();

		let body = &transport.bodies_for(Endpoint::Track)[0];
		let purchase = &body["purchases"][0];
		assert_eq!(purchase["external_id"], "holah");
		assert_eq!(purchase["product_id"], "blah");
		assert_eq!(purchase["currency"], "USD");
		assert_eq!(purchase["price"], 4.29);
		assert_eq!(purchase["quantity"], 1);
		assert_eq!(purchase["time"], "1970-01-01T00:00:00");
	}

	#[tokio::test]
	async fn test_events_keep_insertion_order() {
		let transport = RecordingTransport::new();
		let mut first = Event::new("blah");
		first.set_time(epoch(0));
		let mut second = Event::new("foo");
		second.set_time(epoch(0));

		let mut track = request();
		track.add_event(first).add_event(second);
		track.send(&transport).await.unwrap();

		let body = &transport.bodies_for(Endpoint::Track)[0];
		let events = body["events"].as_array().unwrap();
		assert_eq!(events.len(), 2);
		assert_eq!(events[0]["name"], "blah");
		assert_eq!(events[0]["time"], "1970-01-01T00:00:00");
		assert_eq!(events[0]["external_id"], "holah");
		assert_eq!(events[1]["name"], "foo");
	}

	#[test]
	fn test_add_event_dispatches_by_variant() {
		let mut track = request();
		track
			.add_event(Event::new("a"))
			.add_event(PurchaseEvent::new())
			.add_event(Event::new("b"));

		assert_eq!(track.events().len(), 2);
		assert_eq!(track.purchases().len(), 1);
		assert_eq!(track.events()[1].name(), "b");
	}

	#[tokio::test]
	async fn test_persisted_request_sends_identical_payload() {
		let transport = RecordingTransport::new();
		let mut track = request();
		track
			.set_email("test@test.com")
			.set_first_name("foo")
			.set_custom_attribute("foo", "bar");

		let mut first = Event::new("blah");
		first.set_time(epoch(86_399));
		let mut second = Event::new("foo");
		second.set_time(epoch(0));
		let mut purchase = PurchaseEvent::new();
		purchase
			.set_time(epoch(86_400))
			.set_quantity(1)
			.set_product_id("foo")
			.set_price(1.0)
			.set_currency_usd();
		track.add_event(first).add_event(second).add_event(purchase);

		track.send(&transport).await.unwrap();

		let persisted = serde_json::to_string(&track).unwrap();
		let restored: TrackRequest = serde_json::from_str(&persisted).unwrap();
		restored.send(&transport).await.unwrap();

		let calls = transport.raw_calls();
		assert_eq!(calls.len(), 2);
		assert_eq!(calls[0], calls[1]);

		assert_eq!(restored, track);
		assert_eq!(restored.custom_attributes().len(), 1);
		assert_eq!(restored.events().len(), 2);
		assert_eq!(restored.purchases().len(), 1);
		assert_eq!(restored.purchases()[0].price(), 1.0);
		assert_eq!(restored.purchases()[0].time(), epoch(86_400));
		assert_eq!(restored.events()[0].name(), "blah");
		assert_eq!(restored.events()[0].time(), epoch(86_399));
	}

	#[tokio::test]
	async fn test_push_token_removal_is_a_second_call() {
		let transport = RecordingTransport::new();
		let mut track = request();
		track
			.set_first_name("foo")
			.add_push_token("apple-token")
			.remove_push_token("apple-token2");

		track.send(&transport).await.unwrap();

		let calls = transport.calls();
		assert_eq!(calls.len(), 2);
		assert_eq!(calls[0].0, Endpoint::Track);
		assert_eq!(calls[1].0, Endpoint::DeletePushTokens);
		assert_eq!(
			calls[1].1,
			json!({
				"app_group_id": "foo",
				"push_tokens": [{"app_id": "blah", "token": "apple-token2"}],
			})
		);
		assert_eq!(
			calls[0].1["attributes"][0]["push_tokens"],
			json!([{"app_id": "blah", "token": "apple-token"}])
		);
	}

	#[tokio::test]
	async fn test_failed_track_skips_removal() {
		let transport = RecordingTransport::new().respond(Endpoint::Track, 500, "boom");
		let mut track = request();
		track.remove_push_token("apple-token2");

		let err = track.send(&transport).await.unwrap_err();

		assert!(matches!(
			err,
			AppboyError::UnexpectedStatus {
				endpoint: Endpoint::Track,
				status: 500,
				..
			}
		));
		assert_eq!(transport.calls().len(), 1);
	}

	#[tokio::test]
	async fn test_non_finite_price_is_a_serialization_error() {
		for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
			let transport = RecordingTransport::new();
			let mut purchase = PurchaseEvent::new();
			purchase.set_product_id("blah").set_price(price);

			let mut track = request();
			track.remove_push_token("apple-token2");
			track.add_event(purchase);

			let err = track.send(&transport).await.unwrap_err();

			assert!(matches!(err, AppboyError::SerializationError(_)), "{err:?}");
			assert!(!err.is_transport());
			assert!(transport.calls().is_empty());
		}
	}

	#[tokio::test]
	async fn test_failed_removal_is_reported() {
		let transport =
			RecordingTransport::new().respond(Endpoint::DeletePushTokens, 400, "bad token");
		let mut track = request();
		track.remove_push_token("apple-token2");

		let err = track.send(&transport).await.unwrap_err();

		assert_eq!(err.status(), Some(400));
		assert!(err.to_string().contains("bad token"));
		assert_eq!(transport.calls().len(), 2);
	}

	#[test]
	fn test_no_removals_means_no_delete_body() {
		assert!(request().to_raw_delete().is_none());
	}

	#[test]
	fn test_projection_does_not_mutate_request() {
		let mut track = request();
		track.set_custom_attribute("email", "x@test.com");
		let before = track.clone();
		let _ = track.to_raw();
		assert_eq!(track, before);
	}

	proptest! {
		#[test]
		fn custom_attribute_is_flattened_next_to_external_id(
			key in "[a-z][a-z0-9_]{0,15}",
			value in any::<i64>(),
		) {
			prop_assume!(!["external_id", "first_name", "email"].contains(&key.as_str()));

			let mut track = request();
			track.set_custom_attribute(key.clone(), value);

			let json = track.to_raw().to_json_value().unwrap();
			let attribute = json["attributes"][0].as_object().unwrap();
			prop_assert_eq!(attribute.get(&key), Some(&json!(value)));
			prop_assert_eq!(attribute.get("external_id"), Some(&json!("holah")));
		}

		#[test]
		fn dedicated_first_name_always_wins(
			dedicated in "[a-zA-Z]{1,12}",
			custom in "[a-zA-Z]{1,12}",
			custom_first in any::<bool>(),
		) {
			let mut track = request();
			if custom_first {
				track.set_custom_attribute("first_name", custom.clone());
				track.set_first_name(dedicated.clone());
			} else {
				track.set_first_name(dedicated.clone());
				track.set_custom_attribute("first_name", custom.clone());
			}

			let json = track.to_raw().to_json_value().unwrap();
			prop_assert_eq!(&json["attributes"][0]["first_name"], &json!(dedicated));
		}
	}
}
