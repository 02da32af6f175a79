// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Purchase and custom event builders.

use appboy_core::time::wire;
use appboy_core::{format_time, Properties, RawEvent, RawPurchase};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Currency used by [`PurchaseEvent::new`].
pub const DEFAULT_CURRENCY: &str = "USD";

/// A purchase made by the user of a [`crate::TrackRequest`].
///
/// The external id is filled in from the track request when it is sent.
///
/// # Example
///
/// ```
/// use appboy::PurchaseEvent;
/// use chrono::{TimeZone, Utc};
///
/// let mut purchase = PurchaseEvent::new();
/// purchase
///     .set_product_id("blah")
///     .set_currency_usd()
///     .set_price(4.29)
///     .set_quantity(1)
///     .set_time(Utc.timestamp_opt(0, 0).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseEvent {
	product_id: String,
	currency: String,
	price: f64,
	quantity: u32,
	#[serde(with = "wire")]
	time: DateTime<Utc>,
	#[serde(default, skip_serializing_if = "Properties::is_empty")]
	properties: Properties,
}

impl PurchaseEvent {
	/// Creates a purchase of one unit in USD, timestamped now.
	pub fn new() -> Self {
		Self {
			product_id: String::new(),
			currency: DEFAULT_CURRENCY.to_string(),
			price: 0.0,
			quantity: 1,
			time: Utc::now(),
			properties: Properties::new(),
		}
	}

	pub fn set_product_id(&mut self, product_id: impl Into<String>) -> &mut Self {
		self.product_id = product_id.into();
		self
	}

	/// Sets the ISO 4217 currency code.
	pub fn set_currency(&mut self, currency: impl Into<String>) -> &mut Self {
		self.currency = currency.into();
		self
	}

	pub fn set_currency_usd(&mut self) -> &mut Self {
		self.set_currency(DEFAULT_CURRENCY)
	}

	/// Sets the unit price. A NaN or infinite price makes `send` fail with
	/// [`crate::AppboyError::SerializationError`].
	pub fn set_price(&mut self, price: f64) -> &mut Self {
		self.price = price;
		self
	}

	pub fn set_quantity(&mut self, quantity: u32) -> &mut Self {
		self.quantity = quantity;
		self
	}

	/// Sets the purchase time. Any time zone is accepted and stored as UTC.
	pub fn set_time<Tz: TimeZone>(&mut self, time: DateTime<Tz>) -> &mut Self {
		self.time = time.with_timezone(&Utc);
		self
	}

	/// Sets a purchase property.
	pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.properties.set(key, value);
		self
	}

	pub fn product_id(&self) -> &str {
		&self.product_id
	}

	pub fn currency(&self) -> &str {
		&self.currency
	}

	pub fn price(&self) -> f64 {
		self.price
	}

	pub fn quantity(&self) -> u32 {
		self.quantity
	}

	pub fn time(&self) -> DateTime<Utc> {
		self.time
	}

	pub fn properties(&self) -> &Properties {
		&self.properties
	}

	/// Projects the purchase into its wire form for `external_id`.
	pub fn to_raw(&self, external_id: &str) -> RawPurchase {
		RawPurchase {
			external_id: external_id.to_string(),
			product_id: self.product_id.clone(),
			currency: self.currency.clone(),
			price: self.price,
			quantity: self.quantity,
			time: format_time(&self.time),
			properties: self.properties.clone(),
		}
	}
}

impl Default for PurchaseEvent {
	fn default() -> Self {
		Self::new()
	}
}

/// A named custom event for the user of a [`crate::TrackRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
	name: String,
	#[serde(with = "wire")]
	time: DateTime<Utc>,
	#[serde(default, skip_serializing_if = "Properties::is_empty")]
	properties: Properties,
	#[serde(default)]
	update_existing_only: bool,
}

impl Event {
	/// Creates an event with the given name, timestamped now.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			time: Utc::now(),
			properties: Properties::new(),
			update_existing_only: false,
		}
	}

	pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
		self.name = name.into();
		self
	}

	/// Sets the event time. Any time zone is accepted and stored as UTC.
	pub fn set_time<Tz: TimeZone>(&mut self, time: DateTime<Tz>) -> &mut Self {
		self.time = time.with_timezone(&Utc);
		self
	}

	pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.properties.set(key, value);
		self
	}

	/// Only record the event if the user already exists in Appboy.
	pub fn set_update_existing_only(&mut self, update_existing_only: bool) -> &mut Self {
		self.update_existing_only = update_existing_only;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn time(&self) -> DateTime<Utc> {
		self.time
	}

	pub fn properties(&self) -> &Properties {
		&self.properties
	}

	pub fn update_existing_only(&self) -> bool {
		self.update_existing_only
	}

	/// Projects the event into its wire form for `external_id`.
	pub fn to_raw(&self, external_id: &str) -> RawEvent {
		RawEvent {
			external_id: external_id.to_string(),
			name: self.name.clone(),
			time: format_time(&self.time),
			properties: self.properties.clone(),
			update_existing_only: self.update_existing_only,
		}
	}
}

/// Either kind of event a [`crate::TrackRequest`] accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackEvent {
	Purchase(PurchaseEvent),
	Generic(Event),
}

impl From<PurchaseEvent> for TrackEvent {
	fn from(event: PurchaseEvent) -> Self {
		TrackEvent::Purchase(event)
	}
}

impl From<Event> for TrackEvent {
	fn from(event: Event) -> Self {
		TrackEvent::Generic(event)
	}
}
