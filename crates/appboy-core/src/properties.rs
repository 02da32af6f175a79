// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ordered, dynamically keyed JSON properties.
//!
//! Used for custom user attributes, event and purchase properties, and
//! campaign trigger properties. Insertion order is kept so that the JSON
//! sent to Appboy is deterministic.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An ordered map of property names to JSON values.
///
/// # Example
///
/// ```
/// use appboy_core::Properties;
///
/// let props = Properties::new()
///     .insert("like_count", 31)
///     .insert("plan", "gold")
///     .insert("is_trial", false);
/// assert_eq!(props.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: Map<String, Value>,
}

impl Properties {
	/// Creates an empty set of properties.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a key-value pair (builder pattern).
	///
	/// The value can be any type that implements `Into<serde_json::Value>`.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.set(key, value);
		self
	}

	/// Sets a key in place, replacing any previous value.
	pub fn set<K, V>(&mut self, key: K, value: V)
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
	}

	/// Merges another set of properties into this one.
	///
	/// If both contain the same key, the value from `other` takes precedence.
	pub fn merge(mut self, other: Properties) -> Self {
		for (k, v) in other.inner {
			self.inner.insert(k, v);
		}
		self
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	/// Iterates over the properties in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.inner.iter()
	}

	/// Converts the properties into a `serde_json::Value` object.
	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Properties> for Value {
	fn from(props: Properties) -> Self {
		props.into_value()
	}
}

/// Only JSON objects are properties; any other value is handed back.
impl TryFrom<Value> for Properties {
	type Error = Value;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(map) => Ok(Self { inner: map }),
			other => Err(other),
		}
	}
}

impl From<Map<String, Value>> for Properties {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}

impl<K, V> FromIterator<(K, V)> for Properties
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut props = Properties::new();
		for (k, v) in iter {
			props.set(k, v);
		}
		props
	}
}
