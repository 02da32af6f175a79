// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory transport used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use appboy_core::Endpoint;
use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::transport::{Transport, TransportResponse};

/// Records every posted body and answers 201 unless told otherwise.
pub(crate) struct RecordingTransport {
	calls: Mutex<Vec<(Endpoint, String)>>,
	responses: HashMap<Endpoint, TransportResponse>,
}

impl RecordingTransport {
	pub(crate) fn new() -> Self {
		Self {
			calls: Mutex::new(Vec::new()),
			responses: HashMap::new(),
		}
	}

	/// Answers `endpoint` with `status` and `body` instead of 201.
	pub(crate) fn respond(mut self, endpoint: Endpoint, status: u16, body: &str) -> Self {
		self
			.responses
			.insert(endpoint, TransportResponse::new(status, body));
		self
	}

	/// Every call so far, in order, with the body parsed as JSON.
	pub(crate) fn calls(&self) -> Vec<(Endpoint, Value)> {
		self
			.raw_calls()
			.into_iter()
			.map(|(endpoint, body)| (endpoint, serde_json::from_str(&body).unwrap()))
			.collect()
	}

	/// Every call so far, in order, with the body exactly as sent.
	pub(crate) fn raw_calls(&self) -> Vec<(Endpoint, String)> {
		self.calls.lock().unwrap().clone()
	}

	pub(crate) fn bodies_for(&self, endpoint: Endpoint) -> Vec<Value> {
		self
			.calls()
			.into_iter()
			.filter(|(e, _)| *e == endpoint)
			.map(|(_, body)| body)
			.collect()
	}
}

#[async_trait]
impl Transport for RecordingTransport {
	async fn post(&self, endpoint: Endpoint, body: String) -> Result<TransportResponse> {
		self.calls.lock().unwrap().push((endpoint, body));

		Ok(self
			.responses
			.get(&endpoint)
			.cloned()
			.unwrap_or_else(|| TransportResponse::new(201, r#"{"message":"success"}"#)))
	}
}
