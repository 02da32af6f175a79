// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::endpoint::Endpoint;

/// A request body bound to the endpoint that accepts it.
pub trait Payload {
	/// Endpoint this body is posted to.
	const ENDPOINT: Endpoint;

	/// Encodes the body as the JSON text sent on the wire.
	fn to_body(&self) -> serde_json::Result<String>;
}
