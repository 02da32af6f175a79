// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK for the Appboy REST API.
//!
//! This crate tracks user attributes, purchases and custom events, manages
//! push tokens and triggers API campaigns.
//!
//! # Layers
//!
//! - **Builders**: [`TrackRequest`] and [`CampaignTriggerRequest`] collect
//!   changes through mutating calls and send them in one go.
//! - **Raw**: the [`raw`] module posts the wire types from [`appboy_core`]
//!   directly.
//! - **Transport**: anything implementing [`Transport`]. [`HttpTransport`]
//!   is the `reqwest` implementation used by default.
//!
//! Appboy answers accepted requests with `201 Created`; every other status
//! is returned as [`AppboyError::UnexpectedStatus`] with the response body.
//!
//! # Example
//!
//! ```ignore
//! use appboy::{Client, Event, PurchaseEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("app-group-id")?;
//!     let app = client.app_client("app-id");
//!
//!     let mut request = app.track_request("user-42");
//!     request
//!         .set_first_name("Ada")
//!         .set_custom_attribute("plan", "gold")
//!         .remove_push_token("stale-token");
//!
//!     let mut purchase = PurchaseEvent::new();
//!     purchase.set_product_id("sku-1").set_price(4.29);
//!     request.add_event(purchase);
//!     request.add_event(Event::new("checkout"));
//!
//!     client.send_track(&request).await?;
//!     Ok(())
//! }
//! ```

mod campaign;
mod client;
mod error;
mod event;
pub mod raw;
mod track;
mod transport;

#[cfg(test)]
mod test_support;

pub use campaign::CampaignTriggerRequest;
pub use client::{AppClient, Client, ClientBuilder, ClientConfig};
pub use error::{AppboyError, Result};
pub use event::{Event, PurchaseEvent, TrackEvent, DEFAULT_CURRENCY};
pub use track::TrackRequest;
pub use transport::{HttpTransport, Transport, TransportResponse};

// Re-export core types for convenience
pub use appboy_core::{Endpoint, Properties, MAX_CAMPAIGN_RECIPIENTS};
