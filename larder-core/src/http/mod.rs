//! HTTP plumbing for the harvest sources.
//!
//! All outgoing requests go through the [`HttpClient`] trait so sources can
//! be driven by a [`MockClient`] in tests, and through the [`RateLimiter`]
//! so we never hammer the data source.

mod client;
mod rate_limiter;

pub use client::{HttpClient, MockClient, MockResponse, WebClient, WebClientBuilder};
pub use rate_limiter::RateLimiter;
