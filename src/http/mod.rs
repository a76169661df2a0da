//! HTTP client module
//!
//! Provides the HTTP client used to talk to the movie catalog.
//!
//! # Features
//!
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: Integration with auth module
//! - **Status Classification**: Non-2xx responses become typed errors
//!
//! Requests are never retried; a failed call fails the caller.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
