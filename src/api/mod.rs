//! Kalshi API integration.
//!
//! This module provides a signed REST client for the Kalshi trade API,
//! handling authentication, rate limiting, and payload types.

pub mod auth;
mod client;
pub mod rate_limit;
pub mod types;

#[cfg(test)]
pub use client::MockMarketApi;
pub use client::{KalshiClient, MarketApi, get_all_markets};
pub use rate_limit::RateLimiter;
pub use types::{
    Balance, Event, EventsQuery, EventsResponse, ExchangeStatus, Market, MarketsQuery,
    MarketsResponse, Series, SeriesQuery, SeriesResponse,
};
