//! HTTP API for the reelscout release search service.

pub mod api;
pub mod metrics;
pub mod state;
