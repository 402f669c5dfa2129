//! RATP open-data API client.
//!
//! Wraps the community RATP API (`api-ratp.pierre-grimaud.fr`), which
//! exposes Paris metro, bus, tramway and RER data as JSON.
//!
//! Only the destinations endpoint is used: for a given transport type
//! and line it returns the termini served in each direction.

mod client;
mod error;

pub use client::{RatpClient, RatpConfig};
pub use error::RatpError;
