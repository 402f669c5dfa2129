//! Wire contract for destinations messages.
//!
//! Every message is a JSON document: either the full
//! [`GetAllDestinationsResponse`] envelope, or `null` when the upstream
//! call produced nothing.

use crate::domain::GetAllDestinationsResponse;

use super::error::BusError;

/// A decoded message: the envelope, or `None` for a failed upstream call.
pub type DestinationsMessage = Option<GetAllDestinationsResponse>;

/// Serialize a message for the wire.
pub fn encode(message: Option<&GetAllDestinationsResponse>) -> Result<Vec<u8>, BusError> {
    serde_json::to_vec(&message).map_err(BusError::Encode)
}

/// Parse a message received from the wire.
pub fn decode(payload: &[u8]) -> Result<DestinationsMessage, BusError> {
    serde_json::from_slice(payload).map_err(BusError::Decode)
}
