//! Domain types for the Paris data bridge.
//!
//! Plain records describing RATP lines and their destinations. They are
//! built per request, returned to the HTTP caller, published, and dropped.

mod destinations;
mod transport;

pub use destinations::{Destination, DestinationResult, GetAllDestinationsResponse, Metadata};
pub use transport::{InvalidTransportType, TransportType};
