//! Application state for the web layer.

use std::sync::Arc;

use crate::bus::Publisher;
use crate::ratp::RatpClient;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// RATP API client
    pub ratp: Arc<RatpClient>,

    /// Outbound message bus
    pub publisher: Arc<dyn Publisher>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(ratp: RatpClient, publisher: impl Publisher + 'static) -> Self {
        Self {
            ratp: Arc::new(ratp),
            publisher: Arc::new(publisher),
        }
    }
}
