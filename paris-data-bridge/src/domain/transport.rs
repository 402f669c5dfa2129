//! Transport type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown transport type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transport type {input:?}: expected one of SUBWAY, BUS, TRAMWAY, SUB_URBAN_TRAIN")]
pub struct InvalidTransportType {
    input: String,
}

/// A kind of RATP transport network.
///
/// The canonical name (`SUBWAY`, `BUS`, ...) is what callers use in our own
/// HTTP paths; the path segment (`metros`, `buses`, ...) is what the upstream
/// API expects.
///
/// # Examples
///
/// ```
/// use paris_data_bridge::domain::TransportType;
///
/// let subway = TransportType::parse("SUBWAY").unwrap();
/// assert_eq!(subway.path_segment(), "metros");
///
/// // Names are case-sensitive
/// assert!(TransportType::parse("subway").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportType {
    Subway,
    Bus,
    Tramway,
    SubUrbanTrain,
}

impl TransportType {
    /// Every variant, in declaration order.
    pub const ALL: [TransportType; 4] = [
        TransportType::Subway,
        TransportType::Bus,
        TransportType::Tramway,
        TransportType::SubUrbanTrain,
    ];

    /// Parse a transport type from its canonical name.
    pub fn parse(s: &str) -> Result<Self, InvalidTransportType> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| InvalidTransportType {
                input: s.to_string(),
            })
    }

    /// Canonical name, as accepted by [`TransportType::parse`].
    pub fn name(self) -> &'static str {
        match self {
            TransportType::Subway => "SUBWAY",
            TransportType::Bus => "BUS",
            TransportType::Tramway => "TRAMWAY",
            TransportType::SubUrbanTrain => "SUB_URBAN_TRAIN",
        }
    }

    /// Path segment used by the upstream API.
    pub fn path_segment(self) -> &'static str {
        match self {
            TransportType::Subway => "metros",
            TransportType::Bus => "buses",
            TransportType::Tramway => "tramways",
            TransportType::SubUrbanTrain => "rers",
        }
    }
}

impl FromStr for TransportType {
    type Err = InvalidTransportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_names() {
        assert_eq!(TransportType::parse("SUBWAY"), Ok(TransportType::Subway));
        assert_eq!(TransportType::parse("BUS"), Ok(TransportType::Bus));
        assert_eq!(TransportType::parse("TRAMWAY"), Ok(TransportType::Tramway));
        assert_eq!(
            TransportType::parse("SUB_URBAN_TRAIN"),
            Ok(TransportType::SubUrbanTrain)
        );
    }

    #[test]
    fn path_segments() {
        assert_eq!(TransportType::Subway.path_segment(), "metros");
        assert_eq!(TransportType::Bus.path_segment(), "buses");
        assert_eq!(TransportType::Tramway.path_segment(), "tramways");
        assert_eq!(TransportType::SubUrbanTrain.path_segment(), "rers");
    }

    #[test]
    fn reject_path_segment_as_name() {
        // Upstream segments are not accepted in place of the canonical name
        assert!(TransportType::parse("metros").is_err());
        assert!(TransportType::parse("rers").is_err());
    }

    #[test]
    fn reject_wrong_case_and_empty() {
        assert!(TransportType::parse("Subway").is_err());
        assert!(TransportType::parse("bus").is_err());
        assert!(TransportType::parse("").is_err());
        assert!(TransportType::parse(" BUS").is_err());
    }

    #[test]
    fn error_names_the_input() {
        let err = TransportType::parse("BOAT").unwrap_err();
        assert!(err.to_string().contains("\"BOAT\""));
    }

    #[test]
    fn serde_uses_canonical_name() {
        let json = serde_json::to_string(&TransportType::SubUrbanTrain).unwrap();
        assert_eq!(json, "\"SUB_URBAN_TRAIN\"");

        let parsed: TransportType = serde_json::from_str("\"TRAMWAY\"").unwrap();
        assert_eq!(parsed, TransportType::Tramway);
    }

    #[test]
    fn display_matches_name() {
        for t in TransportType::ALL {
            assert_eq!(t.to_string(), t.name());
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Anything other than the four canonical names is rejected
        #[test]
        fn unknown_names_rejected(s in "\\PC{0,20}") {
            let known = TransportType::ALL.iter().any(|t| t.name() == s);
            prop_assert_eq!(TransportType::parse(&s).is_ok(), known);
        }

        /// Lowercased canonical names never parse
        #[test]
        fn lowercase_rejected(idx in 0usize..4) {
            let name = TransportType::ALL[idx].name().to_lowercase();
            prop_assert!(TransportType::parse(&name).is_err());
        }
    }
}
