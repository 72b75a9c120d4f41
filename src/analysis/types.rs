//! Request and response types for debate analysis.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// Analysis style requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Generate counterarguments to a position, or both sides of a topic.
    Counterarguments,
    /// Detect logical fallacies in an argument, or list likely ones for a topic.
    Fallacies,
}

impl AnalysisMode {
    /// Returns all recognized modes.
    pub fn all() -> [Self; 2] {
        [Self::Counterarguments, Self::Fallacies]
    }

    /// Wire name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Counterarguments => "counterarguments",
            Self::Fallacies => "fallacies",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = AnalysisError;

    /// Matching is exact: "Fallacies" or " fallacies" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counterarguments" => Ok(Self::Counterarguments),
            "fallacies" => Ok(Self::Fallacies),
            other => Err(AnalysisError::InvalidMode(other.to_string())),
        }
    }
}

/// Incoming analysis request as it appears on the wire.
///
/// Every field is optional at this layer so that missing values are
/// reported as validation errors instead of deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub perspective: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

impl AnalysisRequest {
    /// Convenience constructor.
    pub fn new(
        topic: impl Into<String>,
        perspective: Option<&str>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            topic: Some(topic.into()),
            perspective: perspective.map(str::to_string),
            mode: Some(mode.into()),
        }
    }

    /// Check the request and normalize it.
    ///
    /// The topic is checked before the mode. A blank perspective counts as absent.
    pub fn validate(self) -> Result<ValidatedRequest, AnalysisError> {
        let topic = self
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AnalysisError::EmptyTopic)?
            .to_string();

        let mode: AnalysisMode = self.mode.as_deref().unwrap_or_default().parse()?;

        let perspective = self
            .perspective
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(ValidatedRequest {
            topic,
            perspective,
            mode,
        })
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub topic: String,
    pub perspective: Option<String>,
    pub mode: AnalysisMode,
}

impl ValidatedRequest {
    pub fn has_perspective(&self) -> bool {
        self.perspective.is_some()
    }
}

/// Successful analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub result: String,
}

/// Error body returned to HTTP callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing_is_exact() {
        assert_eq!(
            "counterarguments".parse::<AnalysisMode>().unwrap(),
            AnalysisMode::Counterarguments
        );
        assert_eq!("fallacies".parse::<AnalysisMode>().unwrap(), AnalysisMode::Fallacies);
        assert!("Fallacies".parse::<AnalysisMode>().is_err());
        assert!("rebuttal".parse::<AnalysisMode>().is_err());
        assert!("".parse::<AnalysisMode>().is_err());
    }

    #[test]
    fn test_mode_round_trips_wire_name() {
        for mode in AnalysisMode::all() {
            assert_eq!(mode.as_str().parse::<AnalysisMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_validate_rejects_empty_topic_before_mode() {
        let request = AnalysisRequest::new("", None, "bogus");
        assert!(matches!(request.validate(), Err(AnalysisError::EmptyTopic)));
    }

    #[test]
    fn test_validate_rejects_whitespace_topic() {
        let request = AnalysisRequest::new("   \t", None, "fallacies");
        assert!(matches!(request.validate(), Err(AnalysisError::EmptyTopic)));
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        assert!(matches!(
            AnalysisRequest::default().validate(),
            Err(AnalysisError::EmptyTopic)
        ));

        let no_mode = AnalysisRequest {
            topic: Some("Nuclear power".into()),
            ..Default::default()
        };
        assert!(matches!(no_mode.validate(), Err(AnalysisError::InvalidMode(_))));
    }

    #[test]
    fn test_validate_normalizes_perspective() {
        let validated = AnalysisRequest::new("Nuclear power", Some("   "), "counterarguments")
            .validate()
            .unwrap();
        assert!(!validated.has_perspective());

        let validated = AnalysisRequest::new(" Nuclear power ", Some(" It is safe. "), "fallacies")
            .validate()
            .unwrap();
        assert_eq!(validated.topic, "Nuclear power");
        assert_eq!(validated.perspective.as_deref(), Some("It is safe."));
        assert_eq!(validated.mode, AnalysisMode::Fallacies);
    }

    #[test]
    fn test_request_deserializes_with_null_perspective() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"topic": "UBI", "perspective": null, "mode": "fallacies"}"#)
                .unwrap();
        assert!(request.perspective.is_none());
        assert_eq!(request.mode.as_deref(), Some("fallacies"));
    }
}
