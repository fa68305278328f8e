//! Storage units for disk monitoring thresholds

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;

/// Storage unit used to express monitoring thresholds and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    /// Kibibytes, alias "Ko"
    Kilo,
    /// Mebibytes, alias "Mo"
    Mega,
    /// Gibibytes, alias "Go"
    #[default]
    Giga,
}

impl Unit {
    /// Get the alias used in configuration and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kilo => "Ko",
            Unit::Mega => "Mo",
            Unit::Giga => "Go",
        }
    }

    /// Number of bytes in one of this unit
    pub fn factor(&self) -> u64 {
        match self {
            Unit::Kilo => 1024,
            Unit::Mega => 1024 * 1024,
            Unit::Giga => 1024 * 1024 * 1024,
        }
    }

    /// Express a byte count in this unit
    pub fn convert(&self, bytes: u64) -> f64 {
        bytes as f64 / self.factor() as f64
    }

    /// Strict parse of a unit alias
    pub fn try_parse(token: &str) -> Result<Self, LoggerError> {
        match token {
            "Ko" => Ok(Unit::Kilo),
            "Mo" => Ok(Unit::Mega),
            "Go" => Ok(Unit::Giga),
            other => Err(LoggerError::ConfigurationDefault {
                field: "unit",
                value: other.to_string(),
                default: Unit::Giga.as_str().to_string(),
            }),
        }
    }

    /// Parse a unit alias, falling back to `Giga` with a warning
    pub fn parse(token: &str) -> Self {
        Self::try_parse(token).unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            Unit::Giga
        })
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Unit {
    fn from(s: String) -> Self {
        Unit::parse(&s)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture;

    #[test]
    fn test_parse_known_units() {
        assert_eq!(Unit::parse("Ko").factor(), 1024);
        assert_eq!(Unit::parse("Mo").factor(), 1024 * 1024);
        assert_eq!(Unit::parse("Go").factor(), 1024 * 1024 * 1024);
    }

    #[test]
    fn test_parse_unknown_defaults_to_giga_with_warning() {
        let (unit, events) = capture(|| Unit::parse("xyz"));
        assert_eq!(unit, Unit::Giga);
        assert_eq!(unit.factor(), 1024 * 1024 * 1024);

        let warnings = events.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("xyz"));
    }

    #[test]
    fn test_try_parse_is_case_sensitive() {
        assert!(Unit::try_parse("mo").is_err());
        assert!(matches!(
            Unit::try_parse("GB"),
            Err(LoggerError::ConfigurationDefault { field: "unit", .. })
        ));
    }

    #[test]
    fn test_convert() {
        assert_eq!(Unit::Mega.convert(3 * 1024 * 1024), 3.0);
        assert_eq!(Unit::Kilo.convert(512), 0.5);
    }

    #[test]
    fn test_unit_from_toml_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            unit: Unit,
        }

        let parsed: Wrapper = toml::from_str("unit = \"Mo\"").unwrap();
        assert_eq!(parsed.unit, Unit::Mega);

        let fallback: Wrapper = toml::from_str("unit = \"bytes\"").unwrap();
        assert_eq!(fallback.unit, Unit::Giga);
    }
}
