//! Category / trigger type enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business area a task belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    General,
    Database,
    Analytics,
    Infrastructure,
    Marketing,
    Security,
    #[serde(rename = "HR")]
    Hr,
    Data,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::General,
        Category::Database,
        Category::Analytics,
        Category::Infrastructure,
        Category::Marketing,
        Category::Security,
        Category::Hr,
        Category::Data,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Database => "Database",
            Category::Analytics => "Analytics",
            Category::Infrastructure => "Infrastructure",
            Category::Marketing => "Marketing",
            Category::Security => "Security",
            Category::Hr => "HR",
            Category::Data => "Data",
        }
    }

    /// Absent or unknown values fall back to `General`.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

/// How a task is meant to be triggered (informational only, nothing schedules it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerType {
    #[default]
    Manual,
    Daily,
    Weekly,
    Monthly,
}

impl TriggerType {
    pub const ALL: [TriggerType; 4] = [
        TriggerType::Manual,
        TriggerType::Daily,
        TriggerType::Weekly,
        TriggerType::Monthly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TriggerType::Manual => "Manual",
            TriggerType::Daily => "Daily",
            TriggerType::Weekly => "Weekly",
            TriggerType::Monthly => "Monthly",
        }
    }

    /// Absent or unknown values fall back to `Manual`.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

/// Error for text that names no member of an enumerated set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

impl FromStr for TriggerType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TriggerType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant {
                kind: "trigger type",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("HR"), Category::Hr)]
    #[case(Some("hr"), Category::Hr)]
    #[case(Some("Infrastructure"), Category::Infrastructure)]
    #[case(Some("Finance"), Category::General)]
    #[case(None, Category::General)]
    fn category_parse_or_default(#[case] raw: Option<&str>, #[case] expected: Category) {
        assert_eq!(Category::parse_or_default(raw), expected);
    }

    #[rstest]
    #[case(Some("Weekly"), TriggerType::Weekly)]
    #[case(Some("monthly"), TriggerType::Monthly)]
    #[case(Some("Hourly"), TriggerType::Manual)]
    #[case(None, TriggerType::Manual)]
    fn trigger_parse_or_default(#[case] raw: Option<&str>, #[case] expected: TriggerType) {
        assert_eq!(TriggerType::parse_or_default(raw), expected);
    }

    #[test]
    fn hr_serializes_in_upper_case() {
        assert_eq!(serde_json::to_string(&Category::Hr).unwrap(), "\"HR\"");
    }

    #[test]
    fn unknown_variant_names_the_kind() {
        let err = "Hourly".parse::<TriggerType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown trigger type: Hourly");
    }
}
