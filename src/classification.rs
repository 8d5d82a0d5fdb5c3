//! Quality tiers shared by the per-lead result and the aggregate views.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the High tier.
pub const HIGH_THRESHOLD: f64 = 0.8;
/// Lower bound (inclusive) of the Medium tier.
pub const MEDIUM_THRESHOLD: f64 = 0.6;

/// One of three ordered quality tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    High,
    Medium,
    Low,
}

impl QualityTier {
    /// Classifies a quality score.
    ///
    /// `score >= 0.8` is High, `0.6 <= score < 0.8` is Medium, everything
    /// else (including NaN) is Low. Scores above 1.0 are still High.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            QualityTier::High
        } else if score >= MEDIUM_THRESHOLD {
            QualityTier::Medium
        } else {
            QualityTier::Low
        }
    }

    /// Maps a scorer label onto a tier. Only exact "High" and "Medium" match;
    /// "Low", "Not Specified" and anything unrecognized fall to Low.
    pub fn from_label(label: &str) -> Self {
        match label {
            "High" => QualityTier::High,
            "Medium" => QualityTier::Medium,
            _ => QualityTier::Low,
        }
    }

    /// Whether leads in this tier are treated as viable.
    ///
    /// Medium counts as accepted. This is a business rule kept as-is.
    pub fn is_accepted(self) -> bool {
        matches!(self, QualityTier::High | QualityTier::Medium)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::High => "High",
            QualityTier::Medium => "Medium",
            QualityTier::Low => "Low",
        }
    }

    /// Human-facing name used on result cards and chart legends.
    pub fn display_name(self) -> &'static str {
        match self {
            QualityTier::High => "High Quality",
            QualityTier::Medium => "Medium Quality",
            QualityTier::Low => "Low Quality",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a [0,1] fraction as a rounded whole percentage.
pub fn as_percent(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(QualityTier::from_score(1.0), QualityTier::High);
        assert_eq!(QualityTier::from_score(0.8), QualityTier::High);
        assert_eq!(QualityTier::from_score(0.799_999), QualityTier::Medium);
        assert_eq!(QualityTier::from_score(0.6), QualityTier::Medium);
        assert_eq!(QualityTier::from_score(0.599_999), QualityTier::Low);
        assert_eq!(QualityTier::from_score(0.0), QualityTier::Low);
    }

    #[test]
    fn test_out_of_range_scores() {
        assert_eq!(QualityTier::from_score(1.7), QualityTier::High);
        assert_eq!(QualityTier::from_score(-0.2), QualityTier::Low);
        assert_eq!(QualityTier::from_score(f64::NAN), QualityTier::Low);
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(QualityTier::from_label("High"), QualityTier::High);
        assert_eq!(QualityTier::from_label("Medium"), QualityTier::Medium);
        assert_eq!(QualityTier::from_label("Low"), QualityTier::Low);
        assert_eq!(QualityTier::from_label("Not Specified"), QualityTier::Low);
        // case matters, the scorer emits exact labels
        assert_eq!(QualityTier::from_label("high"), QualityTier::Low);
    }

    #[test]
    fn test_acceptance() {
        assert!(QualityTier::High.is_accepted());
        assert!(QualityTier::Medium.is_accepted());
        assert!(!QualityTier::Low.is_accepted());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(QualityTier::from_score(0.93).display_name(), "High Quality");
        assert_eq!(QualityTier::from_score(0.65).display_name(), "Medium Quality");
        assert_eq!(QualityTier::from_score(0.12).display_name(), "Low Quality");
        assert_eq!(QualityTier::Medium.to_string(), "Medium");
    }

    #[test]
    fn test_as_percent() {
        assert_eq!(as_percent(0.876), 88);
        assert_eq!(as_percent(1.0), 100);
        assert_eq!(as_percent(0.0), 0);
        assert_eq!(as_percent(f64::NAN), 0);
    }
}
