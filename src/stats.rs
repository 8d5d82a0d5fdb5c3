//! Aggregate views over scored leads: summary cards, tier distribution and
//! the score-range histogram.

use crate::classification::QualityTier;
use crate::models::LeadSummary;
use serde::Serialize;

/// Lead counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QualityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl QualityDistribution {
    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        let mut distribution = Self::default();
        for score in scores {
            match QualityTier::from_score(score) {
                QualityTier::High => distribution.high += 1,
                QualityTier::Medium => distribution.medium += 1,
                QualityTier::Low => distribution.low += 1,
            }
        }
        distribution
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Upper bounds (inclusive, in percent) of the histogram buckets.
const RANGE_UPPER_BOUNDS: [f64; 4] = [20.0, 40.0, 60.0, 80.0];
const RANGE_LABELS: [&str; 5] = ["0-20%", "21-40%", "41-60%", "61-80%", "81-100%"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRangeBucket {
    pub range: &'static str,
    pub count: usize,
}

/// Five-bucket histogram over `score * 100`.
///
/// Bucket edges are inclusive on the upper side, so 0.8 lands in "61-80%"
/// even though it classifies as High.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreRangeHistogram(Vec<ScoreRangeBucket>);

impl ScoreRangeHistogram {
    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        let mut counts = [0usize; RANGE_LABELS.len()];
        for score in scores {
            counts[bucket_index(score * 100.0)] += 1;
        }

        Self(
            RANGE_LABELS
                .into_iter()
                .zip(counts)
                .map(|(range, count)| ScoreRangeBucket { range, count })
                .collect(),
        )
    }

    pub fn buckets(&self) -> &[ScoreRangeBucket] {
        &self.0
    }
}

fn bucket_index(percent: f64) -> usize {
    RANGE_UPPER_BOUNDS
        .iter()
        .position(|upper| percent <= *upper)
        .unwrap_or(RANGE_UPPER_BOUNDS.len())
}

/// Summary card figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeadStats {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Mean quality score, 0 when there are no leads.
    pub average_quality: f64,
    /// Accepted share in percent, 0 when there are no leads.
    pub acceptance_rate: f64,
}

impl LeadStats {
    pub fn from_leads(leads: &[LeadSummary]) -> Self {
        let total = leads.len();
        let accepted = leads.iter().filter(|lead| lead.accepted).count();

        let (average_quality, acceptance_rate) = if total == 0 {
            (0.0, 0.0)
        } else {
            let sum: f64 = leads.iter().map(|lead| lead.quality_score).sum();
            (
                sum / total as f64,
                accepted as f64 / total as f64 * 100.0,
            )
        };

        Self {
            total,
            accepted,
            rejected: total - accepted,
            average_quality,
            acceptance_rate,
        }
    }
}

/// Everything the dashboard renders for a set of leads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadDashboard {
    pub stats: LeadStats,
    pub distribution: QualityDistribution,
    pub score_ranges: ScoreRangeHistogram,
}

impl LeadDashboard {
    pub fn from_leads(leads: &[LeadSummary]) -> Self {
        let scores = || leads.iter().map(|lead| lead.quality_score);
        Self {
            stats: LeadStats::from_leads(leads),
            distribution: QualityDistribution::from_scores(scores()),
            score_ranges: ScoreRangeHistogram::from_scores(scores()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(quality_score: f64, accepted: bool) -> LeadSummary {
        LeadSummary {
            quality_score,
            accepted,
        }
    }

    #[test]
    fn test_distribution_counts() {
        let distribution = QualityDistribution::from_scores([0.9, 0.7, 0.5, 0.85]);
        assert_eq!(
            distribution,
            QualityDistribution {
                high: 2,
                medium: 1,
                low: 1
            }
        );
        assert_eq!(distribution.total(), 4);
    }

    #[test]
    fn test_acceptance_rate() {
        let leads = [
            lead(0.9, true),
            lead(0.7, true),
            lead(0.5, false),
            lead(0.85, true),
        ];
        let stats = LeadStats::from_leads(&leads);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.accepted, 3);
        assert_eq!(stats.rejected, 1);
        assert!((stats.acceptance_rate - 75.0).abs() < 1e-9);
        assert!((stats.average_quality - 0.7375).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats_have_no_division_by_zero() {
        let stats = LeadStats::from_leads(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.acceptance_rate, 0.0);
        assert_eq!(stats.average_quality, 0.0);
    }

    #[test]
    fn test_histogram_bucket_edges() {
        let histogram = ScoreRangeHistogram::from_scores([0.0, 0.2, 0.21, 0.4, 0.6, 0.8, 0.81, 1.0]);
        let counts: Vec<usize> = histogram.buckets().iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 2, 1, 1, 2]);
        assert_eq!(histogram.buckets()[4].range, "81-100%");
    }

    #[test]
    fn test_dashboard_serializes_histogram_as_list() {
        let dashboard = LeadDashboard::from_leads(&[lead(0.95, true)]);
        let value = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(value["score_ranges"][4]["count"], 1);
        assert_eq!(value["distribution"]["high"], 1);
        assert_eq!(value["stats"]["acceptance_rate"], 100.0);
    }
}
