//! Turns whatever the scorer produced into a complete [`DisplayModel`].

use crate::classification::QualityTier;
use crate::errors::PredictionFailure;
use crate::models::{DisplayModel, LeadRecord, PredictionOutcome, ScoringReply};
use crate::score_source::ScoreSource;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Maximum number of contributing factors reported.
pub const FEATURE_LIMIT: usize = 4;

/// Factors reported when the scorer could not be consulted.
pub const FALLBACK_FEATURES: [&str; FEATURE_LIMIT] = [
    "TotalVisits",
    "Asymmetrique Activity Score",
    "Specialization",
    "Country",
];

#[derive(Clone)]
pub struct ResponseNormalizer {
    source: Arc<dyn ScoreSource>,
}

impl ResponseNormalizer {
    pub fn new(source: Arc<dyn ScoreSource>) -> Self {
        Self { source }
    }

    /// Normalizes the outcome of one scoring round.
    ///
    /// Never fails: a failure yields a fallback model and the failure message.
    pub fn normalize(
        &self,
        record: &LeadRecord,
        reply: Result<ScoringReply, PredictionFailure>,
    ) -> PredictionOutcome {
        match reply {
            Ok(reply) => {
                let result = self.scored_model(record, &reply);
                tracing::info!(
                    "Lead {} scored {} ({}%), accepted: {}",
                    result.lead_id,
                    result.prediction,
                    crate::classification::as_percent(result.quality_score),
                    result.accepted
                );
                PredictionOutcome {
                    result,
                    error: None,
                }
            }
            Err(failure) => {
                let result = self.fallback_model();
                tracing::warn!(
                    "Prediction failed, returning fallback for lead {}: {}",
                    result.lead_id,
                    failure
                );
                PredictionOutcome {
                    result,
                    error: Some(failure.to_string()),
                }
            }
        }
    }

    /// Derives the display model from a scorer label.
    pub fn scored_model(&self, record: &LeadRecord, reply: &ScoringReply) -> DisplayModel {
        let tier = QualityTier::from_label(&reply.prediction);
        let quality_score = self.source.quality_score(tier);

        DisplayModel {
            lead_id: Uuid::new_v4(),
            prediction: reply.prediction.clone(),
            quality_score,
            quality_tier: QualityTier::from_score(quality_score),
            accepted: tier.is_accepted(),
            prediction_confidence: self.source.confidence(),
            features_used: contributing_features(record),
            fallback: false,
            scored_at: Utc::now(),
        }
    }

    /// Synthesizes a display model without any scorer input.
    ///
    /// Acceptance is drawn independently of the score and label.
    pub fn fallback_model(&self) -> DisplayModel {
        let quality_score = self.source.fallback_score();

        DisplayModel {
            lead_id: Uuid::new_v4(),
            prediction: self.source.fallback_tier().as_str().to_string(),
            quality_score,
            quality_tier: QualityTier::from_score(quality_score),
            accepted: self.source.fallback_accepted(),
            prediction_confidence: self.source.confidence(),
            features_used: FALLBACK_FEATURES.iter().map(|f| f.to_string()).collect(),
            fallback: true,
            scored_at: Utc::now(),
        }
    }
}

/// First [`FEATURE_LIMIT`] attribute names of the record, in declaration order.
pub fn contributing_features(record: &LeadRecord) -> Vec<String> {
    record
        .attribute_names()
        .take(FEATURE_LIMIT)
        .map(str::to_string)
        .collect()
}
