use crate::classification::QualityTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

// ============ Lead Models ============

/// One prospective customer, as submitted for scoring.
///
/// An ordered mapping of attribute name to value. Attribute names are kept
/// verbatim (spaces included) and in declaration order, which is also the
/// order they go out on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadRecord(Map<String, Value>);

impl LeadRecord {
    /// Wraps an already-normalized attribute map without touching it.
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }

    /// Attribute names in declaration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Envelope posted to the scoring endpoint: `{"data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub data: LeadRecord,
}

// ============ Scorer Models ============

/// The only contract the scorer is trusted to honour.
///
/// Anything else the scorer sends back is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoringReply {
    pub prediction: String,
}

// ============ Display Models ============

/// Fully-populated result handed to the rendering layer.
///
/// Every field is present and in range whether the scorer answered, answered
/// with garbage, or never answered at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    /// Identifier of this scoring round.
    pub lead_id: Uuid,
    /// Label shown to the user.
    pub prediction: String,
    /// Estimated lead value in [0, 1].
    pub quality_score: f64,
    /// Tier derived from `quality_score`.
    pub quality_tier: QualityTier,
    pub accepted: bool,
    /// Reported certainty in [0, 1].
    pub prediction_confidence: f64,
    /// At most four attribute names that contributed to the result.
    pub features_used: Vec<String>,
    /// True when the model was synthesized after a failed round.
    pub fallback: bool,
    pub scored_at: DateTime<Utc>,
}

/// Result of one scoring round: always a renderable model, plus the failure
/// message when the model is a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub result: DisplayModel,
    pub error: Option<String>,
}

impl PredictionOutcome {
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

// ============ Aggregate Models ============

/// The slice of a scored lead the aggregate views need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadSummary {
    pub quality_score: f64,
    pub accepted: bool,
}

impl From<&DisplayModel> for LeadSummary {
    fn from(model: &DisplayModel) -> Self {
        Self {
            quality_score: model.quality_score,
            accepted: model.accepted,
        }
    }
}

/// Request body for `POST /api/v1/leads/stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsRequest {
    #[serde(default)]
    pub leads: Vec<LeadSummary>,
}
