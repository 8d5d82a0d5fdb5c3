//! One scoring round: build the request, ask the scorer once, normalize.

use crate::models::{LeadRecord, PredictionOutcome};
use crate::normalizer::ResponseNormalizer;
use crate::request_builder::build_request;
use crate::scoring_client::LeadScorer;
use std::sync::Arc;

#[derive(Clone)]
pub struct LeadPredictor {
    scorer: Arc<dyn LeadScorer>,
    normalizer: ResponseNormalizer,
}

impl LeadPredictor {
    pub fn new(scorer: Arc<dyn LeadScorer>, normalizer: ResponseNormalizer) -> Self {
        Self { scorer, normalizer }
    }

    /// Scores one lead. The outcome always carries a renderable model; a
    /// failed round also carries the message to show the user.
    pub async fn predict(&self, record: LeadRecord) -> PredictionOutcome {
        let request = build_request(record);
        let reply = self.scorer.predict(&request).await;
        self.normalizer.normalize(&request.data, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PredictionFailure;
    use crate::models::{PredictionRequest, ScoringReply};
    use crate::score_source::RandomScoreSource;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingScorer {
        calls: AtomicUsize,
        reply: Result<ScoringReply, PredictionFailure>,
    }

    #[async_trait]
    impl LeadScorer for CountingScorer {
        async fn predict(
            &self,
            _request: &PredictionRequest,
        ) -> Result<ScoringReply, PredictionFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn predictor(scorer: Arc<CountingScorer>) -> LeadPredictor {
        let normalizer = ResponseNormalizer::new(Arc::new(RandomScoreSource::seeded(1)));
        LeadPredictor::new(scorer, normalizer)
    }

    fn lead() -> LeadRecord {
        serde_json::from_value(json!({
            "Lead Origin": "API",
            "Lead Source": "Google",
            "Do Not Email": "No"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_successful_round() {
        let scorer = Arc::new(CountingScorer {
            calls: AtomicUsize::new(0),
            reply: Ok(ScoringReply {
                prediction: "Medium".to_string(),
            }),
        });

        let outcome = predictor(scorer.clone()).predict(lead()).await;

        assert!(outcome.error.is_none());
        assert!(outcome.result.accepted);
        assert_eq!(
            outcome.result.features_used,
            vec!["Lead Origin", "Lead Source", "Do Not Email"]
        );
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_round_is_not_retried() {
        let scorer = Arc::new(CountingScorer {
            calls: AtomicUsize::new(0),
            reply: Err(PredictionFailure::Network("connection refused".to_string())),
        });

        let outcome = predictor(scorer.clone()).predict(lead()).await;

        assert!(outcome.result.fallback);
        assert!(outcome.error.unwrap().contains("connection refused"));
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
    }
}
