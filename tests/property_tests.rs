/// Property-based tests using proptest
/// Tests invariants that should hold for every label, score and record
use lead_scoring_api::classification::QualityTier;
use lead_scoring_api::errors::PredictionFailure;
use lead_scoring_api::models::{LeadRecord, LeadSummary, ScoringReply};
use lead_scoring_api::normalizer::ResponseNormalizer;
use lead_scoring_api::request_builder::{build_record, coerce, FieldKind, LEAD_FIELDS};
use lead_scoring_api::score_source::RandomScoreSource;
use lead_scoring_api::stats::{LeadStats, QualityDistribution};
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::sync::Arc;

fn normalizer(seed: u64) -> ResponseNormalizer {
    ResponseNormalizer::new(Arc::new(RandomScoreSource::seeded(seed)))
}

fn record_with(names: &[String]) -> LeadRecord {
    let mut attributes = Map::new();
    for name in names {
        attributes.insert(name.clone(), Value::String("x".to_string()));
    }
    LeadRecord::from_attributes(attributes)
}

fn any_label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("High".to_string()),
        Just("Medium".to_string()),
        Just("Low".to_string()),
        "\\PC*",
    ]
}

// Property: acceptance and score ranges follow the label
proptest! {
    #[test]
    fn accepted_iff_high_or_medium(label in any_label(), seed in any::<u64>()) {
        let result = normalizer(seed).scored_model(
            &record_with(&["Lead Origin".to_string()]),
            &ScoringReply { prediction: label.clone() },
        );
        let expected = label == "High" || label == "Medium";
        prop_assert_eq!(result.accepted, expected);
    }

    #[test]
    fn score_range_matches_label(label in any_label(), seed in any::<u64>()) {
        let result = normalizer(seed).scored_model(
            &LeadRecord::default(),
            &ScoringReply { prediction: label.clone() },
        );
        let score = result.quality_score;
        match label.as_str() {
            "High" => prop_assert!((0.8..=1.0).contains(&score)),
            "Medium" => prop_assert!((0.6..0.8).contains(&score)),
            _ => prop_assert!((0.0..0.6).contains(&score)),
        }
        prop_assert!((0.8..=1.0).contains(&result.prediction_confidence));
        prop_assert_eq!(result.quality_tier, QualityTier::from_score(score));
    }

    #[test]
    fn features_are_declaration_order_prefix(
        names in prop::collection::btree_set("[A-Za-z ]{1,12}", 0..10),
        seed in any::<u64>()
    ) {
        let names: Vec<String> = names.into_iter().rev().collect();
        let result = normalizer(seed).scored_model(
            &record_with(&names),
            &ScoringReply { prediction: "High".to_string() },
        );
        prop_assert_eq!(result.features_used.len(), names.len().min(4));
        prop_assert_eq!(&result.features_used[..], &names[..names.len().min(4)]);
    }

    #[test]
    fn failures_always_yield_in_range_fallback(status in 100u16..600, body in "\\PC*", seed in any::<u64>()) {
        let outcome = normalizer(seed).normalize(
            &LeadRecord::default(),
            Err(PredictionFailure::HttpStatus { status, body }),
        );
        prop_assert!(outcome.result.fallback);
        prop_assert!((0.0..=1.0).contains(&outcome.result.quality_score));
        prop_assert!((0.0..=1.0).contains(&outcome.result.prediction_confidence));
        prop_assert_eq!(outcome.result.features_used.len(), 4);
        prop_assert!(!outcome.error.unwrap_or_default().is_empty());
    }
}

// Property: classification is total and exclusive
proptest! {
    #[test]
    fn every_score_lands_in_exactly_one_tier(score in any::<f64>()) {
        let tier = QualityTier::from_score(score);
        let matches = [
            score >= 0.8,
            (0.6..0.8).contains(&score),
            !(score >= 0.6),
        ];
        prop_assert_eq!(matches.iter().filter(|m| **m).count(), 1);
        let expected = if matches[0] {
            QualityTier::High
        } else if matches[1] {
            QualityTier::Medium
        } else {
            QualityTier::Low
        };
        prop_assert_eq!(tier, expected);
    }

    #[test]
    fn distribution_accounts_for_every_lead(scores in prop::collection::vec(0.0f64..=1.0, 0..50)) {
        let distribution = QualityDistribution::from_scores(scores.iter().copied());
        prop_assert_eq!(distribution.total(), scores.len());
    }

    #[test]
    fn acceptance_rate_is_a_percentage(leads in prop::collection::vec((0.0f64..=1.0, any::<bool>()), 0..50)) {
        let leads: Vec<LeadSummary> = leads
            .into_iter()
            .map(|(quality_score, accepted)| LeadSummary { quality_score, accepted })
            .collect();
        let stats = LeadStats::from_leads(&leads);
        prop_assert!((0.0..=100.0).contains(&stats.acceptance_rate));
        prop_assert_eq!(stats.accepted + stats.rejected, stats.total);
    }
}

// Property: request building never panics and always yields wire types
proptest! {
    #[test]
    fn numeric_coercion_always_yields_number(input in "\\PC*") {
        let value = coerce(FieldKind::Numeric, &Value::String(input));
        prop_assert!(value.is_number());
    }

    #[test]
    fn yes_no_coercion_is_binary(input in "\\PC*") {
        let value = coerce(FieldKind::YesNo, &Value::String(input));
        prop_assert!(value == "Yes" || value == "No");
    }

    #[test]
    fn built_record_starts_with_declared_fields(extra in prop::collection::btree_map("[a-z]{1,8}", "[a-z]{0,8}", 0..5)) {
        let mut raw = Map::new();
        for (k, v) in &extra {
            raw.insert(k.clone(), Value::String(v.clone()));
        }
        let record = build_record(&raw);
        let names: Vec<&str> = record.attribute_names().take(LEAD_FIELDS.len()).collect();
        let declared: Vec<&str> = LEAD_FIELDS.iter().map(|f| f.name).collect();
        prop_assert_eq!(names, declared);
        prop_assert_eq!(record.len(), LEAD_FIELDS.len() + extra.len());
    }
}
