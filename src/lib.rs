//! Lead Scoring API Library
//!
//! This library provides the core functionality for the Lead Scoring API:
//! shaping form input into scorer requests, talking to the external scoring
//! service, and normalizing its one-label answer into a complete display
//! model for the lead form.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `integrations`: External service integrations.
//! - `classification`: Quality tiers and thresholds.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and router.
//! - `models`: Lead, reply and display models.
//! - `normalizer`: Reply-to-display-model normalization and fallback.
//! - `predictor`: One scoring round end to end.
//! - `request_builder`: Form input coercion and request envelope.
//! - `score_source`: Score and confidence synthesis.
//! - `scoring_client`: Scoring service client.
//! - `stats`: Aggregate views over scored leads.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and other binaries
pub mod classification;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod predictor;
pub mod request_builder;
pub mod score_source;
pub mod scoring_client;
pub mod stats;
