//! Core types and shared functionality for coldreach.
//!
//! This crate provides:
//! - Domain records (company profile, sender profile, generated email)
//! - Day-bucketed in-memory profile cache
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod profile;

pub use cache::{ProfileCache, cache_key, day_bucket};
pub use config::AppConfig;
pub use error::Error;
pub use profile::{AuthOutcome, CompanyProfile, DispatchOutcome, GeneratedEmail, SenderProfile};
