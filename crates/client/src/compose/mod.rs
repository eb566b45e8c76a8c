//! Email composition: prompt construction, generation, response parsing.
//!
//! `EmailComposer::compose` never fails. A generator error, an empty
//! response, or unparseable text all degrade to a deterministic fallback
//! email with the profile embedded unchanged.

pub mod parse;
pub mod prompt;

pub use parse::{parse_email_text, substitute_placeholders};
pub use prompt::{SUBJECT_MARKER, build_prompt};

use std::sync::Arc;

use coldreach_core::{CompanyProfile, GeneratedEmail, SenderProfile};

use crate::gemini::TextGenerator;

/// Body used when generation fails outright.
pub const FALLBACK_BODY: &str =
    "We were unable to generate a personalized email at this time. Please try again in a few minutes.";

/// Composes outbound emails from company profiles via a text generator.
pub struct EmailComposer {
    generator: Arc<dyn TextGenerator>,
}

impl EmailComposer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate a personalized email for `profile` from `sender`.
    ///
    /// Infallible by contract: any generation failure yields the fallback
    /// email instead of an error.
    pub async fn compose(&self, profile: CompanyProfile, sender: &SenderProfile) -> GeneratedEmail {
        let prompt = build_prompt(&profile, sender);

        match self.generator.generate(&prompt).await {
            Ok(text) => {
                let (subject, body) = parse_email_text(&text);
                let body = substitute_placeholders(&body, sender);
                tracing::info!("generated email for {} (subject: {})", profile.name_or_default(), subject);
                GeneratedEmail { subject, body, company: profile }
            }
            Err(e) => {
                tracing::error!("email generation failed for {}: {}", profile.name_or_default(), e);
                GeneratedEmail {
                    subject: format!("AI Solutions for {}", profile.name_or_default()),
                    body: FALLBACK_BODY.to_string(),
                    company: profile,
                }
            }
        }
    }
}
