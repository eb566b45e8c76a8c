//! Domain records shared across the pipeline.
//!
//! `CompanyProfile` is the accumulator one scrape owns; `GeneratedEmail` and
//! `DispatchOutcome` are the only structures that cross the tool boundary, so
//! they must round-trip losslessly through serde.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured record of facts extracted about a target company.
///
/// Scalar fields are first-write-wins within one scrape (`about` excepted,
/// see the scraper); list fields are append-only with exact-match dedup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompanyProfile {
    /// Company name, empty until discovered.
    #[serde(default)]
    pub name: String,

    /// Short marketing description (meta description or hero copy).
    #[serde(default)]
    pub description: String,

    /// Products and services advertised on the site, insertion order.
    #[serde(default)]
    pub products_services: Vec<String>,

    /// Longer "about us" text.
    #[serde(default)]
    pub about: String,

    /// Contact details rendered as "Email: x | Phone: y".
    #[serde(default)]
    pub contact: String,

    /// Inferred industry label.
    #[serde(default)]
    pub industry: String,

    /// Stated company values or mission fragments.
    #[serde(default)]
    pub values: Vec<String>,

    /// Team member names, when a site exposes them.
    #[serde(default)]
    pub team: Vec<String>,

    /// Client or customer names, when a site exposes them.
    #[serde(default)]
    pub clients: Vec<String>,
}

impl CompanyProfile {
    /// Company name, or the neutral placeholder used in prompts and fallbacks.
    pub fn name_or_default(&self) -> &str {
        if self.name.is_empty() { "the company" } else { &self.name }
    }

    /// Append to `products_services` unless empty or already present.
    ///
    /// Dedup is case-sensitive exact match across the whole scrape.
    pub fn push_product(&mut self, entry: String) {
        if !entry.is_empty() && !self.products_services.contains(&entry) {
            self.products_services.push(entry);
        }
    }

    /// Append to `values` unless empty or already present.
    pub fn push_value(&mut self, entry: String) {
        if !entry.is_empty() && !self.values.contains(&entry) {
            self.values.push(entry);
        }
    }
}

/// Who the email is from. Supplied per request; every field is optional and
/// falls back to the documented default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SenderProfile {
    /// Sender's name (default "Our Team").
    #[serde(default)]
    pub name: Option<String>,

    /// Sender's company (default "Our AI Company").
    #[serde(default)]
    pub company: Option<String>,

    /// What the sender's company does (default "AI solutions for businesses").
    #[serde(default)]
    pub specialization: Option<String>,

    /// Contact phone for the signature.
    #[serde(default)]
    pub phone: Option<String>,

    /// Website for the signature.
    #[serde(default)]
    pub website: Option<String>,
}

impl SenderProfile {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("Our Team")
    }

    pub fn company(&self) -> &str {
        self.company.as_deref().unwrap_or("Our AI Company")
    }

    pub fn specialization(&self) -> &str {
        self.specialization.as_deref().unwrap_or("AI solutions for businesses")
    }

    /// Placeholder text the model is told to use when no phone is supplied;
    /// substituted back out of the generated body when one is.
    pub fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or("[Phone Number]")
    }

    pub fn website(&self) -> &str {
        self.website.as_deref().unwrap_or("[Website]")
    }
}

/// A composed outbound email, immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedEmail {
    /// Subject line with the `Subject:` marker already stripped.
    pub subject: String,
    /// Email body.
    pub body: String,
    /// The profile the email was composed from, embedded for traceability.
    pub company: CompanyProfile,
}

/// Outcome of handing an email to the mail provider.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DispatchOutcome {
    pub success: bool,
    /// Human-readable result, for failures as well as successes.
    pub message: String,
    /// Opaque provider payload, plus pipeline context on combined requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl DispatchOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), data: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None }
    }
}

/// Outcome of initiating the mail provider's one-time authorization flow.
///
/// There is no "already authorized" state: initiation either yields a
/// redirect URL to visit (`success = true`) or it didn't work, including the
/// case where the provider answers without a URL (`success = false`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
    /// URL the operator must open to complete authorization, when required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Identity the connection is registered under.
    pub connection_id: String,
}
