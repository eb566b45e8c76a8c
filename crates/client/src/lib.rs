//! Client code for coldreach.
//!
//! This crate provides the website scraping pipeline, the Gemini text
//! generation client, email composition, and Gmail dispatch shared by the
//! server.

pub mod compose;
pub mod fetch;
pub mod gemini;
pub mod mail;
pub mod scrape;
pub mod service;

pub use compose::{EmailComposer, FALLBACK_BODY};
pub use fetch::url::{domain_name, validate_url};
pub use fetch::{FetchClient, FetchConfig, FetchResponse, PageFetcher};
pub use gemini::{GeminiClient, GeminiConfig, GeminiError, TextGenerator};
pub use mail::{
    ComposioClient, DEFAULT_CONNECTION_ID, MailConfig, MailDispatcher, MailError, MailProvider, OutgoingEmail,
};
pub use scrape::{ProfileSource, WebsiteScraper};
pub use service::CompanyDataService;
