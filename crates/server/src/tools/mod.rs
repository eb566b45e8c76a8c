//! MCP tool implementations.
//!
//! This module contains all tools exposed by the coldreach server.

pub mod email_generate;
pub mod email_generate_send;
pub mod email_send;
pub mod gmail_setup;
pub mod service_health;

pub use email_generate::{EmailGenerateOutput, EmailGenerateParams};
pub use email_generate_send::EmailGenerateSendParams;
pub use email_send::EmailSendParams;
pub use gmail_setup::GmailSetupParams;
pub use service_health::ServiceHealthOutput;
