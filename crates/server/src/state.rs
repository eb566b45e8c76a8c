//! Shared server state.
//!
//! Holds the configuration, the profile cache, and the optional generation
//! and dispatch capabilities. Capabilities whose API keys are not configured
//! stay `None`; tools that need them fail with a `CONFIG_ERROR` at call time
//! instead of preventing startup.

use std::sync::Arc;

use chrono::Utc;
use coldreach_client::{
    CompanyDataService, ComposioClient, EmailComposer, FetchClient, FetchConfig, GeminiClient, GeminiConfig,
    MailConfig, MailDispatcher, MailProvider, ProfileSource, TextGenerator, WebsiteScraper,
};
use coldreach_core::{AppConfig, Error, ProfileCache, SenderProfile, day_bucket};

pub struct AppState {
    pub config: AppConfig,
    cache: Arc<ProfileCache>,
    pub service: CompanyDataService,
    composer: Option<EmailComposer>,
    mail: Option<MailDispatcher>,
}

impl AppState {
    /// Builds the full state from configuration, wiring real clients.
    pub fn from_config(config: AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            ..Default::default()
        })?;
        let source: Arc<dyn ProfileSource> = Arc::new(WebsiteScraper::new(Arc::new(fetcher), config.max_pages));

        let composer = match &config.gemini_api_key {
            Some(key) => {
                let client = GeminiClient::new(GeminiConfig {
                    api_key: key.clone(),
                    model: config.gemini_model.clone(),
                    ..Default::default()
                })
                .map_err(|e| Error::Config(e.to_string()))?;
                Some(EmailComposer::new(Arc::new(client)))
            }
            None => None,
        };

        let mail = match &config.composio_api_key {
            Some(key) => {
                let client =
                    ComposioClient::new(MailConfig::new(key.clone())).map_err(|e| Error::Config(e.to_string()))?;
                Some(MailDispatcher::new(Arc::new(client)))
            }
            None => None,
        };

        Ok(Self::assemble(config, source, composer, mail))
    }

    /// Builds state from pre-wired capability seams. Used by tests.
    pub fn with_parts(
        config: AppConfig,
        source: Arc<dyn ProfileSource>,
        generator: Option<Arc<dyn TextGenerator>>,
        provider: Option<Arc<dyn MailProvider>>,
    ) -> Self {
        Self::assemble(
            config,
            source,
            generator.map(EmailComposer::new),
            provider.map(MailDispatcher::new),
        )
    }

    fn assemble(
        config: AppConfig,
        source: Arc<dyn ProfileSource>,
        composer: Option<EmailComposer>,
        mail: Option<MailDispatcher>,
    ) -> Self {
        let cache = Arc::new(ProfileCache::new());
        let service = CompanyDataService::new(cache.clone(), source);
        Self { config, cache, service, composer, mail }
    }

    pub fn composer(&self) -> Result<&EmailComposer, Error> {
        self.composer.as_ref().ok_or_else(|| {
            Error::Config("email generation is not configured; set COLDREACH_GEMINI_API_KEY".to_string())
        })
    }

    pub fn mail(&self) -> Result<&MailDispatcher, Error> {
        self.mail
            .as_ref()
            .ok_or_else(|| Error::Config("email sending is not configured; set COLDREACH_COMPOSIO_API_KEY".to_string()))
    }

    pub fn generation_configured(&self) -> bool {
        self.composer.is_some()
    }

    pub fn dispatch_configured(&self) -> bool {
        self.mail.is_some()
    }

    pub fn cache_entries(&self) -> usize {
        self.cache.len()
    }

    /// Sender identity from configuration, used when the request carries none.
    pub fn sender(&self) -> SenderProfile {
        SenderProfile {
            name: Some(self.config.sender_name.clone()),
            company: Some(self.config.sender_company.clone()),
            specialization: Some(self.config.sender_specialization.clone()),
            phone: None,
            website: None,
        }
    }

    /// Drops stale cache entries off the request path.
    pub fn spawn_cache_sweep(&self) {
        let cache = Arc::clone(&self.cache);
        tokio::spawn(async move {
            let removed = cache.sweep(day_bucket(Utc::now()));
            if removed > 0 {
                tracing::debug!(removed, "swept stale profile cache entries");
            }
        });
    }
}
