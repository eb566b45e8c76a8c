//! Company data service.
//!
//! Front door for profile lookups: consults the day-bucketed cache before
//! scraping, stores fresh scrapes back, and applies the caller's name
//! override after the lookup so cached entries stay override-free.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use coldreach_core::{CompanyProfile, ProfileCache, cache_key, day_bucket};
use tracing::{debug, info};

use crate::fetch::url::domain_name;
use crate::scrape::ProfileSource;

pub struct CompanyDataService {
    cache: Arc<ProfileCache>,
    source: Arc<dyn ProfileSource>,
}

impl CompanyDataService {
    pub fn new(cache: Arc<ProfileCache>, source: Arc<dyn ProfileSource>) -> Self {
        Self { cache, source }
    }

    /// Returns the company profile for a website, scraping at most once per
    /// domain per day bucket.
    pub async fn company_profile(&self, url: &str, name_override: Option<&str>) -> CompanyProfile {
        self.company_profile_at(url, name_override, Utc::now()).await
    }

    /// Same as [`company_profile`](Self::company_profile) with an explicit
    /// clock, so freshness can be tested across bucket boundaries.
    pub async fn company_profile_at(
        &self,
        url: &str,
        name_override: Option<&str>,
        now: DateTime<Utc>,
    ) -> CompanyProfile {
        let domain = domain_name(url);
        let key = cache_key(&domain, day_bucket(now));

        let mut profile = match self.cache.get(&key) {
            Some(cached) => {
                debug!(%domain, "cache hit for company profile");
                cached
            }
            None => {
                info!(%domain, "scraping website for company profile");
                let scraped = self.source.scrape(url).await;
                self.cache.insert(key, scraped.clone());
                scraped
            }
        };

        if let Some(name) = name_override {
            let name = name.trim();
            if !name.is_empty() {
                profile.name = name.to_string();
            }
        }

        profile
    }

    /// Drops cache entries outside the freshness horizon.
    pub fn sweep_cache(&self, now: DateTime<Utc>) -> usize {
        self.cache.sweep(day_bucket(now))
    }
}
