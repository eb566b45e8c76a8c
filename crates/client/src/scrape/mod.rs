//! Website scraper: bounded page walk plus heuristic field extraction.
//!
//! One scrape visits the base page and a fixed candidate list of likely
//! information pages, never more than the page budget, and folds each page
//! into a single `CompanyProfile`. Every per-page failure is absorbed; the
//! caller always gets whatever was accumulated, possibly nothing.

pub mod extractors;
pub mod industry;

use std::collections::HashSet;
use std::sync::Arc;

use reqwest::Url;
use scraper::Html;

use coldreach_core::CompanyProfile;

use crate::fetch::PageFetcher;

/// Path segments tried after the base page, in order. Resolution is relative
/// to the base URL; budget and visited checks may skip any of them.
pub const CANDIDATE_PATHS: [&str; 5] = ["about", "about-us", "services", "products", "solutions"];

/// Navigation labels that commonly leak into offering sections.
const NAV_LABELS: [&str; 14] = [
    "home", "about", "about us", "contact", "contact us", "careers", "login", "sign in", "register", "blog", "news",
    "events", "privacy policy", "terms",
];

/// What a single page visit produced.
///
/// Making the two cases explicit keeps the "never fails the whole scrape"
/// contract visible in the types instead of hidden in catch blocks.
enum PageOutcome {
    /// Page fetched and parsed; ready for the extractors.
    Fetched(Html),
    /// Page contributed nothing, with the reason for the log.
    Skipped(String),
}

/// Transient state for one `scrape` invocation.
struct ScrapeSession {
    visited: HashSet<String>,
    pages_visited: usize,
    max_pages: usize,
    profile: CompanyProfile,
}

impl ScrapeSession {
    fn new(max_pages: usize) -> Self {
        Self { visited: HashSet::new(), pages_visited: 0, max_pages, profile: CompanyProfile::default() }
    }

    fn budget_exhausted(&self) -> bool {
        self.pages_visited >= self.max_pages
    }
}

/// A capability that can turn a base URL into a company profile.
///
/// The cache/service layer depends on this seam so its hit/miss semantics are
/// testable with a counting stub instead of a live scraper.
#[async_trait::async_trait]
pub trait ProfileSource: Send + Sync {
    async fn scrape(&self, base_url: &str) -> CompanyProfile;
}

/// Scrapes a bounded set of pages and accumulates a company profile.
pub struct WebsiteScraper {
    fetcher: Arc<dyn PageFetcher>,
    max_pages: usize,
}

impl WebsiteScraper {
    /// Create a scraper with the given page fetcher and page budget.
    pub fn new(fetcher: Arc<dyn PageFetcher>, max_pages: usize) -> Self {
        Self { fetcher, max_pages }
    }

    async fn visit_page(&self, session: &mut ScrapeSession, url: Url) {
        if session.visited.contains(url.as_str()) || session.budget_exhausted() {
            return;
        }

        session.visited.insert(url.to_string());
        session.pages_visited += 1;

        tracing::debug!("scraping page: {}", url);

        let outcome = match self.fetcher.fetch_page(&url).await {
            Ok(response) => {
                let html = String::from_utf8_lossy(&response.bytes).into_owned();
                PageOutcome::Fetched(Html::parse_document(&html))
            }
            Err(e) => PageOutcome::Skipped(e.to_string()),
        };

        match outcome {
            PageOutcome::Fetched(doc) => apply_extractors(&mut session.profile, &doc),
            PageOutcome::Skipped(reason) => {
                tracing::warn!("page {} contributed nothing: {}", url, reason);
            }
        }
    }
}

#[async_trait::async_trait]
impl ProfileSource for WebsiteScraper {
    /// Scrape the base page plus candidate pages into one profile.
    ///
    /// Infallible by contract: fetch and parse failures degrade the profile,
    /// never the request.
    async fn scrape(&self, base_url: &str) -> CompanyProfile {
        let mut session = ScrapeSession::new(self.max_pages);

        let base = match Url::parse(base_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("unscrapable base URL {}: {}", base_url, e);
                return session.profile;
            }
        };

        self.visit_page(&mut session, base.clone()).await;

        for path in CANDIDATE_PATHS {
            if session.budget_exhausted() {
                break;
            }
            let Ok(candidate) = base.join(path) else {
                continue;
            };
            self.visit_page(&mut session, candidate).await;
        }

        if session.profile.industry.is_empty()
            && let Some(industry) = industry::infer(&session.profile)
        {
            session.profile.industry = industry;
        }

        filter_products(&mut session.profile);

        tracing::info!(
            pages = session.pages_visited,
            "completed scrape of {} ({} products, name {:?})",
            base_url,
            session.profile.products_services.len(),
            session.profile.name,
        );

        session.profile
    }
}

/// Run every extractor against one parsed page.
///
/// Scalar fields are only written while still empty; `about` instead
/// overwrites whenever the page title says "about" (an about page is
/// authoritative, even a second one); list fields always append with dedup.
fn apply_extractors(profile: &mut CompanyProfile, doc: &Html) {
    if profile.name.is_empty()
        && let Some(name) = extractors::extract_name(doc)
    {
        profile.name = name;
    }

    if profile.description.is_empty()
        && let Some(description) = extractors::extract_description(doc)
    {
        profile.description = description;
    }

    let title = extractors::page_title(doc).unwrap_or_default();
    if title.to_lowercase().contains("about")
        && let Some(about) = extractors::extract_about(doc)
    {
        profile.about = about;
    }

    for product in extractors::extract_products(doc) {
        profile.push_product(product);
    }

    if profile.contact.is_empty()
        && let Some(contact) = extractors::extract_contact(doc)
    {
        profile.contact = contact;
    }

    for value in extractors::extract_values(doc) {
        profile.push_value(value);
    }
}

/// Drop navigation labels and too-short entries from the offerings list,
/// unless that would throw away everything we found.
fn filter_products(profile: &mut CompanyProfile) {
    if profile.products_services.is_empty() {
        return;
    }

    let filtered: Vec<String> = profile
        .products_services
        .iter()
        .filter(|entry| {
            let lower = entry.to_lowercase();
            entry.len() >= 4
                && !NAV_LABELS.contains(&lower.as_str())
                && !["login", "sign", "contact", "about"].iter().any(|t| lower.contains(t))
        })
        .cloned()
        .collect();

    if !filtered.is_empty() {
        profile.products_services = filtered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchResponse;
    use bytes::Bytes;
    use coldreach_core::Error;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves canned HTML per URL; any URL not in the map is a 404.
    struct StubFetcher {
        pages: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(u, h)| (u.to_string(), h.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch_page(&self, url: &Url) -> Result<FetchResponse, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.pages.get(url.as_str()) {
                Some(html) => Ok(FetchResponse {
                    url: url.clone(),
                    status: StatusCode::OK,
                    bytes: Bytes::from(html.clone()),
                    fetch_ms: 1,
                }),
                None => Err(Error::HttpError("status 404".into())),
            }
        }
    }

    #[tokio::test]
    async fn test_scrape_respects_page_budget() {
        // 1 base + 5 candidates = 6 possible pages, budget allows 5 fetches.
        let fetcher = Arc::new(StubFetcher::new(&[]));
        let scraper = WebsiteScraper::new(fetcher.clone(), 5);

        scraper.scrape("https://acme.test").await;

        assert_eq!(fetcher.calls(), 5);
    }

    #[tokio::test]
    async fn test_scrape_all_pages_failing_yields_empty_profile() {
        let fetcher = Arc::new(StubFetcher::new(&[]));
        let scraper = WebsiteScraper::new(fetcher, 5);

        let profile = scraper.scrape("https://acme.test").await;

        assert_eq!(profile, CompanyProfile::default());
    }

    #[tokio::test]
    async fn test_scrape_invalid_base_url_yields_empty_profile() {
        let fetcher = Arc::new(StubFetcher::new(&[]));
        let scraper = WebsiteScraper::new(fetcher.clone(), 5);

        let profile = scraper.scrape("not a url").await;

        assert_eq!(profile, CompanyProfile::default());
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_scrape_skips_already_visited_candidates() {
        // Base page *is* the about page; the "about" candidate resolves to the
        // same URL and must not be fetched twice.
        let fetcher = Arc::new(StubFetcher::new(&[(
            "https://acme.test/about",
            "<html><head><title>About</title></head></html>",
        )]));
        let scraper = WebsiteScraper::new(fetcher.clone(), 10);

        scraper.scrape("https://acme.test/about").await;

        // base + about-us/services/products/solutions, about skipped as visited
        assert_eq!(fetcher.calls(), 5);
    }

    #[tokio::test]
    async fn test_name_is_first_write_wins() {
        let fetcher = Arc::new(StubFetcher::new(&[
            ("https://acme.test/", "<html><head><title>Acme Corp | Home</title></head></html>"),
            ("https://acme.test/about", "<html><head><title>Totally Different Name</title></head></html>"),
        ]));
        let scraper = WebsiteScraper::new(fetcher, 5);

        let profile = scraper.scrape("https://acme.test").await;

        assert_eq!(profile.name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_about_overwrites_across_about_pages() {
        // Unlike scalar fields, about is rewritten by every page whose title
        // matches; the last about-ish page wins.
        let fetcher = Arc::new(StubFetcher::new(&[
            (
                "https://acme.test/about",
                "<html><head><title>About</title></head><body><main><p>First about.</p></main></body></html>",
            ),
            (
                "https://acme.test/about-us",
                "<html><head><title>About Us</title></head><body><main><p>Second about.</p></main></body></html>",
            ),
        ]));
        let scraper = WebsiteScraper::new(fetcher, 5);

        let profile = scraper.scrape("https://acme.test").await;

        assert_eq!(profile.about, "Second about.");
    }

    #[tokio::test]
    async fn test_about_not_extracted_from_non_about_pages() {
        let fetcher = Arc::new(StubFetcher::new(&[(
            "https://acme.test/",
            "<html><head><title>Acme Corp</title></head><body><main><p>Homepage copy.</p></main></body></html>",
        )]));
        let scraper = WebsiteScraper::new(fetcher, 5);

        let profile = scraper.scrape("https://acme.test").await;

        assert!(profile.about.is_empty());
    }

    #[tokio::test]
    async fn test_products_dedup_across_pages() {
        let services = r#"<html><body><div class="services">
            <h2>Cloud Migration</h2><h2>Consulting</h2>
        </div></body></html>"#;
        let products = r#"<html><body><div class="products">
            <h2>Consulting</h2><h2>Managed Hosting</h2>
        </div></body></html>"#;

        let fetcher = Arc::new(StubFetcher::new(&[
            ("https://acme.test/services", services),
            ("https://acme.test/products", products),
        ]));
        let scraper = WebsiteScraper::new(fetcher, 5);

        let profile = scraper.scrape("https://acme.test").await;

        assert_eq!(profile.products_services, vec!["Cloud Migration", "Consulting", "Managed Hosting"]);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_what_was_found() {
        let fetcher = Arc::new(StubFetcher::new(&[(
            "https://acme.test/",
            r#"<html><head><title>Acme Corp</title>
               <meta name="description" content="Widgets at scale"></head></html>"#,
        )]));
        let scraper = WebsiteScraper::new(fetcher, 5);

        let profile = scraper.scrape("https://acme.test").await;

        assert_eq!(profile.name, "Acme Corp");
        assert_eq!(profile.description, "Widgets at scale");
        assert!(profile.about.is_empty());
    }

    #[tokio::test]
    async fn test_nav_labels_filtered_from_products() {
        let html = r#"<html><body><div class="services">
            <h2>Cloud Migration</h2><h2>Careers</h2><h2>Blog</h2><h2>API</h2>
        </div></body></html>"#;
        let fetcher = Arc::new(StubFetcher::new(&[("https://acme.test/", html)]));
        let scraper = WebsiteScraper::new(fetcher, 5);

        let profile = scraper.scrape("https://acme.test").await;

        // Careers/Blog are nav labels, API is under four chars.
        assert_eq!(profile.products_services, vec!["Cloud Migration"]);
    }

    #[tokio::test]
    async fn test_filter_never_empties_a_nonempty_list() {
        let html = r#"<html><body><div class="services"><h2>Careers</h2></div></body></html>"#;
        let fetcher = Arc::new(StubFetcher::new(&[("https://acme.test/", html)]));
        let scraper = WebsiteScraper::new(fetcher, 5);

        let profile = scraper.scrape("https://acme.test").await;

        assert_eq!(profile.products_services, vec!["Careers"]);
    }

    #[tokio::test]
    async fn test_industry_inferred_from_accumulated_text() {
        let fetcher = Arc::new(StubFetcher::new(&[(
            "https://acme.test/",
            r#"<html><head><title>Acme Software</title>
               <meta name="description" content="Cloud platform for data teams"></head></html>"#,
        )]));
        let scraper = WebsiteScraper::new(fetcher, 5);

        let profile = scraper.scrape("https://acme.test").await;

        assert_eq!(profile.industry, "Technology");
    }
}
