//! Heuristic field extractors, one pure function per profile field.
//!
//! Each extractor runs against one page's parsed DOM, is best-effort, and
//! treats the absence of a signal as a non-event rather than an error. The
//! scraper decides which fields an extractor may write; nothing here touches
//! more than its own field.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static LOGO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)logo").expect("invalid regex"));
static HERO_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)hero|banner|jumbotron").expect("invalid regex"));
static CONTENT_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)content|main").expect("invalid regex"));
static OFFERING_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)service|product|solution").expect("invalid regex"));
static CONTACT_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)contact|footer|connect").expect("invalid regex"));
static VALUES_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)values|mission|vision").expect("invalid regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("invalid regex"));
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-\s]?)?(?:\(\d{1,4}\)[-\s]?)?\d{3,4}[-\s]?\d{3,4}").expect("invalid regex")
});

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

/// Collapse an element's text fragments into single-space-separated text.
pub fn element_text(el: &ElementRef) -> String {
    let joined = el.text().collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn class_matches(el: &ElementRef, re: &Regex) -> bool {
    el.value().attr("class").is_some_and(|c| re.is_match(c))
}

/// Text of the page `<title>`, if any.
pub fn page_title(doc: &Html) -> Option<String> {
    let title = doc.select(&selector("title")).next()?;
    let text = element_text(&title);
    if text.is_empty() { None } else { Some(text) }
}

/// Company name: logo alt text first, page title as the fallback.
///
/// The alt-text path strips the word "logo" and keeps the remainder; the
/// title path keeps everything left of the first `|` or `-` separator.
pub fn extract_name(doc: &Html) -> Option<String> {
    for img in doc.select(&selector("img[alt]")) {
        let alt = img.value().attr("alt").unwrap_or_default();
        if LOGO_RE.is_match(alt) {
            let name = LOGO_RE.replace_all(alt, "").trim().to_string();
            if !name.is_empty() {
                return Some(name);
            }
        }
    }

    let title = page_title(doc)?;
    let left = title.find(['|', '-']).map_or(title.as_str(), |i| &title[..i]);
    let name = left.trim();
    if name.is_empty() { None } else { Some(name.to_string()) }
}

/// Company description: meta description, else the first paragraph of a
/// hero/banner/jumbotron block.
pub fn extract_description(doc: &Html) -> Option<String> {
    if let Some(meta) = doc.select(&selector(r#"meta[name="description"]"#)).next()
        && let Some(content) = meta.value().attr("content")
        && !content.trim().is_empty()
    {
        return Some(content.trim().to_string());
    }

    for block in doc.select(&selector("div, section")) {
        if !class_matches(&block, &HERO_CLASS_RE) {
            continue;
        }
        if let Some(p) = block.select(&selector("p")).next() {
            let text = element_text(&p);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }

    None
}

/// About text: the first three paragraphs of `<main>` or of a div whose
/// class matches content/main, space-joined.
///
/// The scraper only calls this on pages whose title says "about", and the
/// result overwrites any earlier value; an about page is authoritative.
pub fn extract_about(doc: &Html) -> Option<String> {
    let container = doc.select(&selector("main")).next().or_else(|| {
        doc.select(&selector("div"))
            .find(|div| class_matches(div, &CONTENT_CLASS_RE))
    })?;

    let paragraphs: Vec<String> = container
        .select(&selector("p"))
        .take(3)
        .map(|p| element_text(&p))
        .filter(|t| !t.is_empty())
        .collect();

    let about = paragraphs.join(" ").trim().to_string();
    if about.is_empty() { None } else { Some(about) }
}

/// Headings inside blocks whose class matches service/product/solution.
///
/// Returned in document order; the caller appends with dedup.
pub fn extract_products(doc: &Html) -> Vec<String> {
    let mut found = Vec::new();

    for block in doc.select(&selector("div, section")) {
        if !class_matches(&block, &OFFERING_CLASS_RE) {
            continue;
        }
        for heading in block.select(&selector("h1, h2, h3")) {
            let text = element_text(&heading);
            if !text.is_empty() {
                found.push(text);
            }
        }
    }

    found
}

/// First email and first plausible phone number from contact-ish sections,
/// with `mailto:`/`tel:` links as the fallback.
pub fn extract_contact(doc: &Html) -> Option<String> {
    let mut email = None;
    let mut phone = None;

    for block in doc.select(&selector("div, section, footer, address")) {
        if !class_matches(&block, &CONTACT_CLASS_RE) {
            continue;
        }
        let text = element_text(&block);
        if email.is_none() {
            email = EMAIL_RE.find(&text).map(|m| m.as_str().to_string());
        }
        if phone.is_none() {
            phone = PHONE_RE
                .find_iter(&text)
                .map(|m| m.as_str().to_string())
                .find(|p| digit_count(p) >= 7);
        }
        if email.is_some() && phone.is_some() {
            break;
        }
    }

    if email.is_none() || phone.is_none() {
        for link in doc.select(&selector("a[href]")) {
            let href = link.value().attr("href").unwrap_or_default();
            if email.is_none()
                && let Some(addr) = href.strip_prefix("mailto:")
            {
                let addr = addr.split('?').next().unwrap_or_default().trim();
                if addr.contains('@') {
                    email = Some(addr.to_string());
                }
            }
            if phone.is_none()
                && let Some(number) = href.strip_prefix("tel:")
                && digit_count(number) >= 7
            {
                phone = Some(number.trim().to_string());
            }
        }
    }

    let mut parts = Vec::new();
    if let Some(e) = email {
        parts.push(format!("Email: {}", e));
    }
    if let Some(p) = phone {
        parts.push(format!("Phone: {}", p));
    }

    if parts.is_empty() { None } else { Some(parts.join(" | ")) }
}

/// Short headings and list items inside a values/mission/vision block.
pub fn extract_values(doc: &Html) -> Vec<String> {
    let Some(block) = doc
        .select(&selector("div, section"))
        .find(|b| class_matches(b, &VALUES_CLASS_RE))
    else {
        return Vec::new();
    };

    block
        .select(&selector("h3, h4, strong, li"))
        .map(|item| element_text(&item))
        .filter(|text| !text.is_empty() && text.len() < 50)
        .collect()
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_extract_name_from_logo_alt() {
        let d = doc(r#"<html><body><img src="/l.png" alt="Acme Corp Logo"></body></html>"#);
        assert_eq!(extract_name(&d), Some("Acme Corp".to_string()));
    }

    #[test]
    fn test_extract_name_falls_back_to_title() {
        let d = doc("<html><head><title>Acme Corp | Industrial Widgets</title></head></html>");
        assert_eq!(extract_name(&d), Some("Acme Corp".to_string()));
    }

    #[test]
    fn test_extract_name_title_splits_on_dash() {
        let d = doc("<html><head><title>Acme Corp - Home</title></head></html>");
        assert_eq!(extract_name(&d), Some("Acme Corp".to_string()));
    }

    #[test]
    fn test_extract_name_logo_alt_with_only_logo_word() {
        // Alt text that is just "logo" leaves nothing; fall through to title.
        let d = doc(r#"<html><head><title>Acme</title></head><body><img alt="logo"></body></html>"#);
        assert_eq!(extract_name(&d), Some("Acme".to_string()));
    }

    #[test]
    fn test_extract_name_none() {
        let d = doc("<html><body><p>nothing here</p></body></html>");
        assert_eq!(extract_name(&d), None);
    }

    #[test]
    fn test_extract_description_prefers_meta() {
        let d = doc(
            r#"<html><head><meta name="description" content="Widgets at scale"></head>
               <body><div class="hero"><p>Hero copy</p></div></body></html>"#,
        );
        assert_eq!(extract_description(&d), Some("Widgets at scale".to_string()));
    }

    #[test]
    fn test_extract_description_hero_fallback() {
        let d = doc(r#"<html><body><section class="main-banner"><p>We build widgets.</p></section></body></html>"#);
        assert_eq!(extract_description(&d), Some("We build widgets.".to_string()));
    }

    #[test]
    fn test_extract_description_ignores_empty_meta() {
        let d = doc(
            r#"<html><head><meta name="description" content="  "></head>
               <body><div class="jumbotron"><p>Fallback.</p></div></body></html>"#,
        );
        assert_eq!(extract_description(&d), Some("Fallback.".to_string()));
    }

    #[test]
    fn test_extract_about_takes_first_three_paragraphs() {
        let d = doc(
            "<html><body><main><p>One.</p><p>Two.</p><p>Three.</p><p>Four.</p></main></body></html>",
        );
        assert_eq!(extract_about(&d), Some("One. Two. Three.".to_string()));
    }

    #[test]
    fn test_extract_about_div_content_fallback() {
        let d = doc(r#"<html><body><div class="page-content"><p>Our story.</p></div></body></html>"#);
        assert_eq!(extract_about(&d), Some("Our story.".to_string()));
    }

    #[test]
    fn test_extract_products_collects_headings() {
        let d = doc(
            r#"<html><body>
                <section class="services-grid">
                    <h2>Cloud Migration</h2>
                    <h3>Managed Hosting</h3>
                </section>
                <div class="product-list"><h2>Widget Pro</h2></div>
            </body></html>"#,
        );
        assert_eq!(extract_products(&d), vec!["Cloud Migration", "Managed Hosting", "Widget Pro"]);
    }

    #[test]
    fn test_extract_products_ignores_unrelated_sections() {
        let d = doc(r#"<html><body><div class="blog"><h2>Latest News</h2></div></body></html>"#);
        assert!(extract_products(&d).is_empty());
    }

    #[test]
    fn test_extract_contact_from_footer() {
        let d = doc(
            r#"<html><body><footer class="site-footer">
                <p>Reach us at hello@acme.test or call 555-123-4567.</p>
            </footer></body></html>"#,
        );
        let contact = extract_contact(&d).unwrap();
        assert!(contact.contains("Email: hello@acme.test"));
        assert!(contact.contains("Phone: 555-123-4567"));
    }

    #[test]
    fn test_extract_contact_mailto_fallback() {
        let d = doc(r#"<html><body><a href="mailto:sales@acme.test?subject=hi">Email us</a></body></html>"#);
        assert_eq!(extract_contact(&d), Some("Email: sales@acme.test".to_string()));
    }

    #[test]
    fn test_extract_contact_rejects_short_numbers() {
        let d = doc(r#"<html><body><div class="contact"><p>Suite 4021, est. 1999</p></div></body></html>"#);
        let contact = extract_contact(&d);
        assert!(contact.is_none_or(|c| !c.contains("Phone")));
    }

    #[test]
    fn test_extract_values() {
        let d = doc(
            r#"<html><body><section class="our-values">
                <li>Integrity</li>
                <li>Customer obsession</li>
                <li>This value statement is far too long to count as a crisp value, so it gets dropped entirely</li>
            </section></body></html>"#,
        );
        assert_eq!(extract_values(&d), vec!["Integrity", "Customer obsession"]);
    }

    #[test]
    fn test_page_title() {
        let d = doc("<html><head><title>  About   Us  </title></head></html>");
        assert_eq!(page_title(&d), Some("About Us".to_string()));
    }
}
