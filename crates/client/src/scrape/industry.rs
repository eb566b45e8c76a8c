//! Keyword-based industry inference over the accumulated profile text.
//!
//! A last-resort pass run after all pages are scraped; it never fires on an
//! empty profile, so a site that yielded nothing stays all-empty.

use coldreach_core::CompanyProfile;

/// Industry labels with the keywords that vote for them. Matches in the
/// company name or description count double.
const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Technology",
        &[
            "software", "tech", "digital", "cloud", "data", "ai", "platform", "saas", "automation", "app",
            "analytics", "cyber",
        ],
    ),
    (
        "Healthcare",
        &["health", "medical", "healthcare", "patient", "clinic", "pharma", "wellness", "therapy", "care"],
    ),
    (
        "Finance",
        &["finance", "financial", "banking", "investment", "insurance", "fintech", "payment", "capital", "wealth"],
    ),
    (
        "Education",
        &["education", "learning", "school", "university", "student", "course", "training", "edtech"],
    ),
    (
        "Manufacturing",
        &["manufacturing", "factory", "production", "industrial", "machinery", "fabrication", "assembly"],
    ),
    (
        "Retail",
        &["retail", "shop", "store", "ecommerce", "consumer", "merchandise", "marketplace", "commerce"],
    ),
    (
        "Marketing",
        &["marketing", "advertising", "brand", "campaign", "seo", "content", "audience", "engagement"],
    ),
    (
        "Consulting",
        &["consulting", "consultant", "advisory", "strategy", "management", "expertise", "guidance"],
    ),
    (
        "Real Estate",
        &["real estate", "property", "housing", "construction", "residential", "commercial", "mortgage"],
    ),
    (
        "Transportation & Logistics",
        &["transport", "logistics", "shipping", "freight", "warehouse", "delivery", "fleet", "cargo"],
    ),
];

/// Occurrences of a single keyword stop counting past this; one landing page
/// repeating "cloud" fifty times should not drown out everything else.
const MAX_OCCURRENCE_SCORE: usize = 3;

/// Infer an industry label from everything the scrape collected.
///
/// Returns `None` when no keyword matches at all (including the empty-corpus
/// case).
pub fn infer(profile: &CompanyProfile) -> Option<String> {
    let corpus = [
        profile.name.clone(),
        profile.description.clone(),
        profile.about.clone(),
        profile.products_services.join(" "),
        profile.values.join(" "),
    ]
    .join(" ")
    .to_lowercase();

    if corpus.trim().is_empty() {
        return None;
    }

    let name = profile.name.to_lowercase();
    let description = profile.description.to_lowercase();

    let mut best: Option<(&str, usize)> = None;
    for (industry, keywords) in INDUSTRY_KEYWORDS {
        let mut score = 0;
        for keyword in *keywords {
            let occurrences = corpus.matches(keyword).count();
            if occurrences > 0 {
                score += occurrences.min(MAX_OCCURRENCE_SCORE);
                if name.contains(keyword) || description.contains(keyword) {
                    score += 2;
                }
            }
        }
        if score > 0 && best.is_none_or(|(_, s)| score > s) {
            best = Some((industry, score));
        }
    }

    best.map(|(industry, _)| industry.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_technology() {
        let profile = CompanyProfile {
            name: "Acme Software".into(),
            description: "Cloud data platform for analytics teams".into(),
            ..Default::default()
        };
        assert_eq!(infer(&profile), Some("Technology".to_string()));
    }

    #[test]
    fn test_infer_from_products() {
        let profile = CompanyProfile {
            products_services: vec!["Freight forwarding".into(), "Warehouse management".into()],
            ..Default::default()
        };
        assert_eq!(infer(&profile), Some("Transportation & Logistics".to_string()));
    }

    #[test]
    fn test_infer_empty_profile_stays_empty() {
        assert_eq!(infer(&CompanyProfile::default()), None);
    }

    #[test]
    fn test_infer_no_keyword_match() {
        let profile = CompanyProfile { description: "We juggle and do birthday parties".into(), ..Default::default() };
        assert_eq!(infer(&profile), None);
    }

    #[test]
    fn test_name_match_outweighs_scattered_mentions() {
        let profile = CompanyProfile {
            name: "Lakeview Clinic".into(),
            about: "Our shop uses software for scheduling".into(),
            ..Default::default()
        };
        assert_eq!(infer(&profile), Some("Healthcare".to_string()));
    }
}
