//! Deterministic prompt construction for the email generator.
//!
//! The prompt is a pure function of the profile and sender: same inputs, same
//! instruction block, byte for byte.

use coldreach_core::{CompanyProfile, SenderProfile};

/// Marker the model is told to open its first line with; the parser strips it.
pub const SUBJECT_MARKER: &str = "Subject:";

/// Build the instruction block for one generation call.
///
/// Profile fields are embedded verbatim (name falls back to "the company"),
/// followed by the eight hard requirements and the exact expected output
/// shape.
pub fn build_prompt(profile: &CompanyProfile, sender: &SenderProfile) -> String {
    let industry = if profile.industry.is_empty() { "your industry" } else { &profile.industry };

    format!(
        "You are an expert cold email writer for an AI company. Using the company \
         information below, create a personalized, concise, and compelling cold email \
         that offers AI solutions tailored to their specific business needs.\n\
         \n\
         COMPANY INFORMATION:\n\
         Name: {name}\n\
         Description: {description}\n\
         About: {about}\n\
         Products/Services: {products}\n\
         Industry: {industry}\n\
         Values: {values}\n\
         \n\
         SENDER INFORMATION:\n\
         Name: {sender_name}\n\
         Company: {sender_company}\n\
         Specialization: {sender_specialization}\n\
         Phone: {sender_phone}\n\
         Website: {sender_website}\n\
         \n\
         REQUIREMENTS:\n\
         1. Keep the email under 200 words\n\
         2. Include a personalized subject line that mentions the company name and a specific benefit\n\
         3. Demonstrate understanding of their business and industry challenges\n\
         4. Mention one or two SPECIFIC ways your AI solutions could help their business, based on their products/services\n\
         5. Include a clear but non-pushy call to action (like scheduling a brief call)\n\
         6. Avoid generic language, spam-like phrases, and excessive formality\n\
         7. Make it sound like it's written by a thoughtful human, not AI\n\
         8. Do not mention that you visited or analyzed their website\n\
         \n\
         FORMAT YOUR RESPONSE AS:\n\
         {marker} [email subject]\n\
         \n\
         [email body with an appropriate greeting and a signature including the \
         sender's name, company, phone number, and website]",
        name = profile.name_or_default(),
        description = profile.description,
        about = profile.about,
        products = profile.products_services.join(", "),
        industry = industry,
        values = profile.values.join(", "),
        sender_name = sender.name(),
        sender_company = sender.company(),
        sender_specialization = sender.specialization(),
        sender_phone = sender.phone(),
        sender_website = sender.website(),
        marker = SUBJECT_MARKER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_profile_verbatim() {
        let profile = CompanyProfile {
            name: "Acme Corp".into(),
            description: "Widgets at scale".into(),
            about: "Founded in a garage.".into(),
            products_services: vec!["Widgets".into(), "Gadgets".into()],
            industry: "Manufacturing".into(),
            ..Default::default()
        };
        let prompt = build_prompt(&profile, &SenderProfile::default());

        assert!(prompt.contains("Name: Acme Corp"));
        assert!(prompt.contains("Description: Widgets at scale"));
        assert!(prompt.contains("About: Founded in a garage."));
        assert!(prompt.contains("Products/Services: Widgets, Gadgets"));
        assert!(prompt.contains("Industry: Manufacturing"));
    }

    #[test]
    fn test_prompt_defaults_for_empty_profile() {
        let prompt = build_prompt(&CompanyProfile::default(), &SenderProfile::default());

        assert!(prompt.contains("Name: the company"));
        assert!(prompt.contains("Industry: your industry"));
        assert!(prompt.contains("Name: Our Team"));
        assert!(prompt.contains("Company: Our AI Company"));
        assert!(prompt.contains("Specialization: AI solutions for businesses"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let profile = CompanyProfile { name: "Acme".into(), ..Default::default() };
        let sender = SenderProfile { name: Some("Dana".into()), ..Default::default() };

        assert_eq!(build_prompt(&profile, &sender), build_prompt(&profile, &sender));
    }

    #[test]
    fn test_prompt_specifies_output_shape() {
        let prompt = build_prompt(&CompanyProfile::default(), &SenderProfile::default());
        assert!(prompt.contains("Subject: [email subject]"));
    }
}
