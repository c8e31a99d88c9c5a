//! Canned advisory text for target-region predictions.
//!
//! Sentences are selected independently per request dimension and joined with
//! a single space; their order is part of the response contract.

use crate::domain::model::{AccessRequest, AgeBand, DisabilityCategory, EducationLevel};
use crate::domain::region::is_target_country;

pub const REFERENCE_CASE_RECOMMENDATION: &str = "This is a European reference case. Use these patterns to inform African educational development.";
pub const REFERENCE_CASE_POLICY: &str =
    "Use European educational policies as reference for development.";

fn age_sentence(age: AgeBand) -> Option<&'static str> {
    match age {
        AgeBand::Y15To24 => Some("Focus on vocational training and skills development for young people with disabilities."),
        AgeBand::Y25To34 => Some("Develop higher education accessibility programs and career transition support."),
        AgeBand::Y35To44 | AgeBand::Y45To54 => Some("Implement adult education programs and workplace accommodation initiatives."),
        AgeBand::Y55To64 => None,
    }
}

fn category_sentence(category: DisabilityCategory) -> Option<&'static str> {
    match category {
        DisabilityCategory::Vision => Some("Invest in Braille materials, screen readers, and visual accessibility technology."),
        DisabilityCategory::Hearing => Some("Provide sign language interpreters, hearing aids, and audio-visual learning materials."),
        DisabilityCategory::Mobility => Some("Ensure physical accessibility with ramps, elevators, and mobility assistance."),
        DisabilityCategory::Memory => Some("Develop cognitive support programs and memory enhancement training."),
    }
}

fn education_sentence(education: EducationLevel) -> Option<&'static str> {
    match education {
        EducationLevel::Basic => Some("Establish early intervention programs and inclusive primary education."),
        EducationLevel::Secondary => Some("Create accessible secondary education with specialized support services."),
        EducationLevel::Tertiary => Some("Develop inclusive tertiary education with disability support offices."),
        EducationLevel::NoResponse => None,
    }
}

// 級距與 classifier 不同
fn magnitude_sentence(prediction: f64) -> &'static str {
    if prediction < 100.0 {
        "Urgent need for basic educational infrastructure and teacher training."
    } else if prediction < 200.0 {
        "Requires significant investment in educational resources and accessibility."
    } else if prediction < 500.0 {
        "Moderate investment needed in specialized programs and facilities."
    } else {
        "Focus on maintaining and expanding existing successful programs."
    }
}

pub fn recommendation(request: &AccessRequest, prediction: f64) -> String {
    if !is_target_country(request.country.as_str()) {
        return REFERENCE_CASE_RECOMMENDATION.to_string();
    }

    let sentences: Vec<&str> = [
        age_sentence(request.age),
        category_sentence(request.category),
        education_sentence(request.education),
        Some(magnitude_sentence(prediction)),
    ]
    .into_iter()
    .flatten()
    .collect();

    sentences.join(" ")
}

pub fn policy_suggestion(country: &str, prediction: f64) -> String {
    if !is_target_country(country) {
        return REFERENCE_CASE_POLICY.to_string();
    }

    let funding = if prediction < 200.0 {
        "Prioritize funding for basic educational accessibility and infrastructure."
    } else {
        "Allocate resources for advanced educational programs and specialized services."
    };

    [
        "Develop inclusive education infrastructure with universal design principles.",
        "Implement comprehensive teacher training programs for inclusive education.",
        "Establish partnerships with European institutions for knowledge transfer and capacity building.",
        "Invest in assistive technologies and digital accessibility solutions.",
        funding,
        "Establish monitoring and evaluation systems to track educational access improvements.",
    ]
    .join(" ")
}
