//! Display strings for one practitioner card.

use shared::domain::Practitioner;

pub const FALLBACK_SPECIALITY: &str = "Specialist";
pub const FALLBACK_FEE: &str = "Fee not available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PractitionerCard {
    pub name: String,
    pub initials: String,
    pub photo: Option<String>,
    pub primary_speciality: String,
    pub experience: String,
    pub clinic_name: String,
    pub location: String,
    pub languages: Option<String>,
    pub fee: String,
}

impl PractitionerCard {
    pub fn from_practitioner(practitioner: &Practitioner) -> Self {
        let (clinic_name, location) = match &practitioner.clinic {
            Some(clinic) => (
                clinic.name.clone(),
                format!("{}, {}", clinic.address.locality, clinic.address.city),
            ),
            None => (String::new(), ", ".to_string()),
        };

        Self {
            name: practitioner.name.clone(),
            initials: practitioner.initials.clone(),
            photo: practitioner.photo.clone(),
            primary_speciality: practitioner
                .speciality_names()
                .next()
                .unwrap_or(FALLBACK_SPECIALITY)
                .to_string(),
            experience: practitioner.experience.clone(),
            clinic_name,
            location,
            languages: (!practitioner.languages.is_empty())
                .then(|| format!("Speaks: {}", practitioner.languages.join(", "))),
            fee: if practitioner.fees.is_empty() {
                FALLBACK_FEE.to_string()
            } else {
                practitioner.fees.clone()
            },
        }
    }
}

/// Stable widget identifier for a category checkbox: lowercase, with every
/// whitespace run (leading and trailing included) replaced by one `-`.
pub fn category_slug(category: &str) -> String {
    let mut slug = String::with_capacity(category.len());
    let mut in_whitespace = false;
    for ch in category.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }
    slug
}
