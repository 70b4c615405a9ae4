use serde::{Deserialize, Serialize};

use crate::protocol::{ClinicRecord, PractitionerRecord};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PractitionerId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicAddress {
    pub locality: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    pub name: String,
    pub address: ClinicAddress,
}

/// A practitioner with every optional wire field already defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practitioner {
    pub id: PractitionerId,
    pub name: String,
    /// `name_initials` from the listing, or the first character of the name.
    pub initials: String,
    pub photo: Option<String>,
    pub experience: String,
    pub fees: String,
    pub specialities: Vec<Speciality>,
    pub clinic: Option<Clinic>,
    pub languages: Vec<String>,
}

impl Practitioner {
    pub fn speciality_names(&self) -> impl Iterator<Item = &str> {
        self.specialities.iter().map(|speciality| speciality.name.as_str())
    }

    pub fn clinic_name(&self) -> Option<&str> {
        self.clinic
            .as_ref()
            .map(|clinic| clinic.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<ClinicRecord> for Clinic {
    fn from(value: ClinicRecord) -> Self {
        let address = value
            .address
            .map(|address| ClinicAddress {
                locality: address.locality.unwrap_or_default(),
                city: address.city.unwrap_or_default(),
            })
            .unwrap_or_default();
        Self {
            name: value.name.unwrap_or_default(),
            address,
        }
    }
}

impl From<PractitionerRecord> for Practitioner {
    fn from(value: PractitionerRecord) -> Self {
        let initials = non_blank(value.name_initials).unwrap_or_else(|| {
            value
                .name
                .chars()
                .next()
                .map(String::from)
                .unwrap_or_default()
        });

        Self {
            id: value.id.into(),
            initials,
            photo: non_blank(value.photo),
            experience: value.experience.unwrap_or_default(),
            fees: value.fees.unwrap_or_default(),
            specialities: value
                .specialities
                .unwrap_or_default()
                .into_iter()
                .map(|speciality| Speciality {
                    name: speciality.name,
                })
                .collect(),
            clinic: value.clinic.map(Clinic::from),
            languages: value.languages.unwrap_or_default(),
            name: value.name,
        }
    }
}
