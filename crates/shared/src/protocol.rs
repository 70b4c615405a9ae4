//! Wire schema of the remote practitioner listing.
//!
//! Every field except `id` and `name` is optional on the wire; defaults are
//! substituted when a record is converted into [`crate::domain::Practitioner`].

use serde::{Deserialize, Serialize};

use crate::domain::PractitionerId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for PractitionerId {
    fn from(value: WireId) -> Self {
        match value {
            WireId::Text(text) => PractitionerId(text),
            WireId::Number(number) => PractitionerId(number.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PractitionerRecord {
    pub id: WireId,
    pub name: String,
    #[serde(default)]
    pub name_initials: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub fees: Option<String>,
    #[serde(default)]
    pub specialities: Option<Vec<SpecialityRecord>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub clinic: Option<ClinicRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialityRecord {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<AddressRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Parses a listing body into wire records.
pub fn decode_listing(body: &[u8]) -> Result<Vec<PractitionerRecord>, serde_json::Error> {
    serde_json::from_slice(body)
}
