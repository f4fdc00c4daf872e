use serde::{Deserialize, Serialize};

/// Contact person for a client (parent, guardian, caseworker).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPerson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefonnummer", default)]
    pub phone: Option<String>,
}

/// A client of the practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "geburtsdatum", default)]
    pub birth_date: String,

    #[serde(rename = "adresse", default)]
    pub address: Option<String>,

    #[serde(rename = "telefonnummer", default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(rename = "kontaktperson", default)]
    pub contact_person: Option<ContactPerson>,

    /// Names of the commissioning parties funding this client
    #[serde(rename = "auftraggeberNamen", default)]
    pub commissioning_party_names: Vec<String>,
}

impl Client {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_date: String::new(),
            address: None,
            phone: None,
            email: None,
            contact_person: None,
            commissioning_party_names: Vec::new(),
        }
    }
}
