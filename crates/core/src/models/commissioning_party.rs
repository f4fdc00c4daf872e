use serde::{Deserialize, Serialize};

/// An institution that commissions and pays for therapy (Auftraggeber).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissioningParty {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub institution: String,

    /// Role of the contact at the institution
    #[serde(rename = "funktion", default)]
    pub function: String,

    #[serde(rename = "adresse", default)]
    pub address: String,

    #[serde(rename = "telefonnummer", default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: String,
}

impl CommissioningParty {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        institution: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            institution: institution.into(),
            function: String::new(),
            address: String::new(),
            phone: None,
            email: String::new(),
        }
    }
}
