use serde::{Deserialize, Serialize};

/// User record as returned by the profile and contacts endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Body of `GET /chat/contacts/{user}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactsResponse {
    #[serde(default)]
    pub contacts: Vec<ProfileRecord>,
}

/// A person the session user can chat with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: String,
    pub display_name: String,
    pub avatar: Option<String>,
}

impl From<ProfileRecord> for Contact {
    fn from(record: ProfileRecord) -> Self {
        // The sidebar only ever showed first names
        let display_name = if record.first_name.trim().is_empty() {
            record.id.clone()
        } else {
            record.first_name
        };
        Self {
            id: record.id,
            display_name,
            avatar: record.profile_image,
        }
    }
}
