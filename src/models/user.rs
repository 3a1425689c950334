use super::contact::ProfileRecord;

/// Avatar used when signing up without a picture.
pub const DEFAULT_AVATAR_URL: &str =
    "https://cdn.pixabay.com/photo/2017/11/10/05/48/user-2935527_1280.png";

/// The authenticated user of the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub display_name: String,
    pub avatar: Option<String>,
}

impl From<ProfileRecord> for SessionUser {
    fn from(record: ProfileRecord) -> Self {
        let display_name = match record.last_name.as_deref() {
            Some(last) if !last.trim().is_empty() => format!("{} {}", record.first_name, last),
            _ => record.first_name,
        };
        Self {
            id: record.id,
            display_name: display_name.trim().to_string(),
            avatar: record.profile_image,
        }
    }
}

/// Fields submitted to `POST /api/signup`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// Avatar URL; [`DEFAULT_AVATAR_URL`] when absent
    pub profile_image: Option<String>,
}

impl SignupForm {
    /// Form fields in the order the server expects them.
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("firstName".to_string(), self.first_name.clone()),
            ("lastName".to_string(), self.last_name.clone()),
            ("email".to_string(), self.email.clone()),
            ("password".to_string(), self.password.clone()),
            (
                "profileImage".to_string(),
                self.profile_image
                    .clone()
                    .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
            ),
        ]
    }

    /// Returns the name of the first missing required field.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.first_name.trim().is_empty() {
            Some("first name")
        } else if self.email.trim().is_empty() {
            Some("email")
        } else if self.password.is_empty() {
            Some("password")
        } else {
            None
        }
    }
}
