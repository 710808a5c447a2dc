//! Wire types for the gym API.

use serde::{Deserialize, Deserializer, Serialize};

/// Accepts ids sent either as JSON numbers or strings.
fn id_from_str_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Int(i64),
        Str(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Int(n) => n.to_string(),
        Id::Str(s) => s,
    })
}

/// The authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "id_from_str_or_int")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Avatar file name or URL, if the user uploaded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// True when every required attribute is populated.
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /sessions`.
#[derive(Debug, Deserialize)]
pub(crate) struct SignInResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateUserRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `PUT /users`. Password fields are omitted unless changing it.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateProfileRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AvatarResponse {
    #[serde(default)]
    pub avatar: Option<String>,
}

/// One exercise in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Exercise {
    #[serde(deserialize_with = "id_from_str_or_int")]
    pub id: String,
    pub name: String,
    pub group: String,
    #[serde(default)]
    pub series: u32,
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
}

/// One logged exercise in the history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryEntry {
    #[serde(deserialize_with = "id_from_str_or_int")]
    pub id: String,
    pub name: String,
    pub group: String,
    #[serde(default)]
    pub hour: String,
    #[serde(default)]
    pub created_at: String,
}

/// History section: all entries logged on one day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryDay {
    /// Day label as sent by the server (e.g. "22.07.24").
    pub title: String,
    pub data: Vec<HistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_accepts_number() {
        let user: User =
            serde_json::from_str(r#"{"id":7,"name":"Ana","email":"ana@gym.com"}"#).unwrap();
        assert_eq!(user.id, "7");
        assert_eq!(user.avatar, None);
        assert!(user.is_complete());
    }

    #[test]
    fn test_user_missing_email_is_rejected() {
        let result = serde_json::from_str::<User>(r#"{"id":"1","name":"Ana"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_user_blank_name_is_incomplete() {
        let user = User {
            id: "1".into(),
            name: " ".into(),
            email: "a@b.com".into(),
            avatar: None,
        };
        assert!(!user.is_complete());
    }

    #[test]
    fn test_update_profile_omits_absent_passwords() {
        let body = serde_json::to_value(UpdateProfileRequest {
            name: "Ana",
            old_password: None,
            password: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "name": "Ana" }));
    }

    #[test]
    fn test_history_day_decodes() {
        let days: Vec<HistoryDay> = serde_json::from_str(
            r#"[{"title":"22.07.24","data":[{"id":1,"name":"Front pulldown","group":"back","hour":"08:10","created_at":"2024-07-22 08:10:00"}]}]"#,
        )
        .unwrap();
        assert_eq!(days[0].data[0].id, "1");
        assert_eq!(days[0].data[0].hour, "08:10");
    }
}
