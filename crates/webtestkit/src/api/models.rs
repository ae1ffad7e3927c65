// Wire models for the authentication endpoint

use serde::{Deserialize, Serialize};

/// Body of `POST /api/authaccount/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Login response envelope: `{"Data": {"Token": "..."}}`.
///
/// Field matching is tolerant of casing, mirroring the case-insensitive
/// deserialization the API's other clients use.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticationResponse {
    #[serde(default, alias = "Data")]
    pub data: Option<AuthData>,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    #[serde(default, alias = "Token")]
    pub token: Option<String>,
}

impl AuthenticationResponse {
    /// The token, when present and non-blank.
    pub fn token(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.token.as_deref())
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_serializes_with_pascal_case_fields() {
        let body = serde_json::to_value(LoginRequest {
            email: "user@test.com".into(),
            password: "pw".into(),
        })
        .unwrap();
        assert_eq!(body["Email"], "user@test.com");
        assert_eq!(body["Password"], "pw");
    }

    #[test]
    fn token_is_extracted_from_the_envelope() {
        let response: AuthenticationResponse =
            serde_json::from_str(r#"{"Data":{"Token":"abc123"}}"#).unwrap();
        assert_eq!(response.token(), Some("abc123"));
    }

    #[test]
    fn lowercase_fields_also_deserialize() {
        let response: AuthenticationResponse =
            serde_json::from_str(r#"{"data":{"token":"abc123"}}"#).unwrap();
        assert_eq!(response.token(), Some("abc123"));
    }

    #[test]
    fn blank_or_missing_tokens_are_treated_as_absent() {
        for body in [
            r#"{}"#,
            r#"{"Data":{}}"#,
            r#"{"Data":{"Token":""}}"#,
            r#"{"Data":{"Token":"   "}}"#,
        ] {
            let response: AuthenticationResponse = serde_json::from_str(body).unwrap();
            assert_eq!(response.token(), None, "body: {body}");
        }
    }
}
