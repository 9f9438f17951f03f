use serde::{Deserialize, Serialize};

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body for `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
}

/// Request body for `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response body for `POST /register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub user_id: String,
}

/// Profile as returned by `GET /users/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
}

impl UserProfile {
    /// Whether this account may see the admin panel.
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"token":"eyJhbGciOi.header.sig","user_id":"6651f2"}"#;
        let resp: LoginResponse = serde_json::from_str(json).expect("Failed to parse login JSON");
        assert_eq!(resp.token, "eyJhbGciOi.header.sig");
        assert_eq!(resp.user_id, "6651f2");
    }

    #[test]
    fn test_admin_role() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"username":"dana","role":"admin"}"#).unwrap();
        assert!(profile.is_admin());

        let profile: UserProfile = serde_json::from_str(r#"{"username":"sam"}"#).unwrap();
        assert!(!profile.is_admin());
    }
}
