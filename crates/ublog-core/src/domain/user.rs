use serde::Deserialize;

/// User identity as reported by the identity provider's user-info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    /// Name to show in the page header; falls back to the login.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_login() {
        let user: User = serde_json::from_str(r#"{"login":"octocat","id":1}"#).unwrap();
        assert_eq!(user.display_name(), "octocat");

        let named = User {
            name: Some("The Octocat".to_string()),
            ..user
        };
        assert_eq!(named.display_name(), "The Octocat");
    }
}
