use serde::{Deserialize, Serialize};

/// WeChat Open Platform AppID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Missing appId parameter.".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform deep-link identifier the app registers with WeChat
/// (the iOS universal link).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkIdentifier(String);

impl LinkIdentifier {
    /// Returns `None` for an empty identifier so callers can treat
    /// "absent" and "blank" the same way.
    pub fn new(link: impl Into<String>) -> Option<Self> {
        let link = link.into();
        if link.trim().is_empty() {
            None
        } else {
            Some(Self(link))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
