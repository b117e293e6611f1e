use serde::{Deserialize, Serialize};
use std::fmt;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Identifies one webview instance in logs and events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebviewId(String);

impl WebviewId {
    pub fn new() -> Self {
        Self(new_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WebviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WebviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_valid_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn webview_ids_are_unique() {
        assert_ne!(WebviewId::new(), WebviewId::new());
    }

    #[test]
    fn webview_id_display_matches_str() {
        let id = WebviewId::default();
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn webview_id_serialization() {
        let id = WebviewId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: WebviewId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
