//! Top navigation bar entries.
//!
//! Entry order is significant: the bar renders entries left-to-right in
//! declaration order, and dropdown children keep their declared order.

use serde::{Deserialize, Serialize};

/// A navigation bar entry: a direct link, or a labelled dropdown of
/// child entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavEntry {
    /// Label shown in the bar.
    pub text: String,
    /// Link target. Absent for pure dropdown entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Child entries of a dropdown.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavEntry>,
    /// Anchor target attribute, e.g. `_blank` for external documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl NavEntry {
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            items: Vec::new(),
            target: None,
        }
    }

    pub fn dropdown(text: impl Into<String>, items: Vec<NavEntry>) -> Self {
        Self {
            text: text.into(),
            link: None,
            items,
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn is_dropdown(&self) -> bool {
        !self.items.is_empty()
    }

    /// All leaf (text, link) pairs under this entry in declared order
    /// (depth-first). An entry that carries both a link and children
    /// contributes its own link first.
    pub fn flatten(&self) -> Vec<(&str, &str)> {
        let mut result = Vec::new();
        if let Some(ref link) = self.link {
            result.push((self.text.as_str(), link.as_str()));
        }
        for item in &self.items {
            result.extend(item.flatten());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preserves_order() {
        let entry = NavEntry::dropdown(
            "Development",
            vec![
                NavEntry::link("Build", "/build/"),
                NavEntry::link("Environment variables", "/env/"),
            ],
        );

        assert!(entry.is_dropdown());
        assert_eq!(
            entry.flatten(),
            vec![
                ("Build", "/build/"),
                ("Environment variables", "/env/"),
            ]
        );
    }

    #[test]
    fn test_dropdown_omits_link_field_on_wire() {
        let entry = NavEntry::dropdown("Development", vec![NavEntry::link("Build", "/build/")]);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"link\":null"));
        assert!(json.contains("\"items\""));

        let leaf = NavEntry::link("Home", "/");
        let json = serde_json::to_string(&leaf).unwrap();
        assert!(!json.contains("\"items\""));
        assert!(!json.contains("\"target\""));
    }

    #[test]
    fn test_target_round_trip() {
        let entry =
            NavEntry::link("Design", "/ApateDesignImplementation.pdf").with_target("_blank");
        let json = serde_json::to_string(&entry).unwrap();
        let back: NavEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.target.as_deref(), Some("_blank"));
    }
}
