//! Host configuration for the serializer

use serde::{Deserialize, Serialize};

use crate::Result;

/// Options for [`VisibleTextSerializer`](crate::VisibleTextSerializer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SerializerOptions {
    /// Consult `white-space` styles. When disabled every node keeps the
    /// mode it inherits.
    pub css_enabled: bool,

    /// Whether the hosting engine runs scripts. `<noscript>` content is
    /// only visible when this is off.
    pub javascript_enabled: bool,

    /// Deepest nesting accepted before serialization fails with
    /// [`VisibleTextError::TreeTooDeep`](crate::VisibleTextError::TreeTooDeep)
    pub max_depth: usize,
}

impl SerializerOptions {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            css_enabled: true,
            javascript_enabled: true,
            max_depth: 512,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SerializerOptions::default();
        assert!(options.css_enabled);
        assert!(options.javascript_enabled);
        assert_eq!(options.max_depth, 512);
    }

    #[test]
    fn test_from_json_partial() {
        let options = SerializerOptions::from_json(r#"{"javascriptEnabled": false}"#).unwrap();
        assert!(!options.javascript_enabled);
        assert!(options.css_enabled);
        assert_eq!(options.max_depth, 512);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = SerializerOptions::from_json(r#"{"maxDepth": "deep"}"#).unwrap_err();
        assert!(matches!(err, crate::VisibleTextError::Config(_)));
    }
}
