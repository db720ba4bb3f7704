//! Labels.

use serde::{Deserialize, Serialize};

/// A label as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    /// Label name; matched case-sensitively across repositories.
    pub name: String,

    /// Hex color without the leading `#`.
    pub color: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for `POST /labels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLabel {
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Label> for NewLabel {
    fn from(source: &Label) -> Self {
        Self {
            name: source.name.clone(),
            color: source.color.clone(),
            description: source.description.clone(),
        }
    }
}
