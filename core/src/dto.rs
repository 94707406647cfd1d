use serde::{Deserialize, Serialize};

/// Body of every non-2xx response of the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    /// The most specific text available.
    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.error)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewExample {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
