//! Voice assistant names and the browser-facing token pair

use std::str::FromStr;

use serde::Serialize;

/// The voice assistants the landing page can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantName {
    Steve,
    Albert,
}

impl AssistantName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Steve => "steve",
            Self::Albert => "albert",
        }
    }
}

impl std::fmt::Display for AssistantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown assistant: {0}")]
pub struct UnknownAssistant(pub String);

impl FromStr for AssistantName {
    type Err = UnknownAssistant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "steve" => Ok(Self::Steve),
            "albert" => Ok(Self::Albert),
            _ => Err(UnknownAssistant(s.to_string())),
        }
    }
}

/// Public SDK key plus the assistant id it should connect to.
///
/// The key is a public browser key, not a scoped credential. It carries no
/// expiry and is resolved fresh on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantToken {
    #[serde(rename = "token")]
    pub public_key: String,
    pub assistant_id: String,
}
