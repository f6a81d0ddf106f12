//! WaitlistEntry entity - One landing page signup
//!
//! Entries are created once per form submission and never mutated. Once
//! inserted they belong to the datastore.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::SignupId;

/// Who is signing up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistRole {
    Learner,
    Parent,
    School,
    Partner,
    Other,
}

impl WaitlistRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learner => "learner",
            Self::Parent => "parent",
            Self::School => "school",
            Self::Partner => "partner",
            Self::Other => "other",
        }
    }

    /// Label shown in the welcome email
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Learner => "Öğrenci (Genç / Yetişkin)",
            Self::Parent => "Ebeveyn",
            Self::School => "Okul / Eğitimci",
            Self::Partner => "Potansiyel Partner",
            Self::Other => "Diğer",
        }
    }
}

impl std::fmt::Display for WaitlistRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaitlistRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "learner" => Ok(Self::Learner),
            "parent" => Ok(Self::Parent),
            "school" => Ok(Self::School),
            "partner" => Ok(Self::Partner),
            "other" => Ok(Self::Other),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// A recorded waitlist signup
#[derive(Debug, Clone, PartialEq)]
pub struct WaitlistEntry {
    pub id: SignupId,
    pub name: String,
    pub email: String,
    pub role: WaitlistRole,
    pub message: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: WaitlistRole,
        message: Option<String>,
    ) -> Self {
        Self {
            id: SignupId::new(),
            name: name.into(),
            email: email.into(),
            role,
            message,
            submitted_at: Utc::now(),
        }
    }
}
