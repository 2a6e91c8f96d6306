//! Onboarding profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::ValidationError;

/// Answers collected during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    /// Default focus for take-action events
    pub primary_focus: Category,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(name: &str, primary_focus: Category) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name".to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            weight: None,
            height: None,
            primary_focus,
            created_at: Utc::now(),
        })
    }

    pub fn with_measurements(mut self, weight: Option<String>, height: Option<String>) -> Self {
        self.weight = weight.filter(|w| !w.trim().is_empty());
        self.height = height.filter(|h| !h.trim().is_empty());
        self
    }
}
