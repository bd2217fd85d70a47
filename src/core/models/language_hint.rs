use serde::{Deserialize, Serialize};

use crate::global_constants;

/// Fixed pair of recognition languages, primary script first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageHint {
    pub primary: String,
    pub secondary: String,
}

impl Default for LanguageHint {
    fn default() -> Self {
        Self {
            primary: global_constants::DEFAULT_PRIMARY_LANGUAGE.to_string(),
            secondary: global_constants::DEFAULT_SECONDARY_LANGUAGE.to_string(),
        }
    }
}

impl LanguageHint {
    pub fn tesseract_code(&self) -> String {
        format!("{}+{}", self.primary, self.secondary)
    }
}
