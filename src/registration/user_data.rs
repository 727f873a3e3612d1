//! Per-user preferences and linked credentials, seeded at signup

use serde::{Deserialize, Serialize};

pub const DEFAULT_AI_MODEL: &str = "gpt4omini";
pub const DEFAULT_PRIORITIES: [&str; 3] = ["Low", "Medium", "High"];
pub const DEFAULT_LABELS: [&str; 3] = ["Personal", "Work", "Shopping"];
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Primary", "Social", "Promotions", "Updates", "Forums"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserData {
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    pub ai: AiPreferences,
    pub inbox: InboxPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiPreferences {
    pub model: String,
    pub custom_rules: Vec<String>,
    pub self_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InboxPreferences {
    pub priority: Vec<String>,
    pub priority_rules: Vec<String>,
    pub labels: Vec<String>,
    pub label_rules: Vec<String>,
    pub categories: Vec<String>,
    pub category_rules: Vec<String>,
    pub spam_words: Vec<String>,
    pub spam_rules: Vec<String>,
    pub unsubscribe_words: Vec<String>,
    pub unsubscribe_rules: Vec<String>,
}

/// External accounts linked to the user. Nothing is linked at signup.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserCredentials {
    pub google_oauth: Option<OAuthCredentials>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct OAuthCredentials {
    pub access_token: String,
    pub refresh_token: String,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for AiPreferences {
    fn default() -> Self {
        Self {
            model: DEFAULT_AI_MODEL.to_string(),
            custom_rules: Vec::new(),
            self_description: String::new(),
        }
    }
}

impl Default for InboxPreferences {
    fn default() -> Self {
        Self {
            priority: owned(&DEFAULT_PRIORITIES),
            priority_rules: Vec::new(),
            labels: owned(&DEFAULT_LABELS),
            label_rules: Vec::new(),
            categories: owned(&DEFAULT_CATEGORIES),
            category_rules: Vec::new(),
            spam_words: Vec::new(),
            spam_rules: Vec::new(),
            unsubscribe_words: Vec::new(),
            unsubscribe_rules: Vec::new(),
        }
    }
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("google_oauth", &self.google_oauth.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
