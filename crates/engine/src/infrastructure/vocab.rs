//! Vocabulary template adapter.

use caravan_domain::Vocabulary;

/// Formats the multi-member party name from a `{}` placeholder template.
#[derive(Debug, Clone)]
pub struct TemplateVocabulary {
    party_name: String,
}

impl TemplateVocabulary {
    pub fn new(party_name: impl Into<String>) -> Self {
        Self {
            party_name: party_name.into(),
        }
    }
}

impl Default for TemplateVocabulary {
    fn default() -> Self {
        Self::new("{}'s Party")
    }
}

impl Vocabulary for TemplateVocabulary {
    fn party_name(&self, leader: &str) -> String {
        self.party_name.replacen("{}", leader, 1)
    }
}
