use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMetadata {
    pub team_name: String,
    pub description: String,
}

impl Default for RosterMetadata {
    fn default() -> Self {
        Self {
            team_name: "New Team".to_string(),
            description: "No description".to_string(),
        }
    }
}
