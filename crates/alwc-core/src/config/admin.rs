//! Primary admin configuration.

use serde::{Deserialize, Serialize};

/// The single primary admin identity.
///
/// `email` pins which account can never be demoted or deleted and is the
/// only identity allowed through the primary-admin guard. `password`, when
/// set, is used to (re)create that account on startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: None,
            password: None,
            name: default_name(),
        }
    }
}

fn default_name() -> String {
    "Admin".to_string()
}
