//! Simulated sign-in
//!
//! There is no account system: every login succeeds as the demo reader.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn demo() -> Self {
        Self {
            name: "Alex Doe".to_string(),
            email: "alex.doe@example.com".to_string(),
        }
    }
}

/// Login form contents. Accepted as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub fn login(credentials: &Credentials) -> User {
    tracing::info!(email = %credentials.email, "simulated login");
    User::demo()
}
