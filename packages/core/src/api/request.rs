// Входные данные пользовательских действий

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Encrypt => f.write_str("encrypt"),
            Action::Decrypt => f.write_str("decrypt"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encrypt" => Ok(Action::Encrypt),
            "decrypt" => Ok(Action::Decrypt),
            other => Err(format!("Unknown action: {}", other)),
        }
    }
}

/// Raw, unvalidated key material exactly as the user supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMaterial {
    /// Block cipher key, classical keyword, or Rail Fence rail count.
    Secret(String),
    Rsa {
        n: String,
        e: String,
        d: Option<String>,
    },
    Ecies {
        public: Option<String>,
        private: Option<String>,
    },
}

impl KeyMaterial {
    pub fn secret(key: impl Into<String>) -> Self {
        KeyMaterial::Secret(key.into())
    }

    pub fn rsa(n: impl Into<String>, e: impl Into<String>, d: Option<String>) -> Self {
        KeyMaterial::Rsa {
            n: n.into(),
            e: e.into(),
            d,
        }
    }

    pub fn ecies_public(point: impl Into<String>) -> Self {
        KeyMaterial::Ecies {
            public: Some(point.into()),
            private: None,
        }
    }

    pub fn ecies_private(scalar: impl Into<String>) -> Self {
        KeyMaterial::Ecies {
            public: None,
            private: Some(scalar.into()),
        }
    }
}
