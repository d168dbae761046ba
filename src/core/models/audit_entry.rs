use serde::{Deserialize, Serialize};

/// Actions that get recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Init,
    Set,
    Read,
    Remove,
    KeyResolve,
    Encrypt,
    Decrypt,
    Protect,
    Clipboard,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Set => "set",
            Self::Read => "read",
            Self::Remove => "remove",
            Self::KeyResolve => "key_resolve",
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
            Self::Protect => "protect",
            Self::Clipboard => "clipboard",
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let all = [
            Self::Init,
            Self::Set,
            Self::Read,
            Self::Remove,
            Self::KeyResolve,
            Self::Encrypt,
            Self::Decrypt,
            Self::Protect,
            Self::Clipboard,
        ];
        all.into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown audit action '{s}'"))
    }
}

/// Whether the audited operation went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Success,
    Failure,
}

/// A single entry in the audit log (JSON lines format).
///
/// Never carries secret values, only the item names involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub author: String,
    pub action: AuditAction,
    pub outcome: AuditOutcome,
    pub items: Vec<String>,
    pub detail: Option<String>,
}
