use std::str::FromStr;

/// At-rest protection applied to a file written by `secure_save`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtectionLevel {
    /// Plain file with default permissions.
    None,
    /// Plain file readable and writable by the owner only.
    OwnerOnly,
    /// Encrypted to the local identity, owner-only permissions.
    #[default]
    Complete,
}

impl ProtectionLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OwnerOnly => "owner-only",
            Self::Complete => "complete",
        }
    }
}

impl FromStr for ProtectionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "owner-only" => Ok(Self::OwnerOnly),
            "complete" => Ok(Self::Complete),
            other => Err(format!(
                "unknown protection level '{other}' (expected none, owner-only or complete)"
            )),
        }
    }
}

impl std::fmt::Display for ProtectionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_levels() {
        assert_eq!("none".parse(), Ok(ProtectionLevel::None));
        assert_eq!("owner-only".parse(), Ok(ProtectionLevel::OwnerOnly));
        assert_eq!("complete".parse(), Ok(ProtectionLevel::Complete));
    }

    #[test]
    fn parse_unknown_level_fails() {
        assert!("locked".parse::<ProtectionLevel>().is_err());
    }
}
