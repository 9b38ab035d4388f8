use std::fmt;
use std::str::FromStr;

/// What happens when a player scans a code they already hold.
///
/// `Reaward` matches the historical behaviour: every scan awards the
/// code's score again and every detach deducts it. `Ignore` awards and
/// deducts only on actual membership changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateScanPolicy {
    #[default]
    Reaward,
    Ignore,
}

impl FromStr for DuplicateScanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reaward" => Ok(Self::Reaward),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!(
                "unknown duplicate scan policy '{other}' (expected 'reaward' or 'ignore')"
            )),
        }
    }
}

impl fmt::Display for DuplicateScanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reaward => f.write_str("reaward"),
            Self::Ignore => f.write_str("ignore"),
        }
    }
}
