//! Remote push filtering

use std::fmt;
use std::str::FromStr;

/// Which `receive_message` pushes are applied to the open thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemotePolicy {
    /// Apply a push only when its peer is the selected contact; count the
    /// rest as unread.
    #[default]
    ActiveContactOnly,
    /// Apply every push to whatever thread is open.
    AcceptAll,
}

impl RemotePolicy {
    /// Whether a push exchanged with `peer_id` belongs in the thread of
    /// `selected_id`.
    pub fn accepts(&self, peer_id: &str, selected_id: &str) -> bool {
        match self {
            RemotePolicy::ActiveContactOnly => peer_id == selected_id,
            RemotePolicy::AcceptAll => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RemotePolicy::ActiveContactOnly => "active",
            RemotePolicy::AcceptAll => "all",
        }
    }
}

impl FromStr for RemotePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(RemotePolicy::ActiveContactOnly),
            "all" => Ok(RemotePolicy::AcceptAll),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for RemotePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_active_contact_only() {
        assert_eq!(RemotePolicy::default(), RemotePolicy::ActiveContactOnly);
    }

    #[test]
    fn test_accepts() {
        assert!(RemotePolicy::ActiveContactOnly.accepts("alice", "alice"));
        assert!(!RemotePolicy::ActiveContactOnly.accepts("bob", "alice"));
        assert!(RemotePolicy::AcceptAll.accepts("bob", "alice"));
    }

    #[test]
    fn test_parse() {
        assert_eq!("active".parse(), Ok(RemotePolicy::ActiveContactOnly));
        assert_eq!(" ALL ".parse(), Ok(RemotePolicy::AcceptAll));
        assert!("some".parse::<RemotePolicy>().is_err());
    }
}
