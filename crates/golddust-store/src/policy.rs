//! Retry bounds for conditional writes.

use serde::{Deserialize, Serialize};

/// How hard a manager tries before giving up on a contended record.
///
/// Each attempt is one fresh read plus one conditional write. Losing
/// every attempt surfaces as [`StoreError::Contention`](crate::StoreError::Contention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WritePolicy {
    /// Maximum read-then-write attempts per operation. Values below 1
    /// are treated as 1.
    pub max_attempts: u32,
}

impl WritePolicy {
    /// Effective attempt count (never zero).
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self { max_attempts: 8 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_policy_default() {
        assert_eq!(WritePolicy::default().attempts(), 8);
    }

    #[test]
    fn test_write_policy_zero_means_one_attempt() {
        let policy = WritePolicy { max_attempts: 0 };
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn test_write_policy_deserialize_missing_field_uses_default() {
        let policy: WritePolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, WritePolicy::default());
    }
}
