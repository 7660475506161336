//! Attempt budget: how many guesses a round allows before it is lost.

use serde::{Serialize, Serializer};

/// Maximum number of guesses for a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaxAttempts {
  Unbounded,
  Limited(u32),
}

/// Serialized as `null` (unbounded) or a number, which is what the board displays.
impl Serialize for MaxAttempts {
  fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
    match self {
      MaxAttempts::Unbounded => s.serialize_none(),
      MaxAttempts::Limited(n) => s.serialize_some(n),
    }
  }
}

/// Resolve the configured setting against the number of options in the round.
///
/// - `None`   → unbounded
/// - `0`      → one guess (sudden death)
/// - `n > 0`  → `n` guesses
/// - `n < 0`  → `total_options + n` guesses, never fewer than one
pub fn max_attempts(configured: Option<i32>, total_options: usize) -> MaxAttempts {
  match configured {
    None => MaxAttempts::Unbounded,
    Some(0) => MaxAttempts::Limited(1),
    Some(n) if n > 0 => MaxAttempts::Limited(n as u32),
    Some(n) => {
      let total = i64::try_from(total_options).unwrap_or(i64::MAX);
      let max = total.saturating_add(i64::from(n)).max(1);
      MaxAttempts::Limited(u32::try_from(max).unwrap_or(u32::MAX))
    }
  }
}

/// True once `used` (counting the guess just made) reaches a bounded maximum.
pub fn is_exhausted(used: u32, max: MaxAttempts) -> bool {
  match max {
    MaxAttempts::Unbounded => false,
    MaxAttempts::Limited(m) => used >= m,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_each_setting_kind() {
    assert_eq!(max_attempts(None, 4), MaxAttempts::Unbounded);
    assert_eq!(max_attempts(Some(0), 4), MaxAttempts::Limited(1));
    assert_eq!(max_attempts(Some(3), 4), MaxAttempts::Limited(3));
    assert_eq!(max_attempts(Some(-2), 4), MaxAttempts::Limited(2));
  }

  #[test]
  fn negative_setting_is_floored_at_one() {
    assert_eq!(max_attempts(Some(-10), 4), MaxAttempts::Limited(1));
    assert_eq!(max_attempts(Some(-4), 4), MaxAttempts::Limited(1));
    assert_eq!(max_attempts(Some(i32::MIN), 0), MaxAttempts::Limited(1));
  }

  #[test]
  fn positive_setting_ignores_option_count() {
    assert_eq!(max_attempts(Some(20), 4), MaxAttempts::Limited(20));
  }

  #[test]
  fn exhaustion() {
    assert!(!is_exhausted(1_000, MaxAttempts::Unbounded));
    assert!(!is_exhausted(1, MaxAttempts::Limited(2)));
    assert!(is_exhausted(2, MaxAttempts::Limited(2)));
    assert!(is_exhausted(3, MaxAttempts::Limited(2)));
  }

  #[test]
  fn serializes_as_nullable_number() {
    assert_eq!(serde_json::to_string(&MaxAttempts::Unbounded).unwrap(), "null");
    assert_eq!(serde_json::to_string(&MaxAttempts::Limited(3)).unwrap(), "3");
  }
}
