//! Loader instance identifier.
//!
//! ULID なので生成時刻でソート可能。同一ページ上の複数ローダーをログで区別するために使います。

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::ports::Clock;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoaderId(Ulid);

impl LoaderId {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// Timestamp part from `clock`, random part from the thread RNG, so a
    /// manual clock gives ids with a predictable timestamp.
    pub fn generate<C: Clock + ?Sized>(clock: &C) -> Self {
        let timestamp_ms = clock.now().timestamp_millis().max(0) as u64;
        Self(Ulid::from_parts(timestamp_ms, rand::random()))
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl fmt::Display for LoaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "loader-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn ids_from_same_instant_share_timestamp_but_differ() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::new(at);

        let a = LoaderId::generate(&clock);
        let b = LoaderId::generate(&clock);

        assert_ne!(a, b);
        assert_eq!(a.as_ulid().timestamp_ms(), at.timestamp_millis() as u64);
        assert_eq!(b.as_ulid().timestamp_ms(), at.timestamp_millis() as u64);
    }

    #[test]
    fn display_has_prefix() {
        let id = LoaderId::from_ulid(Ulid::new());
        assert!(id.to_string().starts_with("loader-"));
    }

    #[test]
    fn ids_serialize_as_ulid_strings() {
        let id = LoaderId::from_ulid(Ulid::new());
        let json = serde_json::to_string(&id).unwrap();
        let back: LoaderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
