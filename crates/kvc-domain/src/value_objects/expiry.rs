//! Key expiry

use crate::constants::{MAX_EXPIRY_MILLIS, MIN_EXPIRY_MILLIS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retention applied to a key at write time
///
/// `Persistent` leaves retention to the store's defaults (for Redis: no
/// expiry). Zero durations and non-positive second counts collapse to
/// `Persistent`, so an `Expiry` that reports a duration always reports a
/// positive one. Durations beyond [`MAX_EXPIRY_MILLIS`] are reported clamped
/// to it, so every provider applies the same longest expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Expiry {
    /// No explicit expiry
    #[default]
    Persistent,
    /// Expire after the given duration
    After(Duration),
}

impl Expiry {
    /// Expire after `duration`; a zero duration means no expiry
    pub fn after(duration: Duration) -> Self {
        if duration.is_zero() {
            Self::Persistent
        } else {
            Self::After(duration)
        }
    }

    /// Expire after `secs` seconds
    pub fn from_secs(secs: u64) -> Self {
        Self::after(Duration::from_secs(secs))
    }

    /// Signed variant: zero or negative means no expiry
    pub fn from_secs_i64(secs: i64) -> Self {
        u64::try_from(secs).map_or(Self::Persistent, Self::from_secs)
    }

    /// The positive duration, if any, clamped to the longest supported expiry
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::After(d) if !d.is_zero() => {
                Some((*d).min(Duration::from_millis(MAX_EXPIRY_MILLIS)))
            }
            _ => None,
        }
    }

    /// True when no explicit expiry will be set
    pub fn is_persistent(&self) -> bool {
        self.duration().is_none()
    }

    /// Milliseconds for the store, rounded up to the store's granularity
    pub fn as_millis(&self) -> Option<u64> {
        self.duration().map(|d| {
            u64::try_from(d.as_millis())
                .unwrap_or(MAX_EXPIRY_MILLIS)
                .clamp(MIN_EXPIRY_MILLIS, MAX_EXPIRY_MILLIS)
        })
    }
}

impl From<Duration> for Expiry {
    fn from(duration: Duration) -> Self {
        Self::after(duration)
    }
}

impl From<Option<Duration>> for Expiry {
    fn from(duration: Option<Duration>) -> Self {
        duration.map_or(Self::Persistent, Self::after)
    }
}
