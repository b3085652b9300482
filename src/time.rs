//! Conversion of the various ways to express "a point in time" into Unix seconds
//!
//! [UnixTime](trait.UnixTime.html) is implemented for raw second counts, [SystemTime] and
//! `Option` of any of those, `None` standing for a time that was never set.

use std::time::{SystemTime, UNIX_EPOCH};

/// A point in time that can be expressed as whole seconds since the Unix epoch.
///
/// Values are signed so that instants before the epoch stay representable and can be rejected
/// by the caller instead of wrapping around. Sub-second precision is dropped, rounding towards
/// negative infinity.
pub trait UnixTime {
    fn unix_seconds(&self) -> i128;
}

impl UnixTime for i64 {
    fn unix_seconds(&self) -> i128 {
        i128::from(*self)
    }
}

impl UnixTime for u64 {
    fn unix_seconds(&self) -> i128 {
        i128::from(*self)
    }
}

impl UnixTime for SystemTime {
    fn unix_seconds(&self) -> i128 {
        match self.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i128::from(elapsed.as_secs()),
            Err(e) => {
                let before = e.duration();
                let secs = i128::from(before.as_secs());
                if before.subsec_nanos() > 0 {
                    -secs - 1
                } else {
                    -secs
                }
            }
        }
    }
}

impl<T: UnixTime> UnixTime for Option<T> {
    fn unix_seconds(&self) -> i128 {
        self.as_ref().map_or(0, |t| t.unix_seconds())
    }
}

impl<T: UnixTime + ?Sized> UnixTime for &T {
    fn unix_seconds(&self) -> i128 {
        (**self).unix_seconds()
    }
}
