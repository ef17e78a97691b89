//! Time coordinates for sampled metrics.
//!
//! All series in a snapshot share one sampling grid, described by a
//! [`Context`]. Instants are epoch seconds aligned to that grid.

/// A grid-aligned instant, in seconds since the Unix epoch.
///
/// This wrapper keeps time coordinates distinct from other integer
/// quantities in signatures and serializes transparently as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Time(pub i64);

impl Time {
    /// Create from epoch seconds.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Get the value in epoch seconds.
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// Align down to a sampling grid with the given step.
    ///
    /// A zero step leaves the instant unchanged.
    pub const fn truncate(self, step: u64) -> Self {
        if step == 0 {
            return self;
        }
        let step = step as i64;
        Self(self.0 - self.0.rem_euclid(step))
    }
}

impl From<i64> for Time {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

/// A sampling window and step.
///
/// Describes the grid every series in one snapshot is aligned to:
/// samples at `from`, `from + step`, ..., up to and including `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Context {
    /// First instant of the window.
    pub from: Time,
    /// Last instant of the window.
    pub to: Time,
    /// Grid step in seconds.
    pub step: u64,
}

impl Context {
    /// Create a context, aligning both ends down to the step grid.
    pub fn new(from: Time, to: Time, step: u64) -> Self {
        Self {
            from: from.truncate(step),
            to: to.truncate(step),
            step,
        }
    }

    /// Number of grid points in the window.
    ///
    /// Zero for an empty or inverted window, or a zero step.
    pub fn points(&self) -> usize {
        if self.step == 0 || self.to < self.from {
            return 0;
        }
        ((self.to.as_secs() - self.from.as_secs()) as u64 / self.step + 1) as usize
    }

    /// Instant of the grid point at `index`.
    pub fn time_at(&self, index: usize) -> Time {
        Time(self.from.as_secs() + (index as u64 * self.step) as i64)
    }
}
