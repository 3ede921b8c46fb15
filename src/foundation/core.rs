use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Timescale used by [`Time`] constructors that do not take an explicit one.
///
/// 600 divides evenly by the common video frame rates (24, 25, 30, 60).
pub const DEFAULT_TIMESCALE: i32 = 600;

/// An instant on the timeline's rational time axis.
///
/// `value / timescale` seconds, with `timescale > 0`. Comparisons and
/// arithmetic are exact (cross-multiplied in `i128`), never routed through
/// floating point, and carry no wall-clock coupling.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Time {
    /// Numerator in `timescale` units.
    pub value: i64,
    /// Units per second; must be > 0.
    pub timescale: i32,
}

impl Time {
    /// Zero on the default timescale.
    pub const ZERO: Time = Time {
        value: 0,
        timescale: DEFAULT_TIMESCALE,
    };

    /// Construct a validated time value.
    pub fn new(value: i64, timescale: i32) -> ReelResult<Self> {
        if timescale <= 0 {
            return Err(ReelError::validation("Time timescale must be > 0"));
        }
        Ok(Self { value, timescale })
    }

    /// Construct a time on the default timescale.
    pub fn from_value(value: i64) -> Self {
        Self {
            value,
            timescale: DEFAULT_TIMESCALE,
        }
    }

    /// Convert seconds to a time on the given timescale (rounded).
    pub fn from_seconds(seconds: f64, timescale: i32) -> ReelResult<Self> {
        if timescale <= 0 {
            return Err(ReelError::validation("Time timescale must be > 0"));
        }
        if !seconds.is_finite() {
            return Err(ReelError::validation("Time seconds must be finite"));
        }
        Ok(Self {
            value: (seconds * f64::from(timescale)).round() as i64,
            timescale,
        })
    }

    /// Value expressed in seconds.
    pub fn seconds(self) -> f64 {
        let t = self.sanitized();
        t.value as f64 / f64::from(t.timescale)
    }

    /// Whether the timescale invariant holds.
    pub fn is_valid(self) -> bool {
        self.timescale > 0
    }

    /// Collapse an invalid (non-positive timescale) value to zero.
    ///
    /// Decoding paths use this so malformed persisted values degrade instead
    /// of failing (never fatal).
    pub fn sanitized(self) -> Self {
        if self.is_valid() { self } else { Self::ZERO }
    }

    /// Re-express this time on another timescale (rounded).
    pub fn rescaled(self, timescale: i32) -> ReelResult<Self> {
        if timescale <= 0 {
            return Err(ReelError::validation("Time timescale must be > 0"));
        }
        let t = self.sanitized();
        let num = i128::from(t.value) * i128::from(timescale);
        let den = i128::from(t.timescale);
        let value = div_round(num, den).clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
        Ok(Self { value, timescale })
    }

    fn rational(self) -> (i128, i128) {
        let t = self.sanitized();
        (i128::from(t.value), i128::from(t.timescale))
    }

    fn combined(self, other: Time, negate_other: bool) -> Time {
        let a = self.sanitized();
        let mut b = other.sanitized();
        if negate_other {
            b.value = b.value.saturating_neg();
        }
        if a.timescale == b.timescale {
            return Time {
                value: a.value.saturating_add(b.value),
                timescale: a.timescale,
            };
        }
        let g = gcd(a.timescale, b.timescale);
        let common = i64::from(a.timescale / g) * i64::from(b.timescale);
        if let Ok(common) = i32::try_from(common) {
            let av = i128::from(a.value) * i128::from(common / a.timescale);
            let bv = i128::from(b.value) * i128::from(common / b.timescale);
            return Time {
                value: clamp_i64(av + bv),
                timescale: common,
            };
        }
        // Common timescale overflows i32: fall back to rounding into `a`'s.
        let bv = div_round(
            i128::from(b.value) * i128::from(a.timescale),
            i128::from(b.timescale),
        );
        Time {
            value: clamp_i64(i128::from(a.value) + bv),
            timescale: a.timescale,
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        let (av, ad) = self.rational();
        let (bv, bd) = other.rational();
        av * bd == bv * ad
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (av, ad) = self.rational();
        let (bv, bd) = other.rational();
        (av * bd).cmp(&(bv * ad))
    }
}

impl std::ops::Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        self.combined(rhs, false)
    }
}

impl std::ops::Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        self.combined(rhs, true)
    }
}

fn gcd(a: i32, b: i32) -> i32 {
    let (mut a, mut b) = (a.max(1), b.max(1));
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn div_round(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0);
    if num >= 0 {
        (num + den / 2) / den
    } else {
        (num - den / 2) / den
    }
}

fn clamp_i64(v: i128) -> i64 {
    v.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// A start + duration pair on the rational time axis.
///
/// Invariant: `duration >= 0`, enforced by [`TimeRange::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Range start.
    #[serde(default)]
    pub start: Time,
    /// Range length; never negative.
    #[serde(default)]
    pub duration: Time,
}

impl TimeRange {
    /// Empty range at time zero.
    pub const ZERO: TimeRange = TimeRange {
        start: Time::ZERO,
        duration: Time::ZERO,
    };

    /// Construct a validated range.
    pub fn new(start: Time, duration: Time) -> ReelResult<Self> {
        if duration < Time::ZERO {
            return Err(ReelError::validation("TimeRange duration must be >= 0"));
        }
        Ok(Self { start, duration })
    }

    /// Construct from start/end instants (`end >= start`).
    pub fn from_times(start: Time, end: Time) -> ReelResult<Self> {
        if end < start {
            return Err(ReelError::validation("TimeRange end must be >= start"));
        }
        Ok(Self {
            start,
            duration: end - start,
        })
    }

    /// Exclusive end instant.
    pub fn end(self) -> Time {
        self.start + self.duration
    }

    /// Whether the range has zero duration.
    pub fn is_empty(self) -> bool {
        self.duration == Time::ZERO
    }

    /// Whether `time` falls in `[start, end)`.
    pub fn contains(self, time: Time) -> bool {
        self.start <= time && time < self.end()
    }

    /// Whether `other` lies entirely inside this range.
    pub fn contains_range(self, other: TimeRange) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }

    /// Overlap of two ranges, if any.
    pub fn intersection(self, other: TimeRange) -> Option<TimeRange> {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        if end <= start {
            return None;
        }
        Some(TimeRange {
            start,
            duration: end - start,
        })
    }

    /// Collapse malformed decoded values to a well-formed range.
    pub fn sanitized(self) -> Self {
        let start = self.start.sanitized();
        let duration = self.duration.sanitized();
        if duration < Time::ZERO {
            return Self {
                start,
                duration: Time::ZERO,
            };
        }
        Self { start, duration }
    }
}

/// Destination raster dimensions handed to the visual compositor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl RenderSize {
    /// Construct a render size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The size as a [`Rect`] anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}
