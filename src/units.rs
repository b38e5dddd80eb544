//! Dimensioned scalar newtypes.
//!
//! Every physical quantity the dispatch core touches — distance, duration, speed,
//! volume — is wrapped in its own type rather than passed around as a bare `f64`, so a
//! distance can never be silently added to a duration. Conversions that cross units
//! (`Distance / Duration -> Speed`) are expressed as explicit operator impls instead of
//! free functions.

use std::ops::{Add, Div, Mul, Sub};

macro_rules! scalar_newtype {
    ($name:ident, $unit:literal) => {
        #[doc = concat!("A quantity of ", $unit, ".")]
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
        pub struct $name(pub f64);

        impl $name {
            pub const ZERO: $name = $name(0.0);

            #[must_use]
            pub fn metres_or_native(self) -> f64 {
                self.0
            }

            #[must_use]
            pub fn max(self, other: Self) -> Self {
                $name(self.0.max(other.0))
            }

            #[must_use]
            pub fn min(self, other: Self) -> Self {
                $name(self.0.min(other.0))
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: Self) -> Self::Output {
                $name(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: Self) -> Self::Output {
                $name(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> Self::Output {
                $name(self.0 * rhs)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.3}{}", self.0, $unit)
            }
        }
    };
}

scalar_newtype!(Distance, "km");
scalar_newtype!(Duration, "h");
scalar_newtype!(Speed, "km/h");
scalar_newtype!(Volume, "L");

impl Distance {
    /// Great-circle distances are only ever non-negative; clamp away float noise.
    #[must_use]
    pub fn non_negative(km: f64) -> Self {
        Distance(km.max(0.0))
    }
}

impl Div<Duration> for Distance {
    type Output = Speed;
    /// A zero-duration hop is a numeric edge case, never a division by zero: treat it
    /// as infinite speed, which callers interpret as "arrived instantaneously".
    fn div(self, rhs: Duration) -> Speed {
        if rhs.0 == 0.0 {
            Speed(f64::INFINITY)
        } else {
            Speed(self.0 / rhs.0)
        }
    }
}

impl Div<Speed> for Distance {
    type Output = Duration;
    fn div(self, rhs: Speed) -> Duration {
        if rhs.0 == 0.0 {
            Duration(f64::INFINITY)
        } else {
            Duration(self.0 / rhs.0)
        }
    }
}

impl Mul<Duration> for Speed {
    type Output = Distance;
    fn mul(self, rhs: Duration) -> Distance {
        Distance(self.0 * rhs.0)
    }
}

impl Div<Volume> for Volume {
    type Output = f64;
    /// Water fraction on board, used by the water bomber's linear range interpolation.
    fn div(self, rhs: Volume) -> f64 {
        if rhs.0 == 0.0 { 0.0 } else { self.0 / rhs.0 }
    }
}
