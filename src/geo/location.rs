//! Latitude/longitude points and great-circle geometry.
//!
//! The source this crate is descended from computed distance as flat Euclidean
//! degrees-squared, marked with a `FIXME: units not correct` in its own comments. This
//! version replaces that with a proper haversine great-circle distance and a spherical
//! `intermediate_point`, matching the constant-ground-speed travel model the aircraft
//! layer assumes.

use crate::units::Distance;

/// Mean Earth radius, km.
const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Degrees.
    pub lat: f64,
    /// Degrees.
    pub lon: f64,
}

impl Location {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Location { lat, lon }
    }

    /// Great-circle distance via the haversine formula.
    #[must_use]
    pub fn distance(&self, other: &Location) -> Distance {
        let (lat1, lon1) = (self.lat.to_radians(), self.lon.to_radians());
        let (lat2, lon2) = (other.lat.to_radians(), other.lon.to_radians());
        let dlat = lat2 - lat1;
        let dlon = lon2 - lon1;
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        Distance::non_negative(EARTH_RADIUS_KM * c)
    }

    /// The point a `fraction` of the way from `self` to `other` along the great circle
    /// connecting them. `fraction = 0.0` returns `self`, `fraction = 1.0` returns
    /// `other`. Coincident endpoints return `self` rather than dividing by a zero
    /// angular distance.
    #[must_use]
    pub fn intermediate_point(&self, other: &Location, fraction: f64) -> Location {
        let (lat1, lon1) = (self.lat.to_radians(), self.lon.to_radians());
        let (lat2, lon2) = (other.lat.to_radians(), other.lon.to_radians());

        let dlat = lat2 - lat1;
        let dlon = lon2 - lon1;
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let angular_dist = 2.0 * a.sqrt().asin();

        if angular_dist.abs() < 1e-12 {
            return *self;
        }

        let a_coef = ((1.0 - fraction) * angular_dist).sin() / angular_dist.sin();
        let b_coef = (fraction * angular_dist).sin() / angular_dist.sin();

        let x = a_coef * lat1.cos() * lon1.cos() + b_coef * lat2.cos() * lon2.cos();
        let y = a_coef * lat1.cos() * lon1.sin() + b_coef * lat2.cos() * lon2.sin();
        let z = a_coef * lat1.sin() + b_coef * lat2.sin();

        let lat = z.atan2((x * x + y * y).sqrt());
        let lon = y.atan2(x);

        Location::new(lat.to_degrees(), lon.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let a = Location::new(10.0, 20.0);
        assert!(a.distance(&a).0.abs() < 1e-9);
    }

    #[test]
    fn one_degree_longitude_at_equator_is_about_111_km() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(0.0, 1.0);
        let d = a.distance(&b).0;
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }

    #[test]
    fn intermediate_point_endpoints() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(0.0, 0.9);
        let start = a.intermediate_point(&b, 0.0);
        let end = a.intermediate_point(&b, 1.0);
        assert!((start.lat - a.lat).abs() < 1e-9 && (start.lon - a.lon).abs() < 1e-9);
        assert!((end.lat - b.lat).abs() < 1e-6 && (end.lon - b.lon).abs() < 1e-6);
    }

    #[test]
    fn intermediate_point_is_monotone_along_meridian() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(0.0, 1.0);
        let mid = a.intermediate_point(&b, 0.5);
        assert!(mid.lon > 0.0 && mid.lon < 1.0);
    }

    #[test]
    fn coincident_points_do_not_panic() {
        let a = Location::new(5.0, 5.0);
        let mid = a.intermediate_point(&a, 0.5);
        assert_eq!(mid, a);
    }
}
