use common_types::GpsPosition;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers on a spherical Earth.
///
/// Coordinates are assumed to be valid WGS84 degrees; the provider validates
/// them, this function does not.
#[must_use]
pub fn haversine_km(a: GpsPosition, b: GpsPosition) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(latitude: f64, longitude: f64) -> GpsPosition {
        GpsPosition { latitude, longitude }
    }

    #[test]
    fn zero_distance_for_identical_points() {
        let p = position(52.37, 4.89);
        assert!(haversine_km(p, p) < 1e-9);
    }

    #[test]
    fn amsterdam_to_paris() {
        // Amsterdam centre to Paris centre is roughly 430 km.
        let amsterdam = position(52.3676, 4.9041);
        let paris = position(48.8566, 2.3522);
        let d = haversine_km(amsterdam, paris);
        assert!((425.0..435.0).contains(&d), "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        // One degree of latitude is ~111.2 km on a 6371 km sphere.
        let d = haversine_km(position(0.0, 0.0), position(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = position(10.0, 20.0);
        let b = position(-30.0, 150.0);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }
}
