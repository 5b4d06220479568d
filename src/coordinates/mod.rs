pub mod cartesian;
pub mod geodetic;

pub use cartesian::Cartesian3;
pub use geodetic::Geodetic;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GEODETIC_ITERATIONS;
    use crate::ellipsoid::EllipsoidModel;

    #[test]
    fn test_geodetic_of_equatorial_cartesian() {
        let earth = EllipsoidModel::earth();
        let p = Cartesian3::new(0.0, earth.equatorial_radius_km() + 2.0, 0.0);
        let g = Geodetic::from_cartesian(p, &earth, GEODETIC_ITERATIONS);

        assert!(g.lat.abs() < 1e-15);
        assert!((g.lon.to_degrees() - 90.0).abs() < 1e-12);
        assert!((g.h - 2.0).abs() < 1e-9);
    }
}
