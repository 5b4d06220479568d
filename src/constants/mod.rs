//! Constants module for reference ellipsoid calculations

use std::f64::consts::PI;

// Earth reference ellipsoid
/// Earth's equatorial radius in kilometers
pub const R_E_KM: f64 = 6378.137;
/// Earth's first eccentricity (unitless)
pub const E_E: f64 = 0.081819221456;
/// Square of Earth's first eccentricity
pub const E_E_SQ: f64 = E_E * E_E;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;

/// Unicode's degree symbol
pub const DEGREE_SYM: char = '\u{00b0}';

/// Iterations used by the geodetic inverse when the caller has no preference
pub const GEODETIC_ITERATIONS: usize = 5;
