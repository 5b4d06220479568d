//! # Cartesian Coordinate Module
//!
//! This module provides the 3D Cartesian representation used for every ray and
//! surface point handled by the crate.
//!
//! ## Coordinate System Convention
//!
//! Coordinates are ellipsoid-centred and body-fixed:
//! - **X-axis**: Points toward latitude 0°, longitude 0°
//! - **Y-axis**: Points toward latitude 0°, longitude 90°E
//! - **Z-axis**: Points toward the north pole (the ellipsoid's axis of symmetry)
//!
//! Positions are in kilometers. Directions may use any consistent scale; they are
//! never normalized internally, so the ray parameter keeps the caller's units.
//!
//! ## Examples
//!
//! ```rust
//! use ellipsoid_intersect::coordinates::cartesian::Cartesian3;
//!
//! let origin = Cartesian3::new(7000.0, 0.0, 0.0);
//! let direction = Cartesian3::new(-1.0, 0.0, 0.0);
//!
//! // Point 500 km along the ray
//! let p = direction * 500.0 + origin;
//! assert_eq!(p, Cartesian3::new(6500.0, 0.0, 0.0));
//! ```

use nalgebra::Vector3;
use std::fmt;

/// Three-dimensional Cartesian coordinate representation
///
/// Represents either a position (km) or a direction in the ellipsoid-centred
/// frame. Components are stored exactly as supplied; no normalization is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cartesian3 {
    /// X-component (toward the prime meridian on the equator)
    pub x: f64,
    /// Y-component (toward longitude 90°E on the equator)
    pub y: f64,
    /// Z-component (toward the north pole)
    pub z: f64,
}

impl Cartesian3 {
    /// Creates a new Cartesian coordinate
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ellipsoid_intersect::coordinates::cartesian::Cartesian3;
    ///
    /// let coord = Cartesian3::new(1.0, 2.0, 3.0);
    /// assert_eq!(coord.x, 1.0);
    /// assert_eq!(coord.y, 2.0);
    /// assert_eq!(coord.z, 3.0);
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// The zero vector (ellipsoid centre)
    pub fn zero() -> Self {
        Cartesian3::default()
    }

    /// Calculates the magnitude (length) of the coordinate vector
    ///
    /// `magnitude = sqrt(x² + y² + z²)`
    ///
    /// ```rust
    /// use ellipsoid_intersect::coordinates::cartesian::Cartesian3;
    ///
    /// assert_eq!(Cartesian3::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Calculates the dot product with another coordinate
    ///
    /// `dot = x₁*x₂ + y₁*y₂ + z₁*z₂`
    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns true when all three components are finite (neither NaN nor infinite)
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    ///
    /// ```rust
    /// use ellipsoid_intersect::coordinates::cartesian::Cartesian3;
    /// use nalgebra::Vector3;
    ///
    /// let vec: Vector3<f64> = Cartesian3::new(1.0, 2.0, 3.0).to_vector3();
    /// assert_eq!(vec, Vector3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl fmt::Display for Cartesian3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// Arithmetic operations for convenience
impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}
