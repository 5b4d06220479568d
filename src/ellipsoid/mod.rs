//! Reference ellipsoid models
//!
//! An [`EllipsoidModel`] describes an oblate spheroid by its equatorial radius and
//! first eccentricity. The surface is the set of points satisfying
//!
//! ```text
//! x² + y² + z²/(1 − e²) = R²
//! ```
//!
//! The Earth model ([`EllipsoidModel::earth`]) is the default; other bodies can be
//! described by constructing a validated model or loading one from JSON.

use std::path::Path;

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::constants::{E_E, R_E_KM};
use crate::coordinates::cartesian::Cartesian3;
use crate::{IntersectError, Result};

/// Oblate spheroid defined by equatorial radius (km) and first eccentricity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipsoidModel {
    equatorial_radius_km: f64,
    eccentricity: f64,
}

impl EllipsoidModel {
    /// Earth reference ellipsoid (R = 6378.137 km, e = 0.081819221456)
    pub const fn earth() -> Self {
        Self {
            equatorial_radius_km: R_E_KM,
            eccentricity: E_E,
        }
    }

    /// Create a validated model
    ///
    /// The radius must be finite and positive and the eccentricity must lie in `[0, 1)`.
    ///
    /// ```rust
    /// use ellipsoid_intersect::EllipsoidModel;
    ///
    /// let moon = EllipsoidModel::new(1738.1, 0.0).unwrap();
    /// assert_eq!(moon.polar_radius_km(), 1738.1);
    ///
    /// assert!(EllipsoidModel::new(6378.137, 1.0).is_err());
    /// ```
    pub fn new(equatorial_radius_km: f64, eccentricity: f64) -> Result<Self> {
        let model = Self {
            equatorial_radius_km,
            eccentricity,
        };
        model.validate()?;
        Ok(model)
    }

    /// Create a model from equatorial radius and flattening `f = (a − b)/a`
    pub fn from_flattening(equatorial_radius_km: f64, flattening: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&flattening) {
            return Err(IntersectError::InvalidModel(format!(
                "flattening {} outside [0, 1)",
                flattening
            )));
        }
        let e_sq = 2.0 * flattening - flattening * flattening;
        Self::new(equatorial_radius_km, e_sq.sqrt())
    }

    /// Parse a model from a JSON document such as
    /// `{"equatorial_radius_km": 3396.19, "eccentricity": 0.1083}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load a model from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("Loaded ellipsoid model from {}", path.display());
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        if !self.equatorial_radius_km.is_finite() || self.equatorial_radius_km <= 0.0 {
            return Err(IntersectError::InvalidModel(format!(
                "equatorial radius {} must be finite and positive",
                self.equatorial_radius_km
            )));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(IntersectError::InvalidModel(format!(
                "eccentricity {} outside [0, 1)",
                self.eccentricity
            )));
        }
        Ok(())
    }

    /// Equatorial radius in kilometers
    pub fn equatorial_radius_km(&self) -> f64 {
        self.equatorial_radius_km
    }

    /// First eccentricity (unitless)
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Square of the first eccentricity
    pub fn eccentricity_squared(&self) -> f64 {
        self.eccentricity * self.eccentricity
    }

    /// Polar radius `R·√(1 − e²)` in kilometers
    pub fn polar_radius_km(&self) -> f64 {
        self.equatorial_radius_km * (1.0 - self.eccentricity_squared()).sqrt()
    }

    /// Flattening `1 − √(1 − e²)`
    pub fn flattening(&self) -> f64 {
        1.0 - (1.0 - self.eccentricity_squared()).sqrt()
    }

    /// Stretch factor `1/(1 − e²)` applied to the z terms of the surface equation
    pub fn z_scale(&self) -> f64 {
        1.0 / (1.0 - self.eccentricity_squared())
    }

    /// Bilinear form of the surface equation: `ux·vx + uy·vy + uz·vz/(1 − e²)`
    pub fn scaled_dot(&self, u: &Cartesian3, v: &Cartesian3) -> f64 {
        u.x * v.x + u.y * v.y + (u.z * v.z) / (1.0 - self.eccentricity_squared())
    }

    /// Diagonal matrix `M` with `pᵀ M p = R²` on the surface
    pub fn shape_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_diagonal(&nalgebra::Vector3::new(1.0, 1.0, self.z_scale()))
    }

    /// `x² + y² + z²/(1 − e²) − R²`: zero on the surface, negative inside
    pub fn surface_residual(&self, point: &Cartesian3) -> f64 {
        self.scaled_dot(point, point) - self.equatorial_radius_km * self.equatorial_radius_km
    }

    /// Surface residual relative to `R²`
    ///
    /// ```rust
    /// use ellipsoid_intersect::{Cartesian3, EllipsoidModel};
    ///
    /// let earth = EllipsoidModel::earth();
    /// let on_equator = Cartesian3::new(earth.equatorial_radius_km(), 0.0, 0.0);
    /// assert!(earth.relative_surface_error(&on_equator) < 1e-12);
    /// ```
    pub fn relative_surface_error(&self, point: &Cartesian3) -> f64 {
        self.surface_residual(point).abs()
            / (self.equatorial_radius_km * self.equatorial_radius_km)
    }

    /// True when the point lies strictly inside the ellipsoid
    pub fn contains(&self, point: &Cartesian3) -> bool {
        self.surface_residual(point) < 0.0
    }
}

impl Default for EllipsoidModel {
    fn default() -> Self {
        Self::earth()
    }
}
