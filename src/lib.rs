//! Ellipsoid Intersect: nearest intersection of a ray with a reference ellipsoid
//!
//! This crate computes where a half-line first crosses an oblate spheroid such as
//! the Earth reference ellipsoid. The calculation is closed-form (a single
//! quadratic), pure and deterministic, so it can be called from any number of
//! threads without coordination.
//!
//! ```rust
//! use ellipsoid_intersect::{solve, Cartesian3, EllipsoidModel};
//!
//! let earth = EllipsoidModel::earth();
//! let result = solve(
//!     Cartesian3::new(-1.0, 0.0, 0.0),
//!     Cartesian3::new(7000.0, 0.0, 0.0),
//!     &earth,
//! )
//! .unwrap();
//! let p = result.point().unwrap();
//! assert!((p.x - 6378.137).abs() < 1e-8);
//! ```

use thiserror::Error;

pub mod constants;
pub mod coordinates;
pub mod ellipsoid;
pub mod intersection;

// Re-export commonly used types
pub use coordinates::{Cartesian3, Geodetic};
pub use ellipsoid::EllipsoidModel;
pub use intersection::{
    nearest_hit, solve, surface_crossings, IntersectionResult, Quadratic, Ray, RayHit,
};

/// Main error type for the ellipsoid_intersect library
///
/// A ray that misses the ellipsoid is not an error; see
/// [`IntersectionResult::NoIntersection`].
#[derive(Debug, Error)]
pub enum IntersectError {
    #[error("Degenerate ray direction {direction}: quadratic leading coefficient is zero")]
    DegenerateDirection { direction: Cartesian3 },

    #[error("Non-finite input: {0}")]
    NonFiniteInput(String),

    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),

    #[error("Invalid ellipsoid model: {0}")]
    InvalidModel(String),

    #[error("Model parse error: {0}")]
    ModelParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for ellipsoid_intersect operations
pub type Result<T> = std::result::Result<T, IntersectError>;
