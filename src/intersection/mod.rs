//! Ray / reference ellipsoid intersection
//!
//! A ray `origin + d·direction` (`d ≥ 0`) is substituted into the surface equation
//! of an [`EllipsoidModel`], giving a quadratic `a·d² + b·d + c = 0` with
//!
//! ```text
//! a = dx² + dy² + dz²/(1 − e²)
//! b = 2·(dx·cx + dy·cy + dz·cz/(1 − e²))
//! c = cx² + cy² + cz²/(1 − e²) − R²
//! ```
//!
//! The nearest hit is the smallest non-negative root. The smaller root
//! `(−b − √disc)/(2a)` is tried first; if it lies behind the origin the larger root
//! `(−b + √disc)/(2a)` is used, and if that is also negative the ellipsoid is
//! entirely behind the ray.
//!
//! ```rust
//! use ellipsoid_intersect::{solve, Cartesian3, EllipsoidModel, IntersectionResult};
//!
//! let hit = solve(
//!     Cartesian3::new(1.0, 0.0, 0.0),
//!     Cartesian3::zero(),
//!     &EllipsoidModel::earth(),
//! )
//! .unwrap();
//! assert_eq!(hit, IntersectionResult::Point(Cartesian3::new(6378.137, 0.0, 0.0)));
//! ```

use crate::coordinates::cartesian::Cartesian3;
use crate::ellipsoid::EllipsoidModel;
use crate::{IntersectError, Result};

/// Half-line starting at `origin` and extending along `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point, ellipsoid-centred, km
    pub origin: Cartesian3,
    /// Direction; the length sets the scale of the ray parameter
    pub direction: Cartesian3,
}

impl Ray {
    pub fn new(origin: Cartesian3, direction: Cartesian3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `d`: `d·direction + origin`
    pub fn point_at(&self, d: f64) -> Cartesian3 {
        self.direction * d + self.origin
    }

    fn check_finite(&self) -> Result<()> {
        if !self.direction.is_finite() {
            return Err(IntersectError::NonFiniteInput(format!(
                "direction {}",
                self.direction
            )));
        }
        if !self.origin.is_finite() {
            return Err(IntersectError::NonFiniteInput(format!(
                "origin {}",
                self.origin
            )));
        }
        Ok(())
    }
}

/// Coefficients of `a·d² + b·d + c = 0` for a ray against an ellipsoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    /// Build the quadratic for `ray` against `model`
    ///
    /// Fails with [`IntersectError::NonFiniteInput`] for NaN/infinite ray components,
    /// [`IntersectError::DegenerateDirection`] when `a == 0`, and
    /// [`IntersectError::NumericOverflow`] when a coefficient or the discriminant is
    /// not representable.
    pub fn for_ray(ray: &Ray, model: &EllipsoidModel) -> Result<Self> {
        ray.check_finite()?;

        let r = model.equatorial_radius_km();
        let quadratic = Self {
            a: model.scaled_dot(&ray.direction, &ray.direction),
            b: 2.0 * model.scaled_dot(&ray.direction, &ray.origin),
            c: model.scaled_dot(&ray.origin, &ray.origin) - r * r,
        };
        log::trace!("{:?} for {:?}", quadratic, ray);

        if !(quadratic.a.is_finite() && quadratic.b.is_finite() && quadratic.c.is_finite()) {
            return Err(IntersectError::NumericOverflow(format!(
                "coefficients a={}, b={}, c={}",
                quadratic.a, quadratic.b, quadratic.c
            )));
        }
        if quadratic.a == 0.0 {
            return Err(IntersectError::DegenerateDirection {
                direction: ray.direction,
            });
        }
        if !quadratic.discriminant().is_finite() {
            return Err(IntersectError::NumericOverflow(format!(
                "discriminant of a={}, b={}, c={}",
                quadratic.a, quadratic.b, quadratic.c
            )));
        }

        Ok(quadratic)
    }

    /// `b² − 4ac`
    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }

    /// Both real roots as `((−b − √disc)/(2a), (−b + √disc)/(2a))`, or `None` when
    /// the discriminant is negative
    pub fn roots(&self) -> Option<(f64, f64)> {
        let disc = self.discriminant();
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        Some((
            (-self.b - sqrt_disc) / (2.0 * self.a),
            (-self.b + sqrt_disc) / (2.0 * self.a),
        ))
    }

    /// Smallest non-negative root
    pub fn nearest_forward_root(&self) -> Option<f64> {
        let Some((near, far)) = self.roots() else {
            log::debug!("Discriminant {} < 0: ray misses the ellipsoid", self.discriminant());
            return None;
        };

        if near >= 0.0 {
            log::debug!("Nearest intersection at d = {}", near);
            Some(near)
        } else if far >= 0.0 {
            log::debug!(
                "Near root d = {} is behind the origin, using far root d = {}",
                near,
                far
            );
            Some(far)
        } else {
            log::debug!("Both roots ({}, {}) are behind the origin", near, far);
            None
        }
    }
}

/// A point on the ellipsoid surface together with the ray parameter that reached it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Intersection point, ellipsoid-centred, km
    pub point: Cartesian3,
    /// Ray parameter `d` with `point = origin + d·direction`
    pub parameter: f64,
}

impl RayHit {
    /// Hit at parameter `d` along `ray`; a non-finite parameter or point is an overflow
    fn at(ray: &Ray, d: f64) -> Result<Self> {
        let point = ray.point_at(d);
        if !d.is_finite() || !point.is_finite() {
            return Err(IntersectError::NumericOverflow(format!(
                "intersection at d = {} gives point {}",
                d, point
            )));
        }
        Ok(Self {
            point,
            parameter: d,
        })
    }
}

/// Outcome of a single ray/ellipsoid query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntersectionResult {
    /// Nearest forward intersection point
    Point(Cartesian3),
    /// The ray misses the ellipsoid or the ellipsoid lies behind the origin
    NoIntersection,
}

impl IntersectionResult {
    pub fn point(&self) -> Option<Cartesian3> {
        match self {
            IntersectionResult::Point(p) => Some(*p),
            IntersectionResult::NoIntersection => None,
        }
    }
}

impl From<Option<RayHit>> for IntersectionResult {
    fn from(hit: Option<RayHit>) -> Self {
        match hit {
            Some(hit) => IntersectionResult::Point(hit.point),
            None => IntersectionResult::NoIntersection,
        }
    }
}

/// Nearest forward intersection of `ray` with `model`, with its ray parameter
pub fn nearest_hit(ray: &Ray, model: &EllipsoidModel) -> Result<Option<RayHit>> {
    let quadratic = Quadratic::for_ray(ray, model)?;
    quadratic
        .nearest_forward_root()
        .map(|d| RayHit::at(ray, d))
        .transpose()
}

/// Nearest intersection of the ray `origin + d·direction`, `d ≥ 0`, with `model`
///
/// Misses are [`IntersectionResult::NoIntersection`]; invalid input (zero or
/// non-finite direction, non-finite origin, overflow) is an error.
pub fn solve(
    direction: Cartesian3,
    origin: Cartesian3,
    model: &EllipsoidModel,
) -> Result<IntersectionResult> {
    nearest_hit(&Ray::new(origin, direction), model).map(IntersectionResult::from)
}

/// Both crossings of the full line through `ray`, ordered by ray parameter
///
/// Unlike [`nearest_hit`] the parameters may be negative. Returns `None` when the
/// line misses the ellipsoid.
pub fn surface_crossings(ray: &Ray, model: &EllipsoidModel) -> Result<Option<(RayHit, RayHit)>> {
    let quadratic = Quadratic::for_ray(ray, model)?;
    quadratic
        .roots()
        // a > 0 for any valid model, so d1 <= d2
        .map(|(d1, d2)| -> Result<(RayHit, RayHit)> {
            Ok((RayHit::at(ray, d1)?, RayHit::at(ray, d2)?))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::R_E_KM;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn earth() -> EllipsoidModel {
        EllipsoidModel::earth()
    }

    #[test]
    fn test_quadratic_coefficients() {
        let ray = Ray::new(
            Cartesian3::new(7000.0, 0.0, 0.0),
            Cartesian3::new(-1.0, 0.0, 0.0),
        );
        let q = Quadratic::for_ray(&ray, &earth()).unwrap();
        assert_eq!(q.a, 1.0);
        assert_eq!(q.b, -14000.0);
        assert_relative_eq!(q.c, 7000.0 * 7000.0 - R_E_KM * R_E_KM, max_relative = 1e-15);
        // disc = 4R² for any ray through the centre along an equatorial axis
        assert_relative_eq!(q.discriminant(), 4.0 * R_E_KM * R_E_KM, max_relative = 1e-12);
    }

    #[test]
    fn test_approach_from_outside_hits_near_side() {
        let hit = nearest_hit(
            &Ray::new(
                Cartesian3::new(7000.0, 0.0, 0.0),
                Cartesian3::new(-1.0, 0.0, 0.0),
            ),
            &earth(),
        )
        .unwrap()
        .unwrap();

        assert_relative_eq!(hit.parameter, 7000.0 - R_E_KM, epsilon = 1e-8);
        assert_relative_eq!(hit.point.x, R_E_KM, epsilon = 1e-8);
        assert_eq!(hit.point.y, 0.0);
        assert_eq!(hit.point.z, 0.0);
    }

    #[test]
    fn test_origin_at_centre_uses_far_root() {
        let result = solve(
            Cartesian3::new(1.0, 0.0, 0.0),
            Cartesian3::zero(),
            &earth(),
        )
        .unwrap();
        let p = result.point().unwrap();
        assert_relative_eq!(p.x, R_E_KM, epsilon = 1e-9);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_polar_hit_lands_on_polar_radius() {
        let model = earth();
        let hit = nearest_hit(
            &Ray::new(
                Cartesian3::new(0.0, 0.0, 10_000.0),
                Cartesian3::new(0.0, 0.0, -1.0),
            ),
            &model,
        )
        .unwrap()
        .unwrap();
        assert_relative_eq!(hit.point.z, model.polar_radius_km(), max_relative = 1e-12);
    }

    #[rstest]
    #[case::sideways_miss(Cartesian3::new(0.0, 1.0, 0.0), Cartesian3::new(7000.0, 0.0, 0.0))]
    #[case::pointing_away(Cartesian3::new(1.0, 1.0, 1.0), Cartesian3::new(10_000.0, 10_000.0, 10_000.0))]
    #[case::polar_miss(Cartesian3::new(1.0, 0.0, 0.0), Cartesian3::new(0.0, 0.0, 6400.0))]
    #[case::behind(Cartesian3::new(0.0, 0.0, 1.0), Cartesian3::new(0.0, 0.0, 8000.0))]
    fn test_no_intersection(#[case] direction: Cartesian3, #[case] origin: Cartesian3) {
        assert_eq!(
            solve(direction, origin, &earth()).unwrap(),
            IntersectionResult::NoIntersection
        );
    }

    #[test]
    fn test_both_roots_negative() {
        let ray = Ray::new(
            Cartesian3::new(10_000.0, 10_000.0, 10_000.0),
            Cartesian3::new(1.0, 1.0, 1.0),
        );
        let q = Quadratic::for_ray(&ray, &earth()).unwrap();
        let (d1, d2) = q.roots().unwrap();
        assert!(d1 < 0.0 && d2 < 0.0);
        assert_eq!(q.nearest_forward_root(), None);
    }

    #[test]
    fn test_tangent_ray_touches_once() {
        // 1024² and R² share an exponent range where their sum is exact, so disc == 0
        let ray = Ray::new(
            Cartesian3::new(R_E_KM, -1024.0, 0.0),
            Cartesian3::new(0.0, 1.0, 0.0),
        );
        let q = Quadratic::for_ray(&ray, &earth()).unwrap();
        assert_eq!(q.discriminant(), 0.0);

        let hit = nearest_hit(&ray, &earth()).unwrap().unwrap();
        assert_eq!(hit.parameter, 1024.0);
        assert_eq!(hit.point, Cartesian3::new(R_E_KM, 0.0, 0.0));
    }

    #[test]
    fn test_origin_on_surface_returns_origin() {
        let origin = Cartesian3::new(R_E_KM, 0.0, 0.0);
        let hit = nearest_hit(&Ray::new(origin, Cartesian3::new(0.0, 0.0, 1.0)), &earth())
            .unwrap()
            .unwrap();
        assert_eq!(hit.parameter, 0.0);
        assert_eq!(hit.point, origin);
    }

    #[test]
    fn test_zero_direction_is_error() {
        let err = solve(Cartesian3::zero(), Cartesian3::new(7000.0, 0.0, 0.0), &earth())
            .unwrap_err();
        assert!(matches!(err, IntersectError::DegenerateDirection { .. }));
    }

    #[rstest]
    #[case(Cartesian3::new(f64::NAN, 0.0, 0.0), Cartesian3::zero())]
    #[case(Cartesian3::new(1.0, 0.0, 0.0), Cartesian3::new(0.0, f64::INFINITY, 0.0))]
    #[case(Cartesian3::new(1.0, f64::NEG_INFINITY, 0.0), Cartesian3::zero())]
    fn test_non_finite_input_is_error(#[case] direction: Cartesian3, #[case] origin: Cartesian3) {
        assert!(matches!(
            solve(direction, origin, &earth()),
            Err(IntersectError::NonFiniteInput(_))
        ));
    }

    #[test]
    fn test_overflow_is_error() {
        assert!(matches!(
            solve(
                Cartesian3::new(1e200, 0.0, 0.0),
                Cartesian3::new(7000.0, 0.0, 0.0),
                &earth()
            ),
            Err(IntersectError::NumericOverflow(_))
        ));
        assert!(matches!(
            solve(
                Cartesian3::new(1.0, 0.0, 0.0),
                Cartesian3::new(1e160, 0.0, 0.0),
                &earth()
            ),
            Err(IntersectError::NumericOverflow(_))
        ));
    }

    #[test]
    fn test_infinite_root_is_error_not_hit() {
        // a is subnormal, so the root overflows even though a, b, c and disc are finite
        let direction = Cartesian3::new(1e-161, 0.0, 0.0);
        let origin = Cartesian3::new(-1e150, 0.0, 0.0);
        let ray = Ray::new(origin, direction);
        let q = Quadratic::for_ray(&ray, &earth()).unwrap();
        assert!(q.a > 0.0 && q.a < f64::MIN_POSITIVE);

        assert!(matches!(
            solve(direction, origin, &earth()),
            Err(IntersectError::NumericOverflow(_))
        ));
        assert!(matches!(
            nearest_hit(&ray, &earth()),
            Err(IntersectError::NumericOverflow(_))
        ));
        assert!(matches!(
            surface_crossings(&ray, &earth()),
            Err(IntersectError::NumericOverflow(_))
        ));
    }

    #[test]
    fn test_nearest_forward_root_agrees_with_roots() {
        let ray = Ray::new(
            Cartesian3::new(-9000.0, 2500.0, 4000.0),
            Cartesian3::new(1.0, -0.2, -0.4),
        );
        let q = Quadratic::for_ray(&ray, &earth()).unwrap();
        let (near, _) = q.roots().unwrap();
        assert_eq!(q.nearest_forward_root(), Some(near));
    }

    #[test]
    fn test_surface_crossings_give_chord() {
        let ray = Ray::new(Cartesian3::zero(), Cartesian3::new(0.0, 2.0, 0.0));
        let (entry, exit) = surface_crossings(&ray, &earth()).unwrap().unwrap();
        assert_relative_eq!(entry.parameter, -R_E_KM / 2.0, epsilon = 1e-9);
        assert_relative_eq!(exit.parameter, R_E_KM / 2.0, epsilon = 1e-9);
        assert_relative_eq!(
            (exit.point - entry.point).magnitude(),
            2.0 * R_E_KM,
            epsilon = 1e-8
        );

        let miss = Ray::new(
            Cartesian3::new(7000.0, 0.0, 0.0),
            Cartesian3::new(0.0, 0.0, 1.0),
        );
        assert!(surface_crossings(&miss, &earth()).unwrap().is_none());
    }

    #[test]
    fn test_spherical_model() {
        let sphere = EllipsoidModel::new(1.0, 0.0).unwrap();
        let hit = nearest_hit(
            &Ray::new(
                Cartesian3::new(0.0, 0.0, 5.0),
                Cartesian3::new(0.0, 0.0, -4.0),
            ),
            &sphere,
        )
        .unwrap()
        .unwrap();
        assert_eq!(hit.parameter, 1.0);
        assert_eq!(hit.point, Cartesian3::new(0.0, 0.0, 1.0));
    }
}
