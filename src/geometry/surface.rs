// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parametric surface evaluators
//!
//! Each analytic surface maps a `(u, v)` parameter pair to a point in model
//! space. Angles are in radians.

use crate::utils::math::{normalize_or_z, orthonormal_basis};
use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// Below this `|tan(half_angle)|` a cone is treated as a cylinder
const CYLINDER_TAN_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plane {
    pub origin: Point3<f64>,
    pub normal: Vector3<f64>,
    pub u_dir: Vector3<f64>,
    pub v_dir: Vector3<f64>,
}

impl Plane {
    /// Plane with an orthonormal frame; `u_dir` is projected into the plane
    /// and replaced when missing or parallel to the normal.
    pub fn new(origin: Point3<f64>, normal: Vector3<f64>, u_dir: Option<Vector3<f64>>) -> Self {
        let (u, v, w) = orthonormal_basis(&normal, u_dir.as_ref());
        Self {
            origin,
            normal: w,
            u_dir: u,
            v_dir: v,
        }
    }

    pub fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        self.origin + self.u_dir * u + self.v_dir * v
    }
}

/// Cone around `axis`; a cylinder when the half angle is zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cone {
    pub origin: Point3<f64>,
    pub axis: Vector3<f64>,
    /// Direction of the `u = 0` seam, perpendicular to the axis
    pub reference: Vector3<f64>,
    /// Radius at the origin
    pub radius: f64,
    pub half_angle: f64,
}

impl Cone {
    pub fn new(
        origin: Point3<f64>,
        axis: Vector3<f64>,
        major_axis: Vector3<f64>,
        half_angle: f64,
    ) -> Self {
        let (reference, _, axis) = orthonormal_basis(&axis, Some(&major_axis));
        Self {
            origin,
            axis,
            reference,
            radius: major_axis.norm(),
            half_angle,
        }
    }

    pub fn is_cylinder(&self) -> bool {
        self.half_angle.tan().abs() < CYLINDER_TAN_EPSILON
    }

    /// Distance along the axis covered by the tessellation grid:
    /// up to the apex for a cone, two radii for a cylinder.
    pub fn height(&self) -> f64 {
        if self.is_cylinder() {
            2.0 * self.radius
        } else {
            self.radius / self.half_angle.tan()
        }
    }

    /// `u` is the angle around the axis, `v` the fraction of `height()`
    pub fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        let h = v * self.height();
        let r = if self.is_cylinder() {
            self.radius
        } else {
            self.radius - h * self.half_angle.tan()
        };
        let side = self.axis.cross(&self.reference);
        self.origin + self.axis * h + (self.reference * u.cos() + side * u.sin()) * r
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sphere {
    pub center: Point3<f64>,
    pub radius: f64,
}

impl Sphere {
    /// `theta` is the azimuth, `phi` the polar angle from +Z
    pub fn point_at(&self, theta: f64, phi: f64) -> Point3<f64> {
        self.center
            + Vector3::new(
                phi.sin() * theta.cos(),
                phi.sin() * theta.sin(),
                phi.cos(),
            ) * self.radius
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Torus {
    pub center: Point3<f64>,
    pub axis: Vector3<f64>,
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl Torus {
    pub fn new(center: Point3<f64>, axis: Vector3<f64>, major_radius: f64, minor_radius: f64) -> Self {
        Self {
            center,
            axis: normalize_or_z(&axis),
            major_radius,
            minor_radius,
        }
    }

    /// `theta` runs around the axis, `phi` around the tube
    pub fn point_at(&self, theta: f64, phi: f64) -> Point3<f64> {
        let (u, v, w) = orthonormal_basis(&self.axis, None);
        let ring = self.major_radius + self.minor_radius * phi.cos();
        self.center + (u * theta.cos() + v * theta.sin()) * ring + w * (self.minor_radius * phi.sin())
    }
}

/// Spline surface; control points are kept but never evaluated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplineSurface {
    pub control_points: Vec<Point3<f64>>,
}

/// Face geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Surface {
    Plane(Plane),
    Cone(Cone),
    Sphere(Sphere),
    Torus(Torus),
    Spline(SplineSurface),
}

impl Surface {
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Self::Plane(_) => SurfaceKind::Plane,
            Self::Cone(_) => SurfaceKind::Cone,
            Self::Sphere(_) => SurfaceKind::Sphere,
            Self::Torus(_) => SurfaceKind::Torus,
            Self::Spline(_) => SurfaceKind::Spline,
        }
    }
}

/// Surface classification recorded in face metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Plane,
    Cone,
    Sphere,
    Torus,
    Spline,
    /// Missing, dangling, or non-surface reference
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_plane_frame() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 3.0), None);
        assert_relative_eq!(plane.normal, Vector3::z());
        assert_relative_eq!(plane.u_dir.cross(&plane.v_dir), plane.normal, epsilon = 1e-12);
        assert_relative_eq!(plane.point_at(0.0, 0.0), Point3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_cone_reaches_apex() {
        let cone = Cone::new(
            Point3::origin(),
            Vector3::z(),
            Vector3::new(2.0, 0.0, 0.0),
            FRAC_PI_4,
        );
        assert_relative_eq!(cone.height(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(cone.point_at(0.0, 0.0), Point3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(cone.point_at(1.0, 1.0), Point3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_cylinder_keeps_radius() {
        let cylinder = Cone::new(Point3::origin(), Vector3::z(), Vector3::new(1.5, 0.0, 0.0), 0.0);
        assert!(cylinder.is_cylinder());
        assert_relative_eq!(cylinder.height(), 3.0);
        let p = cylinder.point_at(FRAC_PI_2, 1.0);
        assert_relative_eq!(p, Point3::new(0.0, 1.5, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_sphere_poles() {
        let sphere = Sphere { center: Point3::new(1.0, 1.0, 1.0), radius: 2.0 };
        assert_relative_eq!(sphere.point_at(0.3, 0.0), Point3::new(1.0, 1.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(
            sphere.point_at(0.0, std::f64::consts::PI),
            Point3::new(1.0, 1.0, -1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_torus_outer_equator() {
        let torus = Torus::new(Point3::origin(), Vector3::z(), 5.0, 1.0);
        let p = torus.point_at(0.0, 0.0);
        assert_relative_eq!(p.coords.norm(), 6.0, epsilon = 1e-12);
        let top = torus.point_at(0.0, FRAC_PI_2);
        assert_relative_eq!(top.z, 1.0, epsilon = 1e-12);
    }
}
