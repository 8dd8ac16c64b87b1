// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parametric curve evaluators used for edge sampling

use crate::utils::math::{normalize_or_z, try_normalize};
use nalgebra::{Point3, Vector3};
use serde::Serialize;
use std::f64::consts::TAU;

/// Infinite line `origin + direction * t`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StraightCurve {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl StraightCurve {
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// Two-point chord between the parameters; `0..1` when absent
    pub fn sample(&self, t0: Option<f64>, t1: Option<f64>) -> Vec<Point3<f64>> {
        vec![
            self.point_at(t0.unwrap_or(0.0)),
            self.point_at(t1.unwrap_or(1.0)),
        ]
    }
}

/// Ellipse (or circle when `ratio == 1`) in the plane normal to `normal`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EllipseCurve {
    pub center: Point3<f64>,
    pub normal: Vector3<f64>,
    /// Major axis; its length is the major radius
    pub major_axis: Vector3<f64>,
    /// Minor radius over major radius
    pub ratio: f64,
}

impl EllipseCurve {
    /// Minor axis: `normal x major_dir`, scaled by the major length and ratio
    pub fn minor_axis(&self) -> Vector3<f64> {
        let major_len = self.major_axis.norm();
        let major_dir = try_normalize(&self.major_axis).unwrap_or_else(Vector3::x);
        normalize_or_z(&self.normal).cross(&major_dir) * major_len * self.ratio
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.center + self.major_axis * t.cos() + self.minor_axis() * t.sin()
    }

    /// `segments + 1` samples from `t0` to `t1`; a full turn when either is absent
    pub fn sample(&self, t0: Option<f64>, t1: Option<f64>, segments: usize) -> Vec<Point3<f64>> {
        let (start, end) = match (t0, t1) {
            (Some(a), Some(b)) => (a, b),
            _ => (0.0, TAU),
        };
        let segments = segments.max(1);
        let minor = self.minor_axis();

        (0..=segments)
            .map(|i| {
                let t = start + (end - start) * i as f64 / segments as f64;
                self.center + self.major_axis * t.cos() + minor * t.sin()
            })
            .collect()
    }
}

/// Edge geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curve {
    Straight(StraightCurve),
    Ellipse(EllipseCurve),
    /// Curve kinds that are recognised but not evaluated (intcurve, helix...)
    Unsupported { type_name: String },
}

impl Curve {
    /// Sample the curve between two parameters.
    ///
    /// Unsupported curves yield no samples; callers fall back to a
    /// vertex-to-vertex chord.
    pub fn sample(&self, t0: Option<f64>, t1: Option<f64>, segments: usize) -> Vec<Point3<f64>> {
        match self {
            Self::Straight(line) => line.sample(t0, t1),
            Self::Ellipse(ellipse) => ellipse.sample(t0, t1, segments),
            Self::Unsupported { .. } => Vec::new(),
        }
    }
}
