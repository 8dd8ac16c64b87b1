// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Vector and transform utilities shared by the evaluators and tessellator

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Coincidence threshold used when deduplicating polyline points
pub const POINT_EPSILON: f64 = 1e-6;

/// Build a vector from `values[start..start + 3]`, zero-filling missing slots
pub fn vector_at(values: &[f64], start: usize) -> Vector3<f64> {
    let get = |i: usize| values.get(start + i).copied().unwrap_or(0.0);
    Vector3::new(get(0), get(1), get(2))
}

/// Build a point from `values[start..start + 3]`, zero-filling missing slots
pub fn point_at(values: &[f64], start: usize) -> Point3<f64> {
    Point3::from(vector_at(values, start))
}

/// Normalize, or `None` when the vector has (nearly) no length
pub fn try_normalize(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    v.try_normalize(1e-12)
}

/// Normalize, falling back to +Z for degenerate input
pub fn normalize_or_z(v: &Vector3<f64>) -> Vector3<f64> {
    try_normalize(v).unwrap_or_else(Vector3::z)
}

/// Right-handed orthonormal basis `(u, v, w)` with `w` along `axis`.
///
/// `reference` seeds the `u` direction when it is not parallel to the axis.
pub fn orthonormal_basis(
    axis: &Vector3<f64>,
    reference: Option<&Vector3<f64>>,
) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
    let w = normalize_or_z(axis);

    let projected = |r: &Vector3<f64>| try_normalize(&(r - w * r.dot(&w)));
    let u = reference
        .and_then(projected)
        .or_else(|| {
            // Seed with the world axis least aligned with w
            let seed = if w.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
            projected(&seed)
        })
        .unwrap_or_else(Vector3::x);

    let v = w.cross(&u);
    (u, v, w)
}

/// Build a 4x4 transform from an ACIS rotation block (three row vectors),
/// a translation, and a uniform scale.
///
/// ACIS applies the rows to row vectors (`p' = p * R * s + t`), so the
/// column-vector matrix uses the transposed rotation.
pub fn acis_transform(rows: &[f64; 9], translation: &Vector3<f64>, scale: f64) -> Matrix4<f64> {
    let rotation = Matrix3::from_row_slice(rows).transpose() * scale;
    let mut matrix = rotation.to_homogeneous();
    matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
    matrix
}

/// Apply a homogeneous transform to a point
pub fn transform_point(matrix: &Matrix4<f64>, point: &Point3<f64>) -> Point3<f64> {
    matrix.transform_point(point)
}

/// True when every coordinate is finite
pub fn is_finite_point(point: &Point3<f64>) -> bool {
    point.coords.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_at_zero_fills() {
        let v = vector_at(&[1.0, 2.0], 1);
        assert_eq!(v, Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_orthonormal_basis() {
        let axis = Vector3::new(0.0, 0.0, 2.0);
        let (u, v, w) = orthonormal_basis(&axis, Some(&Vector3::new(1.0, 0.0, 1.0)));
        assert_relative_eq!(w, Vector3::z());
        assert_relative_eq!(u, Vector3::x());
        assert_relative_eq!(v, Vector3::y());

        // Reference parallel to the axis falls back to a seed direction
        let (u, v, w) = orthonormal_basis(&Vector3::x(), Some(&Vector3::x()));
        assert_relative_eq!(u.dot(&w), 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.dot(&w), 0.0, epsilon = 1e-12);
        assert_relative_eq!(u.cross(&v), w, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_axis_is_z() {
        let (_, _, w) = orthonormal_basis(&Vector3::zeros(), None);
        assert_eq!(w, Vector3::z());
    }

    #[test]
    fn test_acis_transform() {
        // 90 degrees about Z: x axis maps to y
        let rows = [0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let m = acis_transform(&rows, &Vector3::new(10.0, 0.0, 0.0), 2.0);
        let p = transform_point(&m, &Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(10.0, 2.0, 0.0), epsilon = 1e-12);
    }
}
