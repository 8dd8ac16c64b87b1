// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - curve and surface evaluators, mesh representation

mod bbox;
pub mod curve;
mod mesh;
pub mod surface;

pub use bbox::BoundingBox;
pub use curve::{Curve, EllipseCurve, StraightCurve};
pub use mesh::{Mesh, Triangle, Vertex};
pub use surface::{Cone, Plane, Sphere, SplineSurface, Surface, SurfaceKind, Torus};
