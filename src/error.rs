// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Errors raised while turning a SAT payload into a mesh

use crate::sat::EntityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SatError {
    /// Neither the bodies nor the standalone faces produced a triangle
    #[error("no tessellatable geometry in SAT payload")]
    NoGeometry,

    #[error("face {face} produced a non-finite vertex")]
    NonFiniteVertex { face: EntityId },

    #[error("tessellation panicked: {0}")]
    Panicked(String),
}
