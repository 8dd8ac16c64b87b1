// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for satmesh

pub mod batch;
pub mod reporter;

pub use batch::{check_unique_outputs, convert_batch, convert_file, discover_inputs, output_path_for, BatchOptions, ConvertOutcome, ConvertStats};
pub use reporter::Reporter;
