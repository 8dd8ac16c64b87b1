// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SAT header decoding
//!
//! The header is everything before the first entity record:
//!
//! ```text
//! 700 0 1 0
//! @8 Autodesk @11 ACIS 7.0 NT @24 Mon Jan 01 00:00:00 2024
//! 1 9.9999999999999995e-007 1e-010
//! ```
//!
//! It is informational only; entity interpretation never branches on it.

use super::tokenizer::{Token, TokenKind};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SatHeader {
    pub version: Option<u32>,
    pub record_count: Option<u64>,
    pub body_count: Option<u64>,
    pub has_history: Option<bool>,
    pub product: Option<String>,
    pub acis_version: Option<String>,
    pub date: Option<String>,
    /// Model units expressed in millimetres
    pub units_per_mm: Option<f64>,
    pub resabs: Option<f64>,
    pub resnor: Option<f64>,
}

impl SatHeader {
    /// Decode the preamble tokens. Returns `None` for an empty preamble.
    pub fn from_preamble(tokens: &[Token]) -> Option<Self> {
        let first = tokens.first()?;

        let mut header = Self::default();

        // Version line
        let counts: Vec<f64> = tokens
            .iter()
            .take_while(|t| t.line == first.line)
            .filter_map(Token::as_number)
            .collect();
        header.version = counts.first().map(|v| *v as u32);
        header.record_count = counts.get(1).map(|v| *v as u64);
        header.body_count = counts.get(2).map(|v| *v as u64);
        header.has_history = counts.get(3).map(|v| *v != 0.0);

        let mut strings = tokens.iter().filter_map(|t| match &t.kind {
            TokenKind::Str(s) => Some(s.clone()),
            _ => None,
        });
        header.product = strings.next();
        header.acis_version = strings.next();
        header.date = strings.next();

        // Units line: numbers after the last string, or after the version line
        let units_start = tokens
            .iter()
            .rposition(|t| matches!(t.kind, TokenKind::Str(_)))
            .map(|i| i + 1)
            .unwrap_or_else(|| tokens.iter().take_while(|t| t.line == first.line).count());
        let units: Vec<f64> = tokens[units_start..]
            .iter()
            .filter_map(Token::as_number)
            .collect();
        header.units_per_mm = units.first().copied();
        header.resabs = units.get(1).copied();
        header.resnor = units.get(2).copied();

        Some(header)
    }
}
