// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Distance kernels for dense vectors and strings.
//!
//! This crate is the computational core behind the SQL distance functions:
//! given two equal-dimension operands it produces a scalar distance. It has
//! no opinion about where the operands came from; the SQLite boundary crate
//! owns argument handling and hands buffers down here.
//!
//! Two entry surfaces exist for dense vectors: [`punned`] consumes raw
//! little-endian byte buffers tagged with a [`ScalarKind`], while
//! [`dense_f32`] / [`dense_f64`] consume already-typed slices. String edit
//! distance lives in [`levenshtein`] and works against a caller-provided
//! scratch row.

pub mod dense;
pub mod levenshtein;
mod metric;
mod scalar;

pub use dense::{dense_f32, dense_f64, punned};
pub use metric::MetricKind;
pub use scalar::{ScalarKind, f16_to_f32};
