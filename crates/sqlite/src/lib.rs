// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Vector and string distance functions for SQLite.
//!
//! [`register`] installs a fixed family of deterministic scalar functions on
//! a [`rusqlite::Connection`]: dense vector distances (squared Euclidean,
//! cosine, inner product, Jensen-Shannon divergence, Haversine) over f16,
//! f32, f64 and i8 elements, bit-level Hamming and Jaccard distances over
//! packed binary vectors, and a bounded Levenshtein edit distance.
//!
//! Every dense function accepts its operands in three encodings: a pair of
//! packed little-endian BLOBs, a pair of bracketed/comma-separated TEXT
//! arrays, or a flat tuple of scalar columns holding both vectors
//! back-to-back:
//!
//! ```sql
//! SELECT distance_cosine_f32(a.embedding, b.embedding) FROM docs a, docs b;
//! SELECT distance_cosine_f32('[1, 2, 3]', '[3, 2, 1]');
//! SELECT distance_haversine_meters(a.lat, a.lon, b.lat, b.lon) FROM city a, city b;
//! ```
//!
//! Malformed operands surface as SQL errors with fixed messages; no input is
//! ever truncated or padded to make a call succeed.
//!
//! The Levenshtein evaluator reuses one process-wide scratch buffer that
//! grows to the largest call seen. Call [`teardown`] once the functions are
//! no longer in use to release it; the call is idempotent.

mod error;
mod parse;
mod registry;
mod scratch;

pub use error::DistanceError;
pub use registry::{EARTH_MEAN_RADIUS_METERS, register, unregister};
pub use scratch::teardown;
