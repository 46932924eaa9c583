// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The declarative function registry and the per-call evaluators.
//!
//! Each SQL-visible name is bound to one fixed (scalar kind, metric kind)
//! instantiation at registration time; no per-call negotiation happens. The
//! whole table registers or [`register`] fails; there is no partial load.

use reifydb_distance_kernel::{MetricKind, ScalarKind, dense_f32, dense_f64, levenshtein, punned};
use rusqlite::Connection;
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::ValueRef;
use smallvec::SmallVec;

use crate::parse::{OperandPair, parse_pair};
use crate::scratch;
use crate::error::DistanceError;

/// Earth's mean radius. Applied only by `distance_haversine_meters`, which
/// turns the kernel's unit-sphere distance into a physical one; every other
/// metric returns the kernel output untouched.
pub const EARTH_MEAN_RADIUS_METERS: f64 = 6_371_009.0;

/// Largest representable edit distance; results saturate here.
const LEVENSHTEIN_BOUND: usize = 255;

/// Accept any number of arguments (SQLite convention).
const ANY_ARITY: i32 = -1;

#[derive(Clone, Copy)]
enum Evaluator {
	Dense {
		scalar: ScalarKind,
		metric: MetricKind,
		scale: f64,
	},
	Levenshtein,
}

/// One externally visible SQL function, fixed at load time.
struct FunctionBinding {
	name: &'static str,
	arity: i32,
	evaluator: Evaluator,
}

const fn dense(name: &'static str, scalar: ScalarKind, metric: MetricKind) -> FunctionBinding {
	FunctionBinding {
		name,
		arity: ANY_ARITY,
		evaluator: Evaluator::Dense {
			scalar,
			metric,
			scale: 1.0,
		},
	}
}

const BINDINGS: &[FunctionBinding] = &[
	FunctionBinding {
		name: "distance_haversine_meters",
		arity: ANY_ARITY,
		evaluator: Evaluator::Dense {
			scalar: ScalarKind::F64,
			metric: MetricKind::Haversine,
			scale: EARTH_MEAN_RADIUS_METERS,
		},
	},
	FunctionBinding {
		name: "distance_levenshtein",
		arity: 2,
		evaluator: Evaluator::Levenshtein,
	},
	dense("distance_hamming_binary", ScalarKind::B1x8, MetricKind::Hamming),
	dense("distance_jaccard_binary", ScalarKind::B1x8, MetricKind::Jaccard),
	dense("distance_haversine_f32", ScalarKind::F32, MetricKind::Haversine),
	dense("distance_haversine_f64", ScalarKind::F64, MetricKind::Haversine),
	dense("distance_sqeuclidean_f16", ScalarKind::F16, MetricKind::SqEuclidean),
	dense("distance_sqeuclidean_f32", ScalarKind::F32, MetricKind::SqEuclidean),
	dense("distance_sqeuclidean_f64", ScalarKind::F64, MetricKind::SqEuclidean),
	dense("distance_sqeuclidean_i8", ScalarKind::I8, MetricKind::SqEuclidean),
	dense("distance_cosine_f16", ScalarKind::F16, MetricKind::Cosine),
	dense("distance_cosine_f32", ScalarKind::F32, MetricKind::Cosine),
	dense("distance_cosine_f64", ScalarKind::F64, MetricKind::Cosine),
	dense("distance_cosine_i8", ScalarKind::I8, MetricKind::Cosine),
	dense("distance_inner_f16", ScalarKind::F16, MetricKind::Inner),
	dense("distance_inner_f32", ScalarKind::F32, MetricKind::Inner),
	dense("distance_inner_f64", ScalarKind::F64, MetricKind::Inner),
	dense("distance_inner_i8", ScalarKind::I8, MetricKind::Inner),
	dense("distance_divergence_f16", ScalarKind::F16, MetricKind::Divergence),
	dense("distance_divergence_f32", ScalarKind::F32, MetricKind::Divergence),
	dense("distance_divergence_f64", ScalarKind::F64, MetricKind::Divergence),
	dense("distance_divergence_i8", ScalarKind::I8, MetricKind::Divergence),
];

/// Register every distance function on `conn`.
///
/// All functions are deterministic and innocuous from the host's point of
/// view. The first registration failure propagates, so a connection either
/// gets the complete set or none of it takes effect for the caller.
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
	let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC | FunctionFlags::SQLITE_INNOCUOUS;

	for binding in BINDINGS {
		match binding.evaluator {
			Evaluator::Dense {
				scalar,
				metric,
				scale,
			} => {
				conn.create_scalar_function(binding.name, binding.arity, flags, move |ctx| {
					eval_dense(ctx, scalar, metric, scale)
				})?;
			}
			Evaluator::Levenshtein => {
				conn.create_scalar_function(binding.name, binding.arity, flags, |ctx| {
					eval_levenshtein(ctx)
				})?;
			}
		}
		tracing::debug!(function = binding.name, "registered distance function");
	}
	Ok(())
}

/// Remove every distance function from `conn`.
pub fn unregister(conn: &Connection) -> rusqlite::Result<()> {
	for binding in BINDINGS {
		conn.remove_function(binding.name, binding.arity)?;
		tracing::debug!(function = binding.name, "removed distance function");
	}
	Ok(())
}

fn eval_dense(ctx: &Context<'_>, scalar: ScalarKind, metric: MetricKind, scale: f64) -> rusqlite::Result<f64> {
	let args: SmallVec<[ValueRef<'_>; 8]> = (0..ctx.len()).map(|i| ctx.get_raw(i)).collect();
	let parsed = parse_pair(&args, scalar)?;

	let distance = match &parsed.operands {
		OperandPair::Packed {
			a,
			b,
		} => punned(scalar, metric, parsed.dimensions, a, b),
		OperandPair::F32 {
			a,
			b,
		} => dense_f32(metric, a, b),
		OperandPair::F64 {
			a,
			b,
		} => dense_f64(metric, a, b),
	};
	Ok(distance * scale)
}

fn eval_levenshtein(ctx: &Context<'_>) -> rusqlite::Result<i64> {
	// Arity 2 is enforced by the registration, so both arguments exist;
	// only their types need checking, before any allocation happens.
	let (ValueRef::Text(a), ValueRef::Text(b)) = (ctx.get_raw(0), ctx.get_raw(1)) else {
		return Err(DistanceError::LevenshteinArguments.into());
	};

	let cells = levenshtein::memory_needed(a.len(), b.len());
	let distance = scratch::with_scratch(|scratch| {
		let row = scratch.acquire(cells);
		levenshtein::bounded(a, b, LEVENSHTEIN_BOUND, row)
	});
	Ok(distance as i64)
}
