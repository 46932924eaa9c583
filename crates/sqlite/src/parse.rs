// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Argument-shape dispatch and operand parsing.
//!
//! A distance call arrives as a slice of dynamically typed SQLite values.
//! Exactly one parsing strategy is selected from the argument shape:
//!
//! 1. two BLOBs: the buffers already hold packed vectors of the declared
//!    scalar kind and are borrowed as-is;
//! 2. two TEXTs: each operand is a human-readable array like `[1, 2, 3]`,
//!    parsed into a heap buffer;
//! 3. an even number of scalar columns, split positionally into two halves.
//!
//! Anything else is rejected before an output buffer exists. Dimension
//! mismatches are always terminal, never padded or truncated.

use reifydb_distance_kernel::ScalarKind;
use rusqlite::types::ValueRef;

use crate::error::DistanceError;

/// Two operands in a uniform representation.
///
/// Blob operands stay borrowed from the host call; textual and column
/// operands are parsed into owned buffers of the scalar kind's parse target
/// (f64 functions parse at double precision, all others at single).
#[derive(Debug)]
pub enum OperandPair<'a> {
	Packed {
		a: &'a [u8],
		b: &'a [u8],
	},
	F32 {
		a: Vec<f32>,
		b: Vec<f32>,
	},
	F64 {
		a: Vec<f64>,
		b: Vec<f64>,
	},
}

/// A validated operand pair plus the dimension both sides share.
#[derive(Debug)]
pub struct ParsedPair<'a> {
	pub dimensions: usize,
	pub operands: OperandPair<'a>,
}

/// Select a parsing strategy for `args` and run it.
pub fn parse_pair<'a>(args: &[ValueRef<'a>], scalar: ScalarKind) -> Result<ParsedPair<'a>, DistanceError> {
	if args.len() < 2 {
		return Err(DistanceError::NotEnoughArguments);
	}
	match (args.len(), args[0], args[1]) {
		(2, ValueRef::Blob(a), ValueRef::Blob(b)) => binary_pair(a, b, scalar),
		(2, ValueRef::Text(a), ValueRef::Text(b)) => text_pair(a, b, scalar),
		_ if args.len() % 2 == 0 => column_tuple(args, scalar),
		_ => Err(DistanceError::UnsupportedShape),
	}
}

fn binary_pair<'a>(a: &'a [u8], b: &'a [u8], scalar: ScalarKind) -> Result<ParsedPair<'a>, DistanceError> {
	if a.len() != b.len() {
		return Err(DistanceError::DimensionMismatch);
	}
	let dimensions = a.len() * 8 / scalar.bits_per_scalar();
	Ok(ParsedPair {
		dimensions,
		operands: OperandPair::Packed {
			a,
			b,
		},
	})
}

/// Parse two delimited textual arrays.
///
/// Commas are counted up front so a length mismatch fails before either
/// output buffer is allocated.
fn text_pair<'a>(a: &[u8], b: &[u8], scalar: ScalarKind) -> Result<ParsedPair<'a>, DistanceError> {
	let commas_a = a.iter().filter(|&&c| c == b',').count();
	let commas_b = b.iter().filter(|&&c| c == b',').count();
	if commas_a != commas_b {
		return Err(DistanceError::DimensionMismatch);
	}

	let dimensions = commas_a + 1;
	let operands = match scalar.parsed() {
		ScalarKind::F64 => OperandPair::F64 {
			a: parse_literals(a, dimensions)?,
			b: parse_literals(b, dimensions)?,
		},
		_ => OperandPair::F32 {
			a: parse_literals(a, dimensions)?,
			b: parse_literals(b, dimensions)?,
		},
	};
	Ok(ParsedPair {
		dimensions,
		operands,
	})
}

/// Parse `dimensions` numeric literals out of one textual operand.
///
/// An optional leading `[` is stripped; `]` terminates a literal like any
/// other delimiter and needs no stripping of its own. Literals go through
/// `str::parse`, so `inf` and `NaN` pass and propagate to the kernel.
fn parse_literals<T: std::str::FromStr>(text: &[u8], dimensions: usize) -> Result<Vec<T>, DistanceError> {
	let mut rest = text;
	if rest.first() == Some(&b'[') {
		rest = &rest[1..];
	}

	let mut out = Vec::with_capacity(dimensions);
	for _ in 0..dimensions {
		while rest.first().is_some_and(|c| c.is_ascii_whitespace()) {
			rest = &rest[1..];
		}

		let end = rest
			.iter()
			.position(|&c| c == b',' || c == b']' || c.is_ascii_whitespace())
			.unwrap_or(rest.len());
		let literal = std::str::from_utf8(&rest[..end]).map_err(|_| DistanceError::NumberNotParsable)?;
		out.push(literal.parse().map_err(|_| DistanceError::NumberNotParsable)?);
		rest = &rest[end..];

		// The separating comma is optional for the final element.
		while rest.first().is_some_and(|c| *c == b',' || c.is_ascii_whitespace()) {
			rest = &rest[1..];
		}
	}
	Ok(out)
}

/// Split an even argument list positionally into two halves of scalars.
fn column_tuple<'a>(args: &[ValueRef<'a>], scalar: ScalarKind) -> Result<ParsedPair<'a>, DistanceError> {
	let dimensions = args.len() / 2;
	let operands = match scalar.parsed() {
		ScalarKind::F64 => {
			let mut a = Vec::with_capacity(dimensions);
			let mut b = Vec::with_capacity(dimensions);
			for i in 0..dimensions {
				a.push(column_value(args[i])?);
				b.push(column_value(args[dimensions + i])?);
			}
			OperandPair::F64 {
				a,
				b,
			}
		}
		_ => {
			let mut a = Vec::with_capacity(dimensions);
			let mut b = Vec::with_capacity(dimensions);
			for i in 0..dimensions {
				a.push(column_value(args[i])? as f32);
				b.push(column_value(args[dimensions + i])? as f32);
			}
			OperandPair::F32 {
				a,
				b,
			}
		}
	};
	Ok(ParsedPair {
		dimensions,
		operands,
	})
}

/// A single scalar column; NULL maps to the zero of the target kind.
fn column_value(arg: ValueRef<'_>) -> Result<f64, DistanceError> {
	match arg {
		ValueRef::Integer(v) => Ok(v as f64),
		ValueRef::Real(v) => Ok(v),
		ValueRef::Null => Ok(0.0),
		_ => Err(DistanceError::ScalarColumnType),
	}
}
