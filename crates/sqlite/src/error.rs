// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Argument rejection raised before any kernel invocation.
///
/// Every variant carries a fixed, host-visible message; nothing is coerced
/// or retried. The messages are part of the SQL-facing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DistanceError {
	#[error("Distance function expects at least two arguments")]
	NotEnoughArguments,

	#[error("Number of columns in two vectors must be divisible by two")]
	UnsupportedShape,

	#[error("Vectors have different number of dimensions")]
	DimensionMismatch,

	#[error("Number can't be parsed")]
	NumberNotParsable,

	#[error("Scalar columns may only contain integers, floats, or NULLs")]
	ScalarColumnType,

	#[error("Levenshtein distance function expects two text arguments")]
	LevenshteinArguments,
}

impl From<DistanceError> for rusqlite::Error {
	fn from(err: DistanceError) -> Self {
		rusqlite::Error::UserFunctionError(Box::new(err))
	}
}
