// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt;
use std::fmt::{Display, Formatter};

/// Distance function applied to two equal-dimension vectors.
///
/// The metric is fixed per registered SQL function, never negotiated per
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
	/// Bit-level Hamming distance over packed buffers; over typed
	/// elements, the count of unequal pairs.
	Hamming,
	/// Binary Jaccard distance `1 - |a & b| / |a | b|`; over typed
	/// elements, the weighted form `1 - sum(min) / sum(max)`.
	Jaccard,
	/// Squared Euclidean distance, no final square root.
	SqEuclidean,
	/// Cosine distance `1 - cos(a, b)`.
	Cosine,
	/// Raw inner product.
	Inner,
	/// Jensen-Shannon divergence between two distributions.
	Divergence,
	/// Great-circle distance on the unit sphere, operands in radians.
	Haversine,
}

impl Display for MetricKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			MetricKind::Hamming => f.write_str("hamming"),
			MetricKind::Jaccard => f.write_str("jaccard"),
			MetricKind::SqEuclidean => f.write_str("sqeuclidean"),
			MetricKind::Cosine => f.write_str("cosine"),
			MetricKind::Inner => f.write_str("inner"),
			MetricKind::Divergence => f.write_str("divergence"),
			MetricKind::Haversine => f.write_str("haversine"),
		}
	}
}
