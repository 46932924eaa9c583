// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Dense vector distance kernels.
//!
//! [`punned`] is the type-erased entry point: it decodes raw little-endian
//! buffers according to a [`ScalarKind`] and reduces them in one pass.
//! [`dense_f32`] and [`dense_f64`] skip the decoding step for operands that
//! were parsed out of text or scalar columns.

use crate::{MetricKind, ScalarKind, f16_to_f32};

/// Compute the distance between two raw vector buffers.
///
/// `dims` is the number of logical elements; the caller derives it from the
/// buffer length and the scalar kind. Both buffers must hold at least `dims`
/// elements of `scalar`. Zero dimensions are not special-cased; each metric
/// reduces its empty stream to whatever its accumulator yields.
pub fn punned(scalar: ScalarKind, metric: MetricKind, dims: usize, a: &[u8], b: &[u8]) -> f64 {
	match scalar {
		ScalarKind::B1x8 => match metric {
			MetricKind::Hamming => hamming_packed(a, b),
			MetricKind::Jaccard => jaccard_packed(a, b),
			_ => reduce(metric, (0..dims).map(|i| (bit_at(a, i), bit_at(b, i)))),
		},
		ScalarKind::I8 => reduce(metric, (0..dims).map(|i| (a[i] as i8 as f64, b[i] as i8 as f64))),
		ScalarKind::F16 => reduce(metric, (0..dims).map(|i| (f16_at(a, i), f16_at(b, i)))),
		ScalarKind::F32 => reduce(metric, (0..dims).map(|i| (f32_at(a, i), f32_at(b, i)))),
		ScalarKind::F64 => reduce(metric, (0..dims).map(|i| (f64_at(a, i), f64_at(b, i)))),
	}
}

/// Distance between two single-precision slices.
pub fn dense_f32(metric: MetricKind, a: &[f32], b: &[f32]) -> f64 {
	reduce(metric, a.iter().zip(b.iter()).map(|(&x, &y)| (x as f64, y as f64)))
}

/// Distance between two double-precision slices.
pub fn dense_f64(metric: MetricKind, a: &[f64], b: &[f64]) -> f64 {
	reduce(metric, a.iter().zip(b.iter()).map(|(&x, &y)| (x, y)))
}

fn bit_at(buf: &[u8], i: usize) -> f64 {
	((buf[i / 8] >> (i % 8)) & 1) as f64
}

fn f16_at(buf: &[u8], i: usize) -> f64 {
	f16_to_f32(u16::from_le_bytes([buf[2 * i], buf[2 * i + 1]])) as f64
}

fn f32_at(buf: &[u8], i: usize) -> f64 {
	f32::from_le_bytes([buf[4 * i], buf[4 * i + 1], buf[4 * i + 2], buf[4 * i + 3]]) as f64
}

fn f64_at(buf: &[u8], i: usize) -> f64 {
	f64::from_le_bytes([
		buf[8 * i],
		buf[8 * i + 1],
		buf[8 * i + 2],
		buf[8 * i + 3],
		buf[8 * i + 4],
		buf[8 * i + 5],
		buf[8 * i + 6],
		buf[8 * i + 7],
	])
}

/// Single-pass reduction of an element-pair stream under `metric`.
fn reduce(metric: MetricKind, pairs: impl Iterator<Item = (f64, f64)>) -> f64 {
	match metric {
		MetricKind::Hamming => pairs.filter(|(x, y)| x != y).count() as f64,
		MetricKind::Jaccard => {
			let mut mins = 0.0;
			let mut maxs = 0.0;
			for (x, y) in pairs {
				mins += x.min(y);
				maxs += x.max(y);
			}
			if maxs == 0.0 { 0.0 } else { 1.0 - mins / maxs }
		}
		MetricKind::SqEuclidean => pairs.map(|(x, y)| (x - y) * (x - y)).sum(),
		MetricKind::Cosine => {
			let mut dot = 0.0;
			let mut norm_a = 0.0;
			let mut norm_b = 0.0;
			for (x, y) in pairs {
				dot += x * y;
				norm_a += x * x;
				norm_b += y * y;
			}
			if norm_a == 0.0 && norm_b == 0.0 {
				0.0
			} else if norm_a == 0.0 || norm_b == 0.0 {
				1.0
			} else {
				1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())
			}
		}
		MetricKind::Inner => pairs.map(|(x, y)| x * y).sum(),
		MetricKind::Divergence => {
			// Jensen-Shannon divergence; zero-probability terms
			// contribute nothing.
			let mut sum = 0.0;
			for (p, q) in pairs {
				let m = 0.5 * (p + q);
				if m > 0.0 {
					if p > 0.0 {
						sum += 0.5 * p * (p / m).ln();
					}
					if q > 0.0 {
						sum += 0.5 * q * (q / m).ln();
					}
				}
			}
			sum
		}
		MetricKind::Haversine => {
			let mut pairs = pairs;
			let (lat_a, lat_b) = pairs.next().unwrap_or((0.0, 0.0));
			let (lon_a, lon_b) = pairs.next().unwrap_or((0.0, 0.0));
			haversine(lat_a, lon_a, lat_b, lon_b)
		}
	}
}

fn hamming_packed(a: &[u8], b: &[u8]) -> f64 {
	a.iter().zip(b.iter()).map(|(&x, &y)| (x ^ y).count_ones() as u64).sum::<u64>() as f64
}

fn jaccard_packed(a: &[u8], b: &[u8]) -> f64 {
	let mut intersection = 0u64;
	let mut union = 0u64;
	for (&x, &y) in a.iter().zip(b.iter()) {
		intersection += (x & y).count_ones() as u64;
		union += (x | y).count_ones() as u64;
	}
	if union == 0 { 0.0 } else { 1.0 - intersection as f64 / union as f64 }
}

/// Great-circle distance on the unit sphere, coordinates in radians.
fn haversine(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
	let half_dlat = 0.5 * (lat_b - lat_a);
	let half_dlon = 0.5 * (lon_b - lon_a);
	let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlon.sin().powi(2);
	2.0 * h.sqrt().min(1.0).asin()
}
