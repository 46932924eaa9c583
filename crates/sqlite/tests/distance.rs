// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! End-to-end checks of the SQL surface: every encoding strategy, the fixed
//! error messages, and the scratch-buffer lifecycle, driven through an
//! in-memory connection.

use reifydb_distance_sqlite::{EARTH_MEAN_RADIUS_METERS, register, teardown, unregister};
use rusqlite::Connection;
use rusqlite::params;

fn connection() -> Connection {
	let conn = Connection::open_in_memory().expect("in-memory database");
	register(&conn).expect("register distance functions");
	conn
}

fn f32_blob(values: &[f32]) -> Vec<u8> {
	values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn f64_blob(values: &[f64]) -> Vec<u8> {
	values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn query_f64(conn: &Connection, sql: &str) -> f64 {
	conn.query_row(sql, [], |row| row.get(0)).expect("query")
}

fn query_err(conn: &Connection, sql: &str) -> String {
	conn.query_row(sql, [], |row| row.get::<_, f64>(0)).expect_err("query should fail").to_string()
}

#[test]
fn test_blob_pair_sqeuclidean_f32() {
	let conn = connection();
	let d: f64 = conn
		.query_row(
			"SELECT distance_sqeuclidean_f32(?1, ?2)",
			params![f32_blob(&[1.0, 0.0, 0.0, 0.0]), f32_blob(&[0.0, 1.0, 0.0, 0.0])],
			|row| row.get(0),
		)
		.unwrap();
	assert_eq!(d, 2.0);
}

#[test]
fn test_blob_pair_sqeuclidean_f64() {
	let conn = connection();
	let d: f64 = conn
		.query_row(
			"SELECT distance_sqeuclidean_f64(?1, ?2)",
			params![f64_blob(&[1.0, 2.0]), f64_blob(&[4.0, 6.0])],
			|row| row.get(0),
		)
		.unwrap();
	assert_eq!(d, 25.0);
}

#[test]
fn test_blob_pair_inner_i8() {
	let conn = connection();
	let d: f64 = conn
		.query_row(
			"SELECT distance_inner_i8(?1, ?2)",
			params![vec![1u8, 2u8], vec![3u8, 4u8]],
			|row| row.get(0),
		)
		.unwrap();
	assert_eq!(d, 11.0);
}

#[test]
fn test_blob_pair_sqeuclidean_f16() {
	let conn = connection();
	// Half-precision 1.0 is 0x3C00, little-endian on the wire.
	let a: Vec<u8> = vec![0x00, 0x3C, 0x00, 0x00];
	let b: Vec<u8> = vec![0x00, 0x00, 0x00, 0x3C];
	let d: f64 = conn
		.query_row("SELECT distance_sqeuclidean_f16(?1, ?2)", params![a, b], |row| row.get(0))
		.unwrap();
	assert_eq!(d, 2.0);
}

#[test]
fn test_blob_pair_length_mismatch() {
	let conn = connection();
	let err = conn
		.query_row(
			"SELECT distance_sqeuclidean_f32(?1, ?2)",
			params![f32_blob(&[1.0, 2.0]), f32_blob(&[1.0, 2.0, 3.0])],
			|row| row.get::<_, f64>(0),
		)
		.expect_err("length mismatch")
		.to_string();
	assert!(err.contains("Vectors have different number of dimensions"), "{err}");
}

#[test]
fn test_hamming_binary_blobs() {
	let conn = connection();
	let d: f64 = conn
		.query_row(
			"SELECT distance_hamming_binary(?1, ?2)",
			params![vec![0b1011_0000u8], vec![0b1001_0000u8]],
			|row| row.get(0),
		)
		.unwrap();
	assert_eq!(d, 1.0);
}

#[test]
fn test_jaccard_binary_blobs() {
	let conn = connection();
	let d: f64 = conn
		.query_row(
			"SELECT distance_jaccard_binary(?1, ?2)",
			params![vec![0b0000_1100u8], vec![0b0000_1010u8]],
			|row| row.get(0),
		)
		.unwrap();
	assert!((d - (1.0 - 1.0 / 3.0)).abs() < 1e-12, "{d}");
}

#[test]
fn test_text_pair_cosine_whitespace_insensitive() {
	let conn = connection();
	let d = query_f64(&conn, "SELECT distance_cosine_f32('[1, 2, 3]', '[1,2,3]')");
	assert!(d.abs() < 1e-6, "{d}");
}

#[test]
fn test_text_pair_dimension_mismatch() {
	let conn = connection();
	let err = query_err(&conn, "SELECT distance_cosine_f32('[1,2]', '[1,2,3]')");
	assert!(err.contains("Vectors have different number of dimensions"), "{err}");
}

#[test]
fn test_text_pair_malformed_literal() {
	let conn = connection();
	let err = query_err(&conn, "SELECT distance_cosine_f32('[1, x, 3]', '[1,2,3]')");
	assert!(err.contains("Number can't be parsed"), "{err}");
}

#[test]
fn test_text_pair_nan_result_becomes_null() {
	let conn = connection();
	// NaN operands parse fine and propagate; SQLite itself renders a NaN
	// result as NULL.
	let d: Option<f64> = conn
		.query_row("SELECT distance_inner_f32('[NaN]', '[1]')", [], |row| row.get(0))
		.unwrap();
	assert_eq!(d, None);
}

#[test]
fn test_column_tuple_inner() {
	let conn = connection();
	let d = query_f64(&conn, "SELECT distance_inner_i8(1, 2, 3, 4)");
	assert_eq!(d, 11.0);
}

#[test]
fn test_column_tuple_null_counts_as_zero() {
	let conn = connection();
	let d = query_f64(&conn, "SELECT distance_inner_f64(1, NULL, 2, 2)");
	assert_eq!(d, 2.0);
}

#[test]
fn test_column_tuple_rejects_text() {
	let conn = connection();
	let err = query_err(&conn, "SELECT distance_inner_f64(1, 'x', 2, 3)");
	assert!(err.contains("Scalar columns may only contain integers, floats, or NULLs"), "{err}");
}

#[test]
fn test_odd_argument_count() {
	let conn = connection();
	let err = query_err(&conn, "SELECT distance_sqeuclidean_f32(1, 2, 3)");
	assert!(err.contains("divisible by two"), "{err}");
}

#[test]
fn test_single_argument() {
	let conn = connection();
	let err = query_err(&conn, "SELECT distance_sqeuclidean_f32('[1,2]')");
	assert!(err.contains("at least two arguments"), "{err}");
}

#[test]
fn test_encodings_agree_on_the_same_vectors() {
	let conn = connection();
	let from_text = query_f64(&conn, "SELECT distance_cosine_f32('[1,2,3]', '[4,5,6]')");
	let from_columns = query_f64(&conn, "SELECT distance_cosine_f32(1, 2, 3, 4, 5, 6)");
	let from_blobs: f64 = conn
		.query_row(
			"SELECT distance_cosine_f32(?1, ?2)",
			params![f32_blob(&[1.0, 2.0, 3.0]), f32_blob(&[4.0, 5.0, 6.0])],
			|row| row.get(0),
		)
		.unwrap();
	assert!((from_text - from_columns).abs() < 1e-6);
	assert!((from_text - from_blobs).abs() < 1e-6);
}

#[test]
fn test_haversine_meters_is_scaled_unit_distance() {
	let conn = connection();
	let raw = query_f64(&conn, "SELECT distance_haversine_f64('[0.7, -1.2]', '[0.8, -1.1]')");
	let meters = query_f64(&conn, "SELECT distance_haversine_meters('[0.7, -1.2]', '[0.8, -1.1]')");
	assert!((meters - raw * EARTH_MEAN_RADIUS_METERS).abs() < 1e-6, "{meters} vs {raw}");
}

#[test]
fn test_haversine_meters_quarter_circle() {
	let conn = connection();
	let d = query_f64(&conn, "SELECT distance_haversine_meters(0, 0, 0, 1.5707963267948966)");
	let expected = std::f64::consts::FRAC_PI_2 * EARTH_MEAN_RADIUS_METERS;
	assert!((d - expected).abs() < 1e-3, "{d} vs {expected}");
}

#[test]
fn test_levenshtein_kitten_sitting() {
	let conn = connection();
	let d: i64 = conn
		.query_row("SELECT distance_levenshtein('kitten', 'sitting')", [], |row| row.get(0))
		.unwrap();
	assert_eq!(d, 3);
}

#[test]
fn test_levenshtein_symmetry_and_identity() {
	let conn = connection();
	let forward: i64 = conn
		.query_row("SELECT distance_levenshtein('flaw', 'lawn')", [], |row| row.get(0))
		.unwrap();
	let backward: i64 = conn
		.query_row("SELECT distance_levenshtein('lawn', 'flaw')", [], |row| row.get(0))
		.unwrap();
	assert_eq!(forward, backward);

	let same: i64 = conn
		.query_row("SELECT distance_levenshtein('reify', 'reify')", [], |row| row.get(0))
		.unwrap();
	assert_eq!(same, 0);
}

#[test]
fn test_levenshtein_empty_operand() {
	let conn = connection();
	let d: i64 = conn
		.query_row("SELECT distance_levenshtein('', 'abc')", [], |row| row.get(0))
		.unwrap();
	assert_eq!(d, 3);
}

#[test]
fn test_levenshtein_caps_at_255() {
	let conn = connection();
	let long = "a".repeat(300);
	let d: i64 = conn
		.query_row("SELECT distance_levenshtein('', ?1)", params![long], |row| row.get(0))
		.unwrap();
	assert_eq!(d, 255);
}

#[test]
fn test_levenshtein_rejects_non_text() {
	let conn = connection();
	let err = conn
		.query_row("SELECT distance_levenshtein(1, 'abc')", [], |row| row.get::<_, i64>(0))
		.expect_err("type error")
		.to_string();
	assert!(err.contains("expects two text arguments"), "{err}");
}

#[test]
fn test_teardown_is_idempotent_and_recoverable() {
	let conn = connection();
	let d: i64 = conn
		.query_row("SELECT distance_levenshtein('abc', 'abd')", [], |row| row.get(0))
		.unwrap();
	assert_eq!(d, 1);

	teardown();
	teardown();

	// The scratch buffer regrows on demand after teardown.
	let d: i64 = conn
		.query_row("SELECT distance_levenshtein('abc', 'axc')", [], |row| row.get(0))
		.unwrap();
	assert_eq!(d, 1);
}

#[test]
fn test_unregister_removes_all_functions() {
	let conn = connection();
	unregister(&conn).unwrap();
	let err = conn
		.query_row("SELECT distance_cosine_f32('[1]', '[1]')", [], |row| row.get::<_, f64>(0))
		.expect_err("function should be gone")
		.to_string();
	assert!(err.contains("no such function"), "{err}");
}
