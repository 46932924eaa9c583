// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process-wide reusable scratch buffer.
//!
//! Edit-distance calls need working memory proportional to their input; the
//! buffer is grown to the largest request seen so far and reused across
//! calls instead of reallocating per row. SQLite serializes calls within a
//! connection but says nothing across connections, so the buffer lives
//! behind a mutex. Capacity only ever grows until [`teardown`] releases it.

use parking_lot::Mutex;

/// A single growable buffer of u32 distance cells.
///
/// Two states: *empty* (nothing held, the state after [`Scratch::release`])
/// and *held*. Contents are overwritten by each caller; only capacity
/// survives between calls.
pub struct Scratch {
	cells: Vec<u32>,
}

impl Scratch {
	const fn new() -> Self {
		Self {
			cells: Vec::new(),
		}
	}

	/// Borrow at least `cells` cells, growing the buffer if undersized.
	pub fn acquire(&mut self, cells: usize) -> &mut [u32] {
		if self.cells.len() < cells {
			self.cells.resize(cells, 0);
		}
		&mut self.cells[..cells]
	}

	/// Cells currently held.
	pub fn held_cells(&self) -> usize {
		self.cells.len()
	}

	/// Drop the buffer, returning to the empty state.
	pub fn release(&mut self) {
		self.cells = Vec::new();
	}
}

static SCRATCH: Mutex<Scratch> = Mutex::new(Scratch::new());

/// Run `f` with exclusive access to the process-wide scratch buffer.
pub fn with_scratch<R>(f: impl FnOnce(&mut Scratch) -> R) -> R {
	f(&mut SCRATCH.lock())
}

/// Release the process-wide scratch buffer.
///
/// Intended for extension teardown, after the last connection using the
/// distance functions is gone. Idempotent; a later call simply regrows the
/// buffer.
pub fn teardown() {
	let mut scratch = SCRATCH.lock();
	tracing::debug!(cells = scratch.held_cells(), "releasing distance scratch buffer");
	scratch.release();
}
