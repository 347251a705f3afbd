//! The IntegrationField contains a 2D array of 16-bit values and it uses a [CostField] to
//! produce a cumulative cost of reaching the goal/target.
//!
//! When a new target needs to be processed the field is reset to `999` and the grid cell containing the goal is set to `0`. The goal is pushed into a first-in first-out queue and processed as an expanding wavefront:
//!
//! 1. Pop a cell from the queue and find its valid orthogonal neighbours (West, South, North, East, when not against a boundary)
//! 2. For each neighbour lookup its `CostField` value, impassable neighbours are skipped
//! 3. Add that cost to the `IntegrationField` value of the popped cell
//! 4. If the sum is cheaper than what the neighbour currently holds store it and push the neighbour onto the queue, a cell can be queued many times as cheaper routes to it are discovered
//!
//! Values only ever decrease and never go below `0` so the queue eventually drains. This produces a nice diamond-like pattern as the wave expands (the underlying `CostField` are set to `1` here):
//!
//! ```text
//!  _____________________________
//! |     |     |     |     |     |
//! |  4  |  3  |  2  |  3  |  4  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  3  |  2  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  2  |  1  |  0  |  1  |  2  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  3  |  2  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|_____|
//! ```
//!
//! Diagonal moves are not part of the wavefront, they are accounted for when the [FlowField] is derived.
//!
//! Cells that cannot be reached keep `999`. The sentinel doubles as the search horizon, a route whose total would reach `999` is never recorded.
//!

use std::collections::VecDeque;

use crate::prelude::*;
use bevy::prelude::*;

/// Cumulative cost from each cell to the target, see the module documentation
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct IntegrationField {
	/// Size of the grid the field covers
	dimensions: GridDimensions,
	/// Cost-to-goal of each cell, indexed by [GridDimensions::get_index]
	cells: Vec<u16>,
}

impl Field<u16> for IntegrationField {
	/// Get a reference to the field array
	fn get_field(&self) -> &[u16] {
		&self.cells
	}
	/// Get the dimensions of the field
	fn get_dimensions(&self) -> GridDimensions {
		self.dimensions
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, field_cell: FieldCell) -> u16 {
		assert_in_bounds("IntegrationField", self.dimensions, field_cell);
		self.cells[self.dimensions.get_index(field_cell)]
	}
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: u16, field_cell: FieldCell) {
		assert_in_bounds("IntegrationField", self.dimensions, field_cell);
		let index = self.dimensions.get_index(field_cell);
		self.cells[index] = value;
	}
}

impl IntegrationField {
	/// Creates a new [IntegrationField] where all cells are set to [UNREACHED]
	pub fn new(dimensions: GridDimensions) -> Self {
		IntegrationField {
			dimensions,
			cells: vec![UNREACHED; dimensions.get_cell_count()],
		}
	}
	/// Reset all the cells of the [IntegrationField] to [UNREACHED] apart from the `target` which is set to `0`
	pub fn reset(&mut self, target: FieldCell) {
		self.cells.fill(UNREACHED);
		self.set_field_cell_value(0, target);
	}
	/// Reset the field and expand a wavefront from `target` across the `cost_field`
	pub fn calculate_field(&mut self, target: FieldCell, cost_field: &CostField) {
		self.reset(target);
		let dimensions = self.dimensions;
		let mut queue = VecDeque::new();
		queue.push_back(target);
		while let Some(current) = queue.pop_front() {
			let current_int_cost = self.cells[dimensions.get_index(current)] as u32;
			for (_ord, n) in dimensions.get_orthogonal_cell_neighbours(current) {
				let cell_cost = cost_field.get_field_cell_value(n);
				// ignore impassable cells
				if cell_cost == IMPASSABLE_COST {
					continue;
				}
				let index = dimensions.get_index(n);
				let int_cost = current_int_cost + cell_cost as u32;
				if int_cost < self.cells[index] as u32 {
					self.cells[index] = int_cost as u16;
					queue.push_back(n);
				}
			}
		}
	}
	/// Whether the wavefront reached the cell
	pub fn is_reached(&self, field_cell: FieldCell) -> bool {
		self.get_field_cell_value(field_cell) < UNREACHED
	}
}
