//! A [FlowField] is a 2D array of [Ordinal] directions. Each cell points at the neighbour which
//! is the locally cheapest step towards the goal according to an [IntegrationField]. A steering
//! pipeline/character controller should read and interpret a [FlowField] to provide movement.
//!
//! For each cell all 8 neighbours are inspected in the order West, South, North, East,
//! North-West, North-East, South-West, South-East. The effective cost of a neighbour is its
//! integration value with `sqrt(2) - 1` added when the neighbour is orthogonal, so a diagonal
//! neighbour wins a tie against an orthogonal one. The first neighbour that is strictly cheaper
//! than everything before it (starting from the `999` sentinel) is chosen.
//!
//! ```text
//!  _________________
//! |     |     |     |
//! |  ↘  |  ↓  |  ↙  |
//! |_____|_____|_____|
//! |     |     |     |
//! |  →  |  ←  |  ←  |
//! |_____|_____|_____|
//! |     |     |     |
//! |  ↗  |  ↑  |  ↖  |
//! |_____|_____|_____|
//! ```
//!
//! A cell whose neighbours are all unreached keeps [Ordinal::Zero], which an actor should read as
//! "no guidance available". The goal itself points at its cheapest neighbour as it has no
//! neighbour cheaper than itself.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Directions of movement towards the target, see the module documentation
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct FlowField {
	/// Size of the grid the field covers
	dimensions: GridDimensions,
	/// Direction of each cell, indexed by [GridDimensions::get_index]
	cells: Vec<Ordinal>,
}

impl Field<Ordinal> for FlowField {
	/// Get a reference to the field array
	fn get_field(&self) -> &[Ordinal] {
		&self.cells
	}
	/// Get the dimensions of the field
	fn get_dimensions(&self) -> GridDimensions {
		self.dimensions
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, field_cell: FieldCell) -> Ordinal {
		assert_in_bounds("FlowField", self.dimensions, field_cell);
		self.cells[self.dimensions.get_index(field_cell)]
	}
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: Ordinal, field_cell: FieldCell) {
		assert_in_bounds("FlowField", self.dimensions, field_cell);
		let index = self.dimensions.get_index(field_cell);
		self.cells[index] = value;
	}
}

impl FlowField {
	/// Create a new [FlowField] with no directions
	pub fn new(dimensions: GridDimensions) -> Self {
		FlowField {
			dimensions,
			cells: vec![Ordinal::Zero; dimensions.get_cell_count()],
		}
	}
	/// Calculate the [FlowField] from an [IntegrationField] of the same dimensions
	pub fn calculate(&mut self, integration_field: &IntegrationField) {
		let dimensions = self.dimensions;
		self.cells.fill(Ordinal::Zero);
		for field_cell in dimensions.iter_field_cells() {
			let mut cheapest_value = UNREACHED as f32;
			let mut cheapest_ordinal = Ordinal::Zero;
			for (ord, n) in dimensions.get_all_cell_neighbours(field_cell) {
				let mut cost = integration_field.get_field_cell_value(n) as f32;
				if ord.is_orthogonal() {
					cost += DIAGONAL_WEIGHT;
				}
				if cost < cheapest_value {
					cheapest_value = cost;
					cheapest_ordinal = ord;
				}
			}
			self.cells[dimensions.get_index(field_cell)] = cheapest_ordinal;
		}
	}
	/// Direction of a cell as a unit grid step, [IVec2::ZERO] when it has no direction
	pub fn get_direction(&self, field_cell: FieldCell) -> IVec2 {
		self.get_field_cell_value(field_cell).to_ivec2()
	}
}
