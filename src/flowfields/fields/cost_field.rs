//! The CostField contains a 2D array of 8-bit values. The values correspond to the cost of that
//! cell in the array. A value of 1 is the default, a value of 255 is a special case that idicates
//! that the field cell is strictly forbidden from being used in a pathing calculation (effectively
//! saying there is a wall or cliff/impassable terrain there). Any other value indicates a harder
//! cost of movement.
//!
//! The field is derived from the terrain classification of each cell:
//!
//! * kind `0`, open ground, costs `1`
//! * kind `1`, difficult ground, costs `3`
//! * kind `2`, a wall, costs `255`
//!
//! Open ground that touches a wall in any of its 8 directions costs an extra `5` so that paths
//! prefer to keep some distance from obstacles. An example cost field with a wall segment may look:
//!
//! ```text
//!  _______________________________________
//! |     |     |     |     |     |     |     |
//! |  1  |  1  |  1  |  1  |  1  |  1  |  1  |
//! |_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |
//! |  1  |  6  |  6  |  6  |  6  |  6  |  1  |
//! |_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |
//! |  1  |  6  | 255 | 255 | 255 |  6  |  1  |
//! |_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |
//! |  1  |  6  |  6  |  6  |  6  |  6  |  3  |
//! |_____|_____|_____|_____|_____|_____|_____|
//! ```
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Per cell traversal cost, see the module documentation
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct CostField {
	/// Size of the grid the field covers
	dimensions: GridDimensions,
	/// Cost of each cell, indexed by [GridDimensions::get_index]
	cells: Vec<u8>,
}

impl Field<u8> for CostField {
	/// Get a reference to the field array
	fn get_field(&self) -> &[u8] {
		&self.cells
	}
	/// Get the dimensions of the field
	fn get_dimensions(&self) -> GridDimensions {
		self.dimensions
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, field_cell: FieldCell) -> u8 {
		assert_in_bounds("CostField", self.dimensions, field_cell);
		self.cells[self.dimensions.get_index(field_cell)]
	}
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: u8, field_cell: FieldCell) {
		assert_in_bounds("CostField", self.dimensions, field_cell);
		let index = self.dimensions.get_index(field_cell);
		self.cells[index] = value;
	}
}

impl CostField {
	/// Create a new [CostField] where every cell is open ground
	pub fn new(dimensions: GridDimensions) -> Self {
		CostField {
			dimensions,
			cells: vec![NORMAL_COST; dimensions.get_cell_count()],
		}
	}
	/// Create a new [CostField] already derived from `terrain`
	pub fn from_terrain(dimensions: GridDimensions, terrain: &impl TerrainLookup) -> Self {
		let mut field = CostField::new(dimensions);
		field.rebuild(terrain);
		field
	}
	/// Recalculate every cell from the terrain classification. Cells outside the grid are never
	/// asked for, a cell along the boundary simply has fewer neighbours to inspect
	pub fn rebuild(&mut self, terrain: &impl TerrainLookup) {
		let dimensions = self.dimensions;
		for field_cell in dimensions.iter_field_cells() {
			let (column, row) = field_cell.get_column_row();
			let mut cost = TerrainKind::from_kind(terrain.classify(column, row)).get_base_cost();
			if cost == NORMAL_COST {
				let touches_wall = dimensions
					.get_all_cell_neighbours(field_cell)
					.any(|(_, n)| {
						TerrainKind::from_kind(terrain.classify(n.get_column(), n.get_row()))
							== TerrainKind::Impassable
					});
				if touches_wall {
					cost += WALL_PROXIMITY_PENALTY;
				}
			}
			self.cells[dimensions.get_index(field_cell)] = cost;
		}
		trace!("Rebuilt CostField of {} cells", self.cells.len());
	}
	/// Whether a cell can never be pathed through
	pub fn is_impassable(&self, field_cell: FieldCell) -> bool {
		self.get_field_cell_value(field_cell) == IMPASSABLE_COST
	}
}
