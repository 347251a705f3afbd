//! Useful structures and tools used by the fields
//!

use bevy::prelude::*;

use crate::prelude::*;

/// A [CostField] value marking a cell which can never be pathed through
pub const IMPASSABLE_COST: u8 = 255;
/// [CostField] value of open ground
pub const NORMAL_COST: u8 = 1;
/// [CostField] value of difficult ground
pub const DIFFICULT_COST: u8 = 3;
/// Added to open ground that touches an impassable cell so that paths avoid hugging walls
pub const WALL_PROXIMITY_PENALTY: u8 = 5;
/// [IntegrationField] value of a cell the wavefront has not reached
pub const UNREACHED: u16 = 999;
/// Added to orthogonal candidates when deriving a [FlowField] direction
pub const DIAGONAL_WEIGHT: f32 = std::f32::consts::SQRT_2 - 1.0;
/// World units spanned by one side of a grid cell unless configured otherwise
pub const DEFAULT_CELL_SIZE: f32 = 32.0;

/// Convenience way of accessing the 4 sides of a grid cell in [IntegrationField] and the 8 directions
/// of movement in [FlowField]
///
/// Rows grow southwards so [Ordinal::North] is `(0, -1)`
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash, Reflect)]
pub enum Ordinal {
	North,
	East,
	South,
	West,
	NorthEast,
	SouthEast,
	SouthWest,
	NorthWest,
	/// Special case, used to indicate a cell of the [FlowField] with no direction
	#[default]
	Zero,
}

impl Ordinal {
	/// Orthogonal directions in the order the wavefront expands through them
	pub const ORTHOGONAL: [Ordinal; 4] =
		[Ordinal::West, Ordinal::South, Ordinal::North, Ordinal::East];
	/// All directions of movement in the order a [FlowField] inspects them, the first cheapest wins
	pub const ALL: [Ordinal; 8] = [
		Ordinal::West,
		Ordinal::South,
		Ordinal::North,
		Ordinal::East,
		Ordinal::NorthWest,
		Ordinal::NorthEast,
		Ordinal::SouthWest,
		Ordinal::SouthEast,
	];
	/// Unit grid step of the direction, `(column, row)`
	pub fn to_ivec2(&self) -> IVec2 {
		match self {
			Ordinal::North => IVec2::new(0, -1),
			Ordinal::East => IVec2::new(1, 0),
			Ordinal::South => IVec2::new(0, 1),
			Ordinal::West => IVec2::new(-1, 0),
			Ordinal::NorthEast => IVec2::new(1, -1),
			Ordinal::SouthEast => IVec2::new(1, 1),
			Ordinal::SouthWest => IVec2::new(-1, 1),
			Ordinal::NorthWest => IVec2::new(-1, -1),
			Ordinal::Zero => IVec2::ZERO,
		}
	}
	/// Whether the direction is one of North, East, South or West
	pub fn is_orthogonal(&self) -> bool {
		matches!(
			self,
			Ordinal::North | Ordinal::East | Ordinal::South | Ordinal::West
		)
	}
	/// For two cells next to each other find the [Ordinal] pointing from the `source` to the `target`. Returns [None] when they are not adjacent
	pub fn cell_to_cell_direction(target: FieldCell, source: FieldCell) -> Option<Self> {
		let direction = IVec2::new(
			target.get_column() as i32 - source.get_column() as i32,
			target.get_row() as i32 - source.get_row() as i32,
		);
		Ordinal::ALL
			.into_iter()
			.find(|ord| ord.to_ivec2() == direction)
	}
}

/// The number of columns (`width`) and rows (`height`) of the navigation grid
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Reflect)]
pub struct GridDimensions {
	/// Number of columns, the `x` extent
	columns: usize,
	/// Number of rows, the `y` extent
	rows: usize,
}

impl GridDimensions {
	/// Create a new instance of [GridDimensions], both sides must be non-zero
	pub fn new(columns: usize, rows: usize) -> Result<Self, FlowFieldError> {
		if columns == 0 || rows == 0 {
			return Err(FlowFieldError::ZeroDimensions { columns, rows });
		}
		Ok(GridDimensions { columns, rows })
	}
	/// Get the number of columns
	pub fn get_columns(&self) -> usize {
		self.columns
	}
	/// Get the number of rows
	pub fn get_rows(&self) -> usize {
		self.rows
	}
	/// Total number of cells, the length of every field array
	pub fn get_cell_count(&self) -> usize {
		self.columns * self.rows
	}
	/// Whether a `(column, row)` pair lies inside the grid
	pub fn contains(&self, column: i64, row: i64) -> bool {
		column >= 0 && row >= 0 && (column as usize) < self.columns && (row as usize) < self.rows
	}
	/// Whether the [FieldCell] lies inside the grid
	pub fn contains_field_cell(&self, field_cell: FieldCell) -> bool {
		field_cell.get_column() < self.columns && field_cell.get_row() < self.rows
	}
	/// Flat index of a [FieldCell], laid out column by column
	pub fn get_index(&self, field_cell: FieldCell) -> usize {
		field_cell.get_column() * self.rows + field_cell.get_row()
	}
	/// Inverse of [GridDimensions::get_index]
	pub fn get_field_cell(&self, index: usize) -> FieldCell {
		FieldCell::new(index / self.rows, index % self.rows)
	}
	/// Iterate over every [FieldCell] in index order
	pub fn iter_field_cells(&self) -> impl Iterator<Item = FieldCell> + '_ {
		(0..self.get_cell_count()).map(|i| self.get_field_cell(i))
	}
	/// Step from `field_cell` in the direction of `ordinal`, [None] if that leaves the grid
	pub fn get_neighbour(&self, field_cell: FieldCell, ordinal: Ordinal) -> Option<FieldCell> {
		let step = ordinal.to_ivec2();
		let column = field_cell.get_column() as i64 + step.x as i64;
		let row = field_cell.get_row() as i64 + step.y as i64;
		if self.contains(column, row) {
			Some(FieldCell::new(column as usize, row as usize))
		} else {
			None
		}
	}
	/// Neighbours of a cell in the North, East, South and West directions which are inside the grid (up to 4)
	pub fn get_orthogonal_cell_neighbours(
		&self,
		field_cell: FieldCell,
	) -> impl Iterator<Item = (Ordinal, FieldCell)> + '_ {
		Ordinal::ORTHOGONAL
			.into_iter()
			.filter_map(move |ord| self.get_neighbour(field_cell, ord).map(|n| (ord, n)))
	}
	/// Neighbours of a cell including diagonal directions which are inside the grid (up to 8)
	pub fn get_all_cell_neighbours(
		&self,
		field_cell: FieldCell,
	) -> impl Iterator<Item = (Ordinal, FieldCell)> + '_ {
		Ordinal::ALL
			.into_iter()
			.filter_map(move |ord| self.get_neighbour(field_cell, ord).map(|n| (ord, n)))
	}
	/// Find the [FieldCell] containing a world `position` where each cell spans `cell_size` units. Negative, out of range and non-finite positions have no cell
	pub fn get_field_cell_from_position(
		&self,
		position: Vec2,
		cell_size: f32,
	) -> Option<FieldCell> {
		if !position.is_finite() {
			return None;
		}
		let column = (position.x / cell_size).floor();
		let row = (position.y / cell_size).floor();
		if column < 0.0 || row < 0.0 {
			return None;
		}
		let (column, row) = (column as usize, row as usize);
		if column < self.columns && row < self.rows {
			Some(FieldCell::new(column, row))
		} else {
			None
		}
	}
}
