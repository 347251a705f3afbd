//! Terrain is the external classification of the map that a [CostField] is derived from. Any map
//! storage can drive the navigation by implementing [TerrainLookup], [TerrainGrid] is a simple
//! in-memory implementation which also carries the "map changed" signal
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Provides the terrain kind of any cell inside the grid
pub trait TerrainLookup {
	/// Kind of the cell at `(column, row)`, only ever asked for in-bounds cells
	fn classify(&self, column: usize, row: usize) -> u8;
	/// Size of the grid the lookup holds data for, [None] when it can classify a grid of any size
	fn get_grid_dimensions(&self) -> Option<GridDimensions> {
		None
	}
}

impl<F> TerrainLookup for F
where
	F: Fn(usize, usize) -> u8,
{
	fn classify(&self, column: usize, row: usize) -> u8 {
		self(column, row)
	}
}

/// The classes of terrain a cell can belong to
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Reflect)]
pub enum TerrainKind {
	/// Open ground, kind `0`
	#[default]
	Normal,
	/// Slow ground such as mud, kind `1`
	Difficult,
	/// Walls, kind `2`
	Impassable,
}

impl TerrainKind {
	/// Interpret a raw terrain kind, anything unrecognised is treated as open ground
	pub fn from_kind(kind: u8) -> Self {
		match kind {
			1 => TerrainKind::Difficult,
			2 => TerrainKind::Impassable,
			_ => TerrainKind::Normal,
		}
	}
	/// The raw kind value
	pub fn as_kind(&self) -> u8 {
		match self {
			TerrainKind::Normal => 0,
			TerrainKind::Difficult => 1,
			TerrainKind::Impassable => 2,
		}
	}
	/// [CostField] value of the terrain before any wall proximity penalty
	pub fn get_base_cost(&self) -> u8 {
		match self {
			TerrainKind::Normal => NORMAL_COST,
			TerrainKind::Difficult => DIFFICULT_COST,
			TerrainKind::Impassable => IMPASSABLE_COST,
		}
	}
}

/// A grid of raw terrain kinds. Editing a cell raises the changed flag which the navigation
/// layer consumes to rebuild the [CostField]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Resource, Clone, Debug, Reflect)]
pub struct TerrainGrid {
	/// Size of the grid
	dimensions: GridDimensions,
	/// Kind of each cell, indexed by [GridDimensions::get_index]
	kinds: Vec<u8>,
	/// Set whenever the terrain has been edited and the fields depending on it are out of date
	#[cfg_attr(feature = "serde", serde(skip, default = "changed_on_load"))]
	changed: bool,
}

/// A freshly loaded terrain has never been turned into a [CostField]
#[cfg(feature = "serde")]
fn changed_on_load() -> bool {
	true
}

impl TerrainLookup for TerrainGrid {
	fn classify(&self, column: usize, row: usize) -> u8 {
		self.kinds[self.dimensions.get_index(FieldCell::new(column, row))]
	}
	fn get_grid_dimensions(&self) -> Option<GridDimensions> {
		Some(self.dimensions)
	}
}

impl TerrainGrid {
	/// Create a new [TerrainGrid] of open ground
	pub fn new(dimensions: GridDimensions) -> Self {
		TerrainGrid {
			dimensions,
			kinds: vec![TerrainKind::Normal.as_kind(); dimensions.get_cell_count()],
			changed: true,
		}
	}
	/// Create a new [TerrainGrid] from rows of kinds, `rows[row][column]`, as they would be read off a map
	pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, FlowFieldError> {
		let row_count = rows.len();
		let column_count = rows.first().map(|r| r.len()).unwrap_or(0);
		let dimensions = GridDimensions::new(column_count, row_count)?;
		let mut grid = TerrainGrid::new(dimensions);
		for (row, kinds) in rows.iter().enumerate() {
			if kinds.len() != column_count {
				return Err(FlowFieldError::TerrainSizeMismatch {
					expected: dimensions.get_cell_count(),
					actual: rows.iter().map(|r| r.len()).sum(),
				});
			}
			for (column, kind) in kinds.iter().enumerate() {
				let index = dimensions.get_index(FieldCell::new(column, row));
				grid.kinds[index] = *kind;
			}
		}
		Ok(grid)
	}
	/// Get the dimensions of the terrain
	pub fn get_dimensions(&self) -> GridDimensions {
		self.dimensions
	}
	/// Get the kind of a cell, [None] when outside the grid
	pub fn get_kind(&self, field_cell: FieldCell) -> Option<TerrainKind> {
		if self.dimensions.contains_field_cell(field_cell) {
			Some(TerrainKind::from_kind(
				self.kinds[self.dimensions.get_index(field_cell)],
			))
		} else {
			None
		}
	}
	/// Change the kind of a cell and flag the terrain as changed
	pub fn set_kind(&mut self, field_cell: FieldCell, kind: u8) -> Result<(), FlowFieldError> {
		if !self.dimensions.contains_field_cell(field_cell) {
			return Err(FlowFieldError::CellOutOfBounds {
				column: field_cell.get_column(),
				row: field_cell.get_row(),
			});
		}
		let index = self.dimensions.get_index(field_cell);
		if self.kinds[index] != kind {
			self.kinds[index] = kind;
			self.changed = true;
		}
		Ok(())
	}
	/// Whether the terrain has changed since the flag was last cleared
	pub fn has_changed(&self) -> bool {
		self.changed
	}
	/// Mark the current terrain as consumed
	pub fn clear_changed(&mut self) {
		self.changed = false;
	}
	/// From a `ron` file generate the [TerrainGrid]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, FlowFieldError> {
		let file = std::fs::File::open(path)?;
		let grid: TerrainGrid = ron::de::from_reader(file)?;
		// deserialising bypasses the zero size check of the constructor
		GridDimensions::new(grid.dimensions.get_columns(), grid.dimensions.get_rows())?;
		if grid.kinds.len() != grid.dimensions.get_cell_count() {
			return Err(FlowFieldError::TerrainSizeMismatch {
				expected: grid.dimensions.get_cell_count(),
				actual: grid.kinds.len(),
			});
		}
		Ok(grid)
	}
	/// From a `csv` file generate the [TerrainGrid], each line is one row of the map
	#[cfg(feature = "csv")]
	pub fn from_csv(path: &str) -> Result<Self, FlowFieldError> {
		let mut reader = csv::ReaderBuilder::new()
			.has_headers(false)
			.trim(csv::Trim::All)
			.from_path(path)?;
		let mut rows = Vec::new();
		for record in reader.deserialize() {
			let row: Vec<u8> = record?;
			rows.push(row);
		}
		TerrainGrid::from_rows(&rows)
	}
}
