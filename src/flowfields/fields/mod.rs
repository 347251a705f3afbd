//! The kinds of fields used by the algorithm
//!

pub mod cost_field;
pub mod flow_field;
pub mod integration_field;

use crate::prelude::*;
use bevy::prelude::*;

/// Defines required access to field arrays
pub trait Field<T> {
	/// Get a reference to the field array, indexed by [GridDimensions::get_index]
	fn get_field(&self) -> &[T];
	/// Get the dimensions the field was created with
	fn get_dimensions(&self) -> GridDimensions;
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, field_cell: FieldCell) -> T;
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: T, field_cell: FieldCell);
}

/// ID of a cell within a field
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct FieldCell((usize, usize));

impl FieldCell {
	/// Create a new instance of [FieldCell]
	pub fn new(column: usize, row: usize) -> Self {
		FieldCell((column, row))
	}
	/// Get the `(column, row)` tuple
	pub fn get_column_row(&self) -> (usize, usize) {
		self.0
	}
	/// Get the column
	pub fn get_column(&self) -> usize {
		self.0 .0
	}
	/// Get the row
	pub fn get_row(&self) -> usize {
		self.0 .1
	}
}

/// Panic with a consistent message when a field is accessed outside of its dimensions
pub(crate) fn assert_in_bounds(name: &str, dimensions: GridDimensions, field_cell: FieldCell) {
	if !dimensions.contains_field_cell(field_cell) {
		panic!(
			"Cannot access a {} value, index out of bounds. Asked for column {}, row {}, field has {} columns and {} rows",
			name,
			field_cell.get_column(),
			field_cell.get_row(),
			dimensions.get_columns(),
			dimensions.get_rows()
		)
	}
}
