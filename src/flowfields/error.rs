//! Errors reported to the caller when a precondition of the navigation API is
//! violated. Queries never error, they fall back to default-safe values
//!

use thiserror::Error;

/// Failures raised while constructing or rebuilding the navigation data
#[derive(Error, Debug)]
pub enum FlowFieldError {
	/// A grid must have at least one column and one row
	#[error("Grid dimensions must be non-zero, got {columns} columns by {rows} rows")]
	ZeroDimensions {
		/// Requested number of columns
		columns: usize,
		/// Requested number of rows
		rows: usize,
	},
	/// The world size of a grid cell must be a positive finite number
	#[error("Cell size must be positive and finite, got {0}")]
	InvalidCellSize(f32),
	/// A target was requested outside of the grid
	#[error("Target ({column}, {row}) lies outside of a {columns}x{rows} grid")]
	TargetOutOfBounds {
		/// Column of the requested target
		column: usize,
		/// Row of the requested target
		row: usize,
		/// Grid columns
		columns: usize,
		/// Grid rows
		rows: usize,
	},
	/// A target was requested on a cell that can never be reached
	#[error("Target ({column}, {row}) is impassable")]
	TargetImpassable {
		/// Column of the requested target
		column: usize,
		/// Row of the requested target
		row: usize,
	},
	/// An edit was requested for a cell outside of the grid
	#[error("Cell ({column}, {row}) lies outside of the grid")]
	CellOutOfBounds {
		/// Column of the cell
		column: usize,
		/// Row of the cell
		row: usize,
	},
	/// Terrain data does not cover the grid it was declared for
	#[error("Terrain holds {actual} cells but the grid needs {expected}")]
	TerrainSizeMismatch {
		/// `columns * rows`
		expected: usize,
		/// Number of cells supplied
		actual: usize,
	},
	/// A steering parameter is negative or not finite
	#[error("Flock parameter `{name}` must be a non-negative finite number, got {value}")]
	InvalidFlockConfig {
		/// Name of the offending parameter
		name: &'static str,
		/// The rejected value
		value: f32,
	},
	/// Reading a file from disk failed
	#[cfg(any(feature = "ron", feature = "csv"))]
	#[error("Failed reading file: {0}")]
	Io(#[from] std::io::Error),
	/// A `ron` document could not be deserialised
	#[cfg(feature = "ron")]
	#[error("Failed deserializing ron: {0}")]
	Ron(#[from] ron::error::SpannedError),
	/// A `csv` document could not be deserialised
	#[cfg(feature = "csv")]
	#[error("Failed deserializing csv: {0}")]
	Csv(#[from] csv::Error),
}
