//! [NavigationFields] owns the [CostField], [IntegrationField] and [FlowField] of the map and
//! answers the point queries actors make every physics tick.
//!
//! Rebuilds always construct replacement fields first and only swap them in once complete, so a
//! query never observes a half built field. A terrain change invalidates all three fields, a
//! target change only the integration and flow fields
//!

use std::time::{Duration, Instant};

use crate::prelude::*;
use bevy::prelude::*;

/// Read-only queries against the most recently built fields
pub trait FieldQuery {
	/// Flow direction of the cell containing `position`, [IVec2::ZERO] outside of the grid or when no route exists
	fn direction(&self, position: Vec2) -> IVec2;
	/// Cost of the cell containing `position`, [IMPASSABLE_COST] outside of the grid
	fn cost(&self, position: Vec2) -> u8;
	/// Of the 8 neighbours of the cell containing `position` find the first with the greatest cost
	fn highest_cost_neighbour(&self, position: Vec2) -> Option<HighestCostNeighbour>;
	/// World units spanned by one side of a cell
	fn cell_size(&self) -> f32;
}

/// The neighbour found by [FieldQuery::highest_cost_neighbour]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighestCostNeighbour {
	/// Direction from the queried cell to the neighbour
	ordinal: Ordinal,
	/// The neighbouring cell
	field_cell: FieldCell,
	/// [CostField] value of the neighbour
	cost: u8,
}

impl HighestCostNeighbour {
	/// Direction from the queried cell to the neighbour
	pub fn get_ordinal(&self) -> Ordinal {
		self.ordinal
	}
	/// The neighbouring cell
	pub fn get_field_cell(&self) -> FieldCell {
		self.field_cell
	}
	/// Cost of the neighbour
	pub fn get_cost(&self) -> u8 {
		self.cost
	}
	/// Whether the neighbour can never be pathed through
	pub fn is_impassable(&self) -> bool {
		self.cost == IMPASSABLE_COST
	}
}

/// How long the last target rebuild took
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebuildTimings {
	/// Time spent expanding the [IntegrationField]
	integration: Duration,
	/// Time spent deriving the [FlowField]
	flow: Duration,
}

impl RebuildTimings {
	/// Time spent expanding the [IntegrationField]
	pub fn get_integration(&self) -> Duration {
		self.integration
	}
	/// Time spent deriving the [FlowField]
	pub fn get_flow(&self) -> Duration {
		self.flow
	}
	/// Total time of the rebuild
	pub fn get_total(&self) -> Duration {
		self.integration + self.flow
	}
}

/// Owner of every navigation field of the map, see the module documentation
#[derive(Resource, Clone, Debug)]
pub struct NavigationFields {
	/// Size of the grid
	dimensions: GridDimensions,
	/// World units spanned by one side of a cell
	cell_size: f32,
	/// Traversal cost of each cell
	cost_field: CostField,
	/// Cost-to-goal of each cell for the current `target`
	integration_field: IntegrationField,
	/// Direction of travel of each cell for the current `target`
	flow_field: FlowField,
	/// The goal the integration and flow fields were built for
	target: Option<FieldCell>,
	/// Set when the cost field changed after the integration and flow fields were built
	is_dirty: bool,
	/// Duration of the last target rebuild
	timings: RebuildTimings,
}

impl NavigationFields {
	/// Create a new [NavigationFields] of open ground with no target
	pub fn new(dimensions: GridDimensions, cell_size: f32) -> Result<Self, FlowFieldError> {
		if !cell_size.is_finite() || cell_size <= 0.0 {
			return Err(FlowFieldError::InvalidCellSize(cell_size));
		}
		Ok(NavigationFields {
			dimensions,
			cell_size,
			cost_field: CostField::new(dimensions),
			integration_field: IntegrationField::new(dimensions),
			flow_field: FlowField::new(dimensions),
			target: None,
			is_dirty: false,
			timings: RebuildTimings::default(),
		})
	}
	/// Create a new [NavigationFields] sized to and derived from a [TerrainGrid]
	pub fn from_terrain(terrain: &TerrainGrid, cell_size: f32) -> Result<Self, FlowFieldError> {
		let mut fields = NavigationFields::new(terrain.get_dimensions(), cell_size)?;
		fields.rebuild_cost(terrain)?;
		Ok(fields)
	}
	/// Get the dimensions of the grid
	pub fn get_dimensions(&self) -> GridDimensions {
		self.dimensions
	}
	/// Get the [CostField]
	pub fn get_cost_field(&self) -> &CostField {
		&self.cost_field
	}
	/// Get the [IntegrationField] of the current target
	pub fn get_integration_field(&self) -> &IntegrationField {
		&self.integration_field
	}
	/// Get the [FlowField] of the current target
	pub fn get_flow_field(&self) -> &FlowField {
		&self.flow_field
	}
	/// Get the target the integration and flow fields lead to
	pub fn get_target(&self) -> Option<FieldCell> {
		self.target
	}
	/// Whether the cost field changed since the integration and flow fields were built
	pub fn is_dirty(&self) -> bool {
		self.is_dirty
	}
	/// Get the duration of the last target rebuild
	pub fn get_timings(&self) -> RebuildTimings {
		self.timings
	}
	/// Find the [FieldCell] containing a world `position`
	pub fn get_field_cell(&self, position: Vec2) -> Option<FieldCell> {
		self.dimensions
			.get_field_cell_from_position(position, self.cell_size)
	}
	/// World position of the centre of a cell
	pub fn get_cell_centre(&self, field_cell: FieldCell) -> Vec2 {
		(Vec2::new(field_cell.get_column() as f32, field_cell.get_row() as f32) + 0.5)
			* self.cell_size
	}
	/// Recalculate the [CostField] from `terrain`. When a target is known the integration and flow
	/// fields are rebuilt straight away, otherwise they are marked dirty. A terrain which declares a
	/// size different to the grid is rejected and the fields are left untouched. Should the known
	/// target have become impassable it is dropped and every cell left without a direction
	pub fn rebuild_cost(&mut self, terrain: &impl TerrainLookup) -> Result<(), FlowFieldError> {
		if let Some(actual) = terrain.get_grid_dimensions() {
			if actual != self.dimensions {
				return Err(FlowFieldError::TerrainSizeMismatch {
					expected: self.dimensions.get_cell_count(),
					actual: actual.get_cell_count(),
				});
			}
		}
		let start = Instant::now();
		let cost_field = CostField::from_terrain(self.dimensions, terrain);
		self.cost_field = cost_field;
		self.is_dirty = true;
		debug!("CostField rebuilt in {:?}", start.elapsed());
		if let Some(target) = self.target {
			if self.cost_field.is_impassable(target) {
				warn!(
					"Target {:?} is now impassable, dropping it",
					target.get_column_row()
				);
				self.clear_target();
			} else {
				self.build_integration_and_flow(target);
			}
		}
		Ok(())
	}
	/// Recalculate the [IntegrationField] and [FlowField] so they lead to `target`
	pub fn rebuild_integration_and_flow(&mut self, target: FieldCell) -> Result<(), FlowFieldError> {
		if !self.dimensions.contains_field_cell(target) {
			return Err(FlowFieldError::TargetOutOfBounds {
				column: target.get_column(),
				row: target.get_row(),
				columns: self.dimensions.get_columns(),
				rows: self.dimensions.get_rows(),
			});
		}
		if self.cost_field.is_impassable(target) {
			return Err(FlowFieldError::TargetImpassable {
				column: target.get_column(),
				row: target.get_row(),
			});
		}
		self.build_integration_and_flow(target);
		Ok(())
	}
	/// Forget the target and publish fields with no route anywhere
	fn clear_target(&mut self) {
		self.integration_field = IntegrationField::new(self.dimensions);
		self.flow_field = FlowField::new(self.dimensions);
		self.target = None;
		self.is_dirty = false;
	}
	/// Build replacement fields for an in-bounds, passable `target` and publish them
	fn build_integration_and_flow(&mut self, target: FieldCell) {
		let start = Instant::now();
		let mut integration_field = IntegrationField::new(self.dimensions);
		integration_field.calculate_field(target, &self.cost_field);
		let integration = start.elapsed();
		let mut flow_field = FlowField::new(self.dimensions);
		flow_field.calculate(&integration_field);
		let flow = start.elapsed() - integration;
		self.integration_field = integration_field;
		self.flow_field = flow_field;
		self.target = Some(target);
		self.is_dirty = false;
		self.timings = RebuildTimings { integration, flow };
		debug!(
			"Fields for target {:?} rebuilt, integration: {:?}, flow: {:?}",
			target.get_column_row(),
			integration,
			flow
		);
	}
}

impl FieldQuery for NavigationFields {
	fn direction(&self, position: Vec2) -> IVec2 {
		match self.get_field_cell(position) {
			Some(field_cell) => self.flow_field.get_direction(field_cell),
			None => IVec2::ZERO,
		}
	}
	fn cost(&self, position: Vec2) -> u8 {
		match self.get_field_cell(position) {
			Some(field_cell) => self.cost_field.get_field_cell_value(field_cell),
			None => IMPASSABLE_COST,
		}
	}
	fn highest_cost_neighbour(&self, position: Vec2) -> Option<HighestCostNeighbour> {
		let field_cell = self.get_field_cell(position)?;
		let mut highest: Option<HighestCostNeighbour> = None;
		for (ordinal, n) in self.dimensions.get_all_cell_neighbours(field_cell) {
			let cost = self.cost_field.get_field_cell_value(n);
			let current = highest.map(|h| h.cost).unwrap_or(0);
			if cost > current {
				highest = Some(HighestCostNeighbour {
					ordinal,
					field_cell: n,
					cost,
				});
			}
		}
		highest
	}
	fn cell_size(&self) -> f32 {
		self.cell_size
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	/// A `columns x rows` map with walls at the given cells
	fn fields_with_walls(columns: usize, rows: usize, walls: &[(usize, usize)]) -> NavigationFields {
		let mut terrain = TerrainGrid::new(GridDimensions::new(columns, rows).unwrap());
		for (column, row) in walls {
			terrain.set_kind(FieldCell::new(*column, *row), 2).unwrap();
		}
		NavigationFields::from_terrain(&terrain, 32.0).unwrap()
	}
	#[test]
	fn invalid_cell_size() {
		let dimensions = GridDimensions::new(2, 2).unwrap();
		assert!(NavigationFields::new(dimensions, 0.0).is_err());
		assert!(NavigationFields::new(dimensions, -1.0).is_err());
		assert!(NavigationFields::new(dimensions, f32::NAN).is_err());
	}
	#[test]
	fn out_of_bounds_queries_are_safe() {
		let mut fields = fields_with_walls(3, 3, &[]);
		fields.rebuild_integration_and_flow(FieldCell::new(1, 1)).unwrap();
		for position in [
			Vec2::new(-1.0, 10.0),
			Vec2::new(10.0, -1.0),
			Vec2::new(96.0, 10.0),
			Vec2::new(10.0, 96.0),
			Vec2::new(f32::NAN, 0.0),
		] {
			assert_eq!(255, fields.cost(position));
			assert_eq!(IVec2::ZERO, fields.direction(position));
			assert_eq!(None, fields.highest_cost_neighbour(position));
		}
	}
	#[test]
	fn in_bounds_direction() {
		let mut fields = fields_with_walls(3, 3, &[]);
		fields.rebuild_integration_and_flow(FieldCell::new(1, 1)).unwrap();
		assert_eq!(IVec2::new(1, 1), fields.direction(Vec2::new(5.0, 5.0)));
		assert_eq!(IVec2::new(0, -1), fields.direction(Vec2::new(40.0, 80.0)));
	}
	#[test]
	fn no_target_means_no_direction() {
		let fields = fields_with_walls(3, 3, &[]);
		assert_eq!(IVec2::ZERO, fields.direction(Vec2::new(5.0, 5.0)));
		assert_eq!(None, fields.get_target());
	}
	#[test]
	fn target_out_of_bounds_rejected() {
		let mut fields = fields_with_walls(3, 3, &[]);
		let result = fields.rebuild_integration_and_flow(FieldCell::new(3, 0));
		assert!(matches!(result, Err(FlowFieldError::TargetOutOfBounds { .. })));
		assert_eq!(None, fields.get_target());
	}
	#[test]
	fn highest_cost_neighbour_finds_wall() {
		let fields = fields_with_walls(3, 3, &[(2, 0)]);
		let result = fields.highest_cost_neighbour(Vec2::new(48.0, 48.0)).unwrap();
		assert_eq!(Ordinal::NorthEast, result.get_ordinal());
		assert_eq!(FieldCell::new(2, 0), result.get_field_cell());
		assert!(result.is_impassable());
	}
	#[test]
	fn highest_cost_neighbour_first_in_compass_order_wins() {
		let fields = fields_with_walls(3, 3, &[]);
		let result = fields.highest_cost_neighbour(Vec2::new(48.0, 48.0)).unwrap();
		assert_eq!(Ordinal::West, result.get_ordinal());
		assert_eq!(1, result.get_cost());
	}
	#[test]
	fn single_cell_grid_has_no_neighbour() {
		let fields = fields_with_walls(1, 1, &[]);
		assert_eq!(None, fields.highest_cost_neighbour(Vec2::new(1.0, 1.0)));
		assert_eq!(1, fields.cost(Vec2::new(1.0, 1.0)));
	}
	#[test]
	fn terrain_change_rebuilds_known_target() {
		let mut terrain = TerrainGrid::new(GridDimensions::new(3, 3).unwrap());
		let mut fields = NavigationFields::from_terrain(&terrain, 32.0).unwrap();
		fields.rebuild_integration_and_flow(FieldCell::new(1, 0)).unwrap();
		assert_eq!(
			1,
			fields
				.get_integration_field()
				.get_field_cell_value(FieldCell::new(1, 1))
		);
		terrain.set_kind(FieldCell::new(1, 1), 2).unwrap();
		fields.rebuild_cost(&terrain).unwrap();
		assert!(!fields.is_dirty());
		assert_eq!(
			UNREACHED,
			fields
				.get_integration_field()
				.get_field_cell_value(FieldCell::new(1, 1))
		);
	}
	#[test]
	fn terrain_change_without_target_marks_dirty() {
		let terrain = TerrainGrid::new(GridDimensions::new(3, 3).unwrap());
		let fields = NavigationFields::from_terrain(&terrain, 32.0).unwrap();
		assert!(fields.is_dirty());
	}
	#[test]
	fn impassable_target_rejected() {
		let mut fields = fields_with_walls(3, 3, &[(1, 1)]);
		let result = fields.rebuild_integration_and_flow(FieldCell::new(1, 1));
		assert!(matches!(
			result,
			Err(FlowFieldError::TargetImpassable { column: 1, row: 1 })
		));
		assert_eq!(None, fields.get_target());
	}
	#[test]
	fn walled_over_target_is_dropped() {
		let mut terrain = TerrainGrid::new(GridDimensions::new(5, 5).unwrap());
		let mut fields = NavigationFields::from_terrain(&terrain, 32.0).unwrap();
		fields.rebuild_integration_and_flow(FieldCell::new(2, 2)).unwrap();
		terrain.set_kind(FieldCell::new(2, 2), 2).unwrap();
		fields.rebuild_cost(&terrain).unwrap();
		assert_eq!(None, fields.get_target());
		assert!(!fields.is_dirty());
		let dimensions = fields.get_dimensions();
		for field_cell in dimensions.iter_field_cells() {
			assert_eq!(Ordinal::Zero, fields.get_flow_field().get_field_cell_value(field_cell));
			assert!(!fields.get_integration_field().is_reached(field_cell));
		}
	}
	#[test]
	fn terrain_of_another_size_rejected() {
		let mut fields = NavigationFields::new(GridDimensions::new(4, 4).unwrap(), 32.0).unwrap();
		let terrain = TerrainGrid::new(GridDimensions::new(3, 3).unwrap());
		let result = fields.rebuild_cost(&terrain);
		assert!(matches!(
			result,
			Err(FlowFieldError::TerrainSizeMismatch { expected: 16, actual: 9 })
		));
		assert!(!fields.is_dirty());
		assert_eq!(&CostField::new(fields.get_dimensions()), fields.get_cost_field());
	}
	#[test]
	fn closure_terrain_fits_any_grid() {
		let mut fields = NavigationFields::new(GridDimensions::new(4, 4).unwrap(), 32.0).unwrap();
		let terrain = |column: usize, _row: usize| -> u8 { if column == 0 { 1 } else { 0 } };
		fields.rebuild_cost(&terrain).unwrap();
		assert_eq!(3, fields.get_cost_field().get_field_cell_value(FieldCell::new(0, 3)));
	}
	#[test]
	fn cell_centre() {
		let fields = fields_with_walls(3, 3, &[]);
		assert_eq!(Vec2::new(48.0, 16.0), fields.get_cell_centre(FieldCell::new(1, 0)));
	}
}
