//! Build each field from terrain and check the properties that tie them together
//!

use bevy::prelude::*;
use bevy_flowfield_flocking_plugin::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Generate a terrain where roughly 1 in 5 cells is impassable and 1 in 5 difficult
fn random_terrain(seed: u64, columns: usize, rows: usize) -> TerrainGrid {
	let mut rng = StdRng::seed_from_u64(seed);
	let mut terrain = TerrainGrid::new(GridDimensions::new(columns, rows).unwrap());
	for column in 0..columns {
		for row in 0..rows {
			let kind = match rng.random_range(0..5) {
				0 => 2,
				1 => 1,
				_ => 0,
			};
			terrain.set_kind(FieldCell::new(column, row), kind).unwrap();
		}
	}
	terrain
}

/// Build the fields for `terrain` with a target in the first passable cell
fn build(terrain: &TerrainGrid) -> NavigationFields {
	let mut fields = NavigationFields::from_terrain(terrain, DEFAULT_CELL_SIZE).unwrap();
	let target = terrain
		.get_dimensions()
		.iter_field_cells()
		.find(|c| terrain.get_kind(*c) != Some(TerrainKind::Impassable))
		.unwrap();
	fields.rebuild_integration_and_flow(target).unwrap();
	fields
}

#[test]
fn open_grid_scenario() {
	let terrain = TerrainGrid::new(GridDimensions::new(3, 3).unwrap());
	let mut fields = NavigationFields::from_terrain(&terrain, DEFAULT_CELL_SIZE).unwrap();
	fields
		.rebuild_integration_and_flow(FieldCell::new(1, 1))
		.unwrap();
	let integration = fields.get_integration_field();
	let mut row_major = Vec::new();
	for row in 0..3 {
		for column in 0..3 {
			row_major.push(integration.get_field_cell_value(FieldCell::new(column, row)));
		}
	}
	assert_eq!(vec![2u16, 1, 2, 1, 0, 1, 2, 1, 2], row_major);
	// the goal is a diagonal step away and diagonals win ties
	assert_eq!(
		IVec2::new(1, 1),
		fields.get_flow_field().get_direction(FieldCell::new(0, 0))
	);
}

#[test]
fn single_wall_is_detoured() {
	let mut terrain = TerrainGrid::new(GridDimensions::new(5, 3).unwrap());
	terrain.set_kind(FieldCell::new(2, 1), 2).unwrap();
	let mut fields = NavigationFields::from_terrain(&terrain, DEFAULT_CELL_SIZE).unwrap();
	fields
		.rebuild_integration_and_flow(FieldCell::new(4, 1))
		.unwrap();
	let integration = fields.get_integration_field();
	assert_eq!(UNREACHED, integration.get_field_cell_value(FieldCell::new(2, 1)));
	assert!(integration.is_reached(FieldCell::new(0, 1)));
	let flow = fields.get_flow_field();
	let direction = flow.get_field_cell_value(FieldCell::new(1, 1));
	assert_ne!(Ordinal::East, direction);
	assert_ne!(Ordinal::Zero, direction);
	// following the flow from the start reaches the goal
	let dimensions = fields.get_dimensions();
	let mut cell = FieldCell::new(0, 1);
	for _ in 0..dimensions.get_cell_count() {
		if cell == FieldCell::new(4, 1) {
			break;
		}
		let ordinal = flow.get_field_cell_value(cell);
		cell = dimensions.get_neighbour(cell, ordinal).unwrap();
		assert_ne!(FieldCell::new(2, 1), cell);
	}
	assert_eq!(FieldCell::new(4, 1), cell);
}

#[test]
fn flow_descends_integration() {
	for seed in 0..20 {
		let terrain = random_terrain(seed, 16, 12);
		let fields = build(&terrain);
		let dimensions = fields.get_dimensions();
		let integration = fields.get_integration_field();
		let flow = fields.get_flow_field();
		let target = fields.get_target().unwrap();
		for field_cell in dimensions.iter_field_cells() {
			if field_cell == target || !integration.is_reached(field_cell) {
				continue;
			}
			let ordinal = flow.get_field_cell_value(field_cell);
			let next = dimensions
				.get_neighbour(field_cell, ordinal)
				.unwrap_or_else(|| panic!("seed {}: {:?} has no direction", seed, field_cell));
			assert!(
				integration.get_field_cell_value(next) < integration.get_field_cell_value(field_cell),
				"seed {}: {:?} points uphill",
				seed,
				field_cell
			);
		}
	}
}

#[test]
fn impassable_cells_are_never_reached() {
	for seed in 0..20 {
		let terrain = random_terrain(seed, 16, 12);
		let fields = build(&terrain);
		let dimensions = fields.get_dimensions();
		let integration = fields.get_integration_field();
		let flow = fields.get_flow_field();
		let target = fields.get_target().unwrap();
		for field_cell in dimensions.iter_field_cells() {
			if fields.get_cost_field().is_impassable(field_cell) {
				assert_eq!(UNREACHED, integration.get_field_cell_value(field_cell));
			}
			if field_cell == target || !integration.is_reached(field_cell) {
				continue;
			}
			let ordinal = flow.get_field_cell_value(field_cell);
			if let Some(next) = dimensions.get_neighbour(field_cell, ordinal) {
				assert!(!fields.get_cost_field().is_impassable(next));
			}
		}
	}
}

#[test]
fn builds_are_deterministic() {
	let terrain = random_terrain(42, 20, 20);
	let a = build(&terrain);
	let b = build(&terrain);
	assert_eq!(a.get_cost_field(), b.get_cost_field());
	assert_eq!(a.get_integration_field(), b.get_integration_field());
	assert_eq!(a.get_flow_field(), b.get_flow_field());
}

#[test]
fn rebuild_matches_fresh_build() {
	let mut terrain = random_terrain(7, 12, 12);
	let mut fields = build(&terrain);
	let target = fields.get_target().unwrap();
	terrain.set_kind(FieldCell::new(6, 6), 2).unwrap();
	fields.rebuild_cost(&terrain).unwrap();
	let mut fresh = NavigationFields::from_terrain(&terrain, DEFAULT_CELL_SIZE).unwrap();
	fresh.rebuild_integration_and_flow(target).unwrap();
	assert_eq!(fresh.get_integration_field(), fields.get_integration_field());
	assert_eq!(fresh.get_flow_field(), fields.get_flow_field());
}
