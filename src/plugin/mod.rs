//! Defines the Bevy [Plugin] for FlowField flocking
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod field_layer;
pub mod flock_layer;

/// Ordering of the field systems within a frame
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum FieldSet {
	/// Apply edits to the terrain and accept new targets
	Terrain,
	/// Rebuild whichever fields the edits invalidated
	Rebuild,
}

/// Registers the navigation and flocking systems. The [TerrainGrid] and [NavigationFields]
/// resources are supplied by the user, [FlockConfig] falls back to its defaults when not inserted
pub struct FlowFieldFlockingPlugin;

impl Plugin for FlowFieldFlockingPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Ordinal>()
			.register_type::<GridDimensions>()
			.register_type::<FieldCell>()
			.register_type::<TerrainKind>()
			.register_type::<TerrainGrid>()
			.register_type::<CostField>()
			.register_type::<IntegrationField>()
			.register_type::<FlowField>()
			.register_type::<FlockConfig>()
			.init_resource::<FlockConfig>()
			.init_resource::<NavigationTarget>()
			.add_event::<field_layer::EventTargetSelected>()
			.add_event::<field_layer::EventUpdateTerrainCell>()
			.add_event::<flock_layer::EventNeighbourEntered>()
			.add_event::<flock_layer::EventNeighbourExited>()
			.configure_sets(Update, (FieldSet::Terrain, FieldSet::Rebuild).chain())
			.add_systems(
				Update,
				(
					(
						field_layer::process_terrain_updates,
						field_layer::process_target_requests,
					)
						.chain()
						.in_set(FieldSet::Terrain),
					field_layer::rebuild_fields.in_set(FieldSet::Rebuild),
				),
			)
			.add_systems(
				FixedUpdate,
				(
					flock_layer::process_neighbour_events,
					flock_layer::steer_boids,
				)
					.chain(),
			);
	}
}
