//! Logic for handling edits to the terrain and requests for a new target. A terrain edit
//! invalidates every field, a new target only the [IntegrationField] and [FlowField]
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Request that the flock heads towards a [FieldCell]
#[derive(Event, Debug, Clone, Copy)]
pub struct EventTargetSelected(FieldCell);

impl EventTargetSelected {
	/// Create a new instance of [EventTargetSelected]
	pub fn new(field_cell: FieldCell) -> Self {
		EventTargetSelected(field_cell)
	}
	/// The requested target
	pub fn get_field_cell(&self) -> FieldCell {
		self.0
	}
}

/// Used to change the terrain kind of a cell in the [TerrainGrid]
#[derive(Event, Debug, Clone, Copy)]
pub struct EventUpdateTerrainCell {
	/// FieldCell to update
	cell: FieldCell,
	/// Raw terrain kind, see [TerrainKind]
	kind: u8,
}

impl EventUpdateTerrainCell {
	/// Create a new instance of [EventUpdateTerrainCell]
	pub fn new(cell: FieldCell, kind: u8) -> Self {
		EventUpdateTerrainCell { cell, kind }
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_cell(&self) -> FieldCell {
		self.cell
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_kind(&self) -> u8 {
		self.kind
	}
}

/// The target the flock has been asked to head towards and the target the fields were last
/// built for
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct NavigationTarget {
	/// Most recently accepted request
	requested: Option<FieldCell>,
	/// Target of the last successful rebuild
	previous: Option<FieldCell>,
}

impl NavigationTarget {
	/// Most recently accepted request
	pub fn get_requested(&self) -> Option<FieldCell> {
		self.requested
	}
	/// Target of the last successful rebuild
	pub fn get_previous(&self) -> Option<FieldCell> {
		self.previous
	}
	/// Whether the fields lead somewhere other than the requested target
	pub fn is_stale(&self) -> bool {
		self.requested.is_some() && self.requested != self.previous
	}
}

/// Read [EventUpdateTerrainCell] and apply them to the [TerrainGrid]
#[cfg(not(tarpaulin_include))]
pub fn process_terrain_updates(
	mut events: EventReader<EventUpdateTerrainCell>,
	terrain: Option<ResMut<TerrainGrid>>,
) {
	let Some(mut terrain) = terrain else {
		events.clear();
		return;
	};
	for event in events.read() {
		if let Err(e) = terrain.set_kind(event.get_cell(), event.get_kind()) {
			warn!("Ignoring terrain edit: {}", e);
		}
	}
}

/// Read [EventTargetSelected] and store the latest valid one as the requested target
#[cfg(not(tarpaulin_include))]
pub fn process_target_requests(
	mut events: EventReader<EventTargetSelected>,
	terrain: Option<Res<TerrainGrid>>,
	mut target: ResMut<NavigationTarget>,
) {
	let Some(terrain) = terrain else {
		events.clear();
		return;
	};
	// several requests may arrive in a frame, only the last valid one matters
	for event in events.read() {
		let field_cell = event.get_field_cell();
		match terrain.get_kind(field_cell) {
			None => warn!(
				"Ignoring target {:?} outside of the grid",
				field_cell.get_column_row()
			),
			// ignore requests to an impassable goal
			Some(TerrainKind::Impassable) => warn!(
				"Ignoring impassable target {:?}",
				field_cell.get_column_row()
			),
			Some(_) => target.requested = Some(field_cell),
		}
	}
}

/// Rebuild the [CostField] when the terrain has changed and the [IntegrationField] and
/// [FlowField] when the requested target differs from the one they lead to
#[cfg(not(tarpaulin_include))]
pub fn rebuild_fields(
	terrain: Option<ResMut<TerrainGrid>>,
	fields: Option<ResMut<NavigationFields>>,
	mut target: ResMut<NavigationTarget>,
) {
	let (Some(mut terrain), Some(mut fields)) = (terrain, fields) else {
		return;
	};
	if terrain.has_changed() {
		terrain.clear_changed();
		let before = target.previous;
		// integration and flow follow along when a target is already known
		if let Err(e) = fields.rebuild_cost(&*terrain) {
			error!("Cannot rebuild the CostField: {}", e);
			return;
		}
		target.previous = fields.get_target();
		// the target was walled over, don't ask for it again
		if target.previous.is_none() && before.is_some() && target.requested == before {
			target.requested = None;
		}
	}
	if target.is_stale() {
		if let Some(field_cell) = target.requested {
			match fields.rebuild_integration_and_flow(field_cell) {
				Ok(()) => target.previous = Some(field_cell),
				Err(e) => {
					warn!("Discarding target: {}", e);
					target.requested = target.previous;
				}
			}
		}
	}
}
