//! Logic for maintaining the neighbours of each [Boid] and advancing the flock every physics tick
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Reported by a proximity system when `neighbour` comes within range of `boid`
#[derive(Event, Debug, Clone, Copy)]
pub struct EventNeighbourEntered {
	/// The boid whose neighbourhood changed
	boid: Entity,
	/// The boid which came within range
	neighbour: Entity,
}

impl EventNeighbourEntered {
	/// Create a new instance of [EventNeighbourEntered]
	pub fn new(boid: Entity, neighbour: Entity) -> Self {
		EventNeighbourEntered { boid, neighbour }
	}
	/// The boid whose neighbourhood changed
	pub fn get_boid(&self) -> Entity {
		self.boid
	}
	/// The boid which came within range
	pub fn get_neighbour(&self) -> Entity {
		self.neighbour
	}
}

/// Reported by a proximity system when `neighbour` leaves the range of `boid`
#[derive(Event, Debug, Clone, Copy)]
pub struct EventNeighbourExited {
	/// The boid whose neighbourhood changed
	boid: Entity,
	/// The boid which went out of range
	neighbour: Entity,
}

impl EventNeighbourExited {
	/// Create a new instance of [EventNeighbourExited]
	pub fn new(boid: Entity, neighbour: Entity) -> Self {
		EventNeighbourExited { boid, neighbour }
	}
	/// The boid whose neighbourhood changed
	pub fn get_boid(&self) -> Entity {
		self.boid
	}
	/// The boid which went out of range
	pub fn get_neighbour(&self) -> Entity {
		self.neighbour
	}
}

/// Apply [EventNeighbourEntered] and [EventNeighbourExited] to the [Neighbours] of each [Boid].
/// Entries are applied before exits, a boid is never its own neighbour
#[cfg(not(tarpaulin_include))]
pub fn process_neighbour_events(
	mut entered: EventReader<EventNeighbourEntered>,
	mut exited: EventReader<EventNeighbourExited>,
	mut boids: Query<&mut Boid>,
) {
	for event in entered.read() {
		if event.get_boid() == event.get_neighbour() {
			continue;
		}
		if let Ok(mut boid) = boids.get_mut(event.get_boid()) {
			boid.get_neighbours_mut().add(event.get_neighbour());
		}
	}
	for event in exited.read() {
		if let Ok(mut boid) = boids.get_mut(event.get_boid()) {
			boid.get_neighbours_mut().remove(event.get_neighbour());
		}
	}
}

/// Advance every [Boid] by one step. The state of the flock is captured first so each boid
/// reacts to where its neighbours were at the start of the tick. When the boid has a [Transform]
/// it is moved to the smoothed draw position
#[cfg(not(tarpaulin_include))]
pub fn steer_boids(
	fields: Option<Res<NavigationFields>>,
	config: Res<FlockConfig>,
	mut boids: Query<(Entity, &mut Boid, Option<&mut Transform>)>,
) {
	let Some(fields) = fields else {
		return;
	};
	let snapshot: FlockSnapshot = boids
		.iter()
		.map(|(entity, boid, _)| (entity, boid.get_state()))
		.collect();
	for (entity, mut boid, transform) in boids.iter_mut() {
		boid.step(entity, &*fields, &snapshot, &config);
		if let Some(mut transform) = transform {
			let draw = boid.get_draw_position();
			transform.translation.x = draw.x;
			transform.translation.y = draw.y;
		}
	}
	trace!("Stepped {} boids", snapshot.len());
}
