//! Membership of a boid's flock is maintained by an external proximity system which reports
//! neighbours entering and leaving range. [Neighbours] is the per boid record of those reports
//! and [FlockSnapshot] is the frozen state of every boid that a physics step reads from
//!

use std::collections::{BTreeMap, BTreeSet};

use bevy::prelude::*;

/// The entities currently within range of a boid. Duplicates are impossible and iteration is in
/// [Entity] order so that steering sums are reproducible
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Neighbours(BTreeSet<Entity>);

impl Neighbours {
	/// Record a neighbour entering range, returns `false` if it was already known
	pub fn add(&mut self, entity: Entity) -> bool {
		self.0.insert(entity)
	}
	/// Record a neighbour leaving range, returns `false` if it was not known
	pub fn remove(&mut self, entity: Entity) -> bool {
		self.0.remove(&entity)
	}
	/// Whether `entity` is a neighbour
	pub fn contains(&self, entity: Entity) -> bool {
		self.0.contains(&entity)
	}
	/// Number of neighbours
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// Whether there are no neighbours
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	/// Iterate over the neighbours
	pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
		self.0.iter().copied()
	}
	/// Forget every neighbour
	pub fn clear(&mut self) {
		self.0.clear();
	}
}

/// The parts of a boid its neighbours react to
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoidState {
	/// Position in world units
	pub position: Vec2,
	/// Velocity of the last step
	pub velocity: Vec2,
	/// Whether the boid was pressed against a wall during its last step
	pub is_on_wall: bool,
}

/// Provides the state of a neighbouring boid
pub trait NeighbourLookup {
	/// State of `entity`, [None] if it is not a known boid
	fn get_boid_state(&self, entity: Entity) -> Option<BoidState>;
}

/// State of every boid captured at the start of a physics step
#[derive(Clone, Debug, Default)]
pub struct FlockSnapshot(BTreeMap<Entity, BoidState>);

impl FlockSnapshot {
	/// Record the state of a boid
	pub fn insert(&mut self, entity: Entity, state: BoidState) {
		self.0.insert(entity, state);
	}
	/// Number of boids captured
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// Whether no boids were captured
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl FromIterator<(Entity, BoidState)> for FlockSnapshot {
	fn from_iter<I: IntoIterator<Item = (Entity, BoidState)>>(iter: I) -> Self {
		FlockSnapshot(iter.into_iter().collect())
	}
}

impl NeighbourLookup for FlockSnapshot {
	fn get_boid_state(&self, entity: Entity) -> Option<BoidState> {
		self.0.get(&entity).copied()
	}
}
