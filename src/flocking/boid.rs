//! A [Boid] is one member of a flock. Every physics step it blends four influences into a velocity:
//!
//! * path - the [FlowField] direction of the cell it stands in
//! * cohesion - a pull towards the centre of its neighbours, stronger the further away that centre is
//! * alignment - the average velocity of its neighbours
//! * separation - a push away from every neighbour closer than the avoid distance, stronger the closer it is
//!
//! When the boid stands next to an impassable cell it is additionally pushed away from that cell
//! and flagged as being on a wall for the step. A boid on a wall gives ground to its neighbours
//! at half strength while boids next to a walled neighbour push away at double strength, so the
//! flock flows off the wall rather than crushing into it.
//!
//! Finally the boid moves towards where its velocity points, never further than its speed.
//!

use bevy::prelude::*;

use crate::prelude::*;

/// Separation scale applied when the boid itself is pressed against a wall
const ON_WALL_SEPARATION_SCALE: f32 = 0.5;
/// Separation scale applied when the neighbour is pressed against a wall
const NEIGHBOUR_ON_WALL_SEPARATION_SCALE: f32 = 2.0;
/// Multiple of the avoid distance used to push apart boids sharing a position
const COINCIDENT_PUSH_SCALE: f32 = 10.0;

/// The flock influences computed from a boid's neighbours
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlockForces {
	/// Average velocity of the neighbours
	pub alignment: Vec2,
	/// Pull towards the centre of the neighbours
	pub cohesion: Vec2,
	/// Push away from neighbours that are too close
	pub separation: Vec2,
}

/// One member of a flock, see the module documentation
#[derive(Component, Clone, Debug)]
pub struct Boid {
	/// Stable index of the boid, seeds the push direction used when two boids share a position
	index: u32,
	/// Position in world units
	position: Vec2,
	/// Velocity of the last step
	velocity: Vec2,
	/// Smoothed position for rendering without jitter
	draw_position: Vec2,
	/// Whether the boid was next to an impassable cell during the last step
	is_on_wall: bool,
	/// Other boids currently within range
	neighbours: Neighbours,
	/// Influences computed during the last step
	forces: FlockForces,
}

impl Boid {
	/// Create a new [Boid] at rest
	pub fn new(index: u32, position: Vec2) -> Self {
		Boid {
			index,
			position,
			velocity: Vec2::ZERO,
			draw_position: position,
			is_on_wall: false,
			neighbours: Neighbours::default(),
			forces: FlockForces::default(),
		}
	}
	/// Start the boid with a velocity
	pub fn with_velocity(mut self, velocity: Vec2) -> Self {
		self.velocity = velocity;
		self
	}
	/// Start the boid with its wall flag set
	pub fn with_on_wall(mut self, is_on_wall: bool) -> Self {
		self.is_on_wall = is_on_wall;
		self
	}
	/// Get the stable index
	pub fn get_index(&self) -> u32 {
		self.index
	}
	/// Get the position
	pub fn get_position(&self) -> Vec2 {
		self.position
	}
	/// Get the velocity of the last step
	pub fn get_velocity(&self) -> Vec2 {
		self.velocity
	}
	/// Get the smoothed position for rendering
	pub fn get_draw_position(&self) -> Vec2 {
		self.draw_position
	}
	/// Whether the boid was next to an impassable cell during the last step
	pub fn is_on_wall(&self) -> bool {
		self.is_on_wall
	}
	/// Get the neighbours
	pub fn get_neighbours(&self) -> &Neighbours {
		&self.neighbours
	}
	/// Get a mutable reference to the neighbours
	pub fn get_neighbours_mut(&mut self) -> &mut Neighbours {
		&mut self.neighbours
	}
	/// Get the influences computed during the last step
	pub fn get_forces(&self) -> FlockForces {
		self.forces
	}
	/// The state neighbours react to
	pub fn get_state(&self) -> BoidState {
		BoidState {
			position: self.position,
			velocity: self.velocity,
			is_on_wall: self.is_on_wall,
		}
	}
	/// Calculate the cohesion, alignment and separation influences of the neighbours. `entity` is
	/// the boid's own identity which is never counted as a neighbour
	pub fn calculate_flock_forces(
		&self,
		entity: Entity,
		flock: &impl NeighbourLookup,
		config: &FlockConfig,
	) -> FlockForces {
		let mut forces = FlockForces::default();
		let mut flock_centre = Vec2::ZERO;
		let mut count = 0;
		for neighbour in self.neighbours.iter() {
			if neighbour == entity {
				continue;
			}
			let Some(state) = flock.get_boid_state(neighbour) else {
				continue;
			};
			count += 1;
			forces.alignment += state.velocity;
			flock_centre += state.position;

			let distance = self.position.distance(state.position);
			if distance > config.avoid_distance {
				continue;
			}
			if distance > 0.0 {
				let push = config.speed * (config.avoid_distance / distance);
				// a boid against a wall shouldn't be shoved further into it
				let scale = if self.is_on_wall {
					ON_WALL_SEPARATION_SCALE
				} else if state.is_on_wall {
					NEIGHBOUR_ON_WALL_SEPARATION_SCALE
				} else {
					1.0
				};
				forces.separation -= (state.position - self.position).normalize() * push * scale;
			} else {
				// exactly on top of each other, rotate by the index so the push is reproducible
				let fallback = Vec2::from_angle(self.index as f32).rotate(Vec2::Y);
				forces.separation -= fallback * config.avoid_distance * COINCIDENT_PUSH_SCALE;
			}
		}
		if count == 0 {
			return forces;
		}
		forces.alignment /= count as f32;
		flock_centre /= count as f32;
		let centre_direction = (flock_centre - self.position).normalize_or_zero();
		let centre_speed =
			config.speed * (self.position.distance(flock_centre) / config.flock_radius);
		forces.cohesion = centre_direction * centre_speed;
		forces
	}
	/// Advance the boid by one physics step. Reads the fields and the frozen state of the flock,
	/// only ever mutates itself
	pub fn step(
		&mut self,
		entity: Entity,
		fields: &impl FieldQuery,
		flock: &impl NeighbourLookup,
		config: &FlockConfig,
	) {
		let smoothing = config.draw_smoothing;
		self.draw_position = self.draw_position * smoothing + self.position * (1.0 - smoothing);

		self.forces = self.calculate_flock_forces(entity, flock, config);

		let path = fields.direction(self.position).as_vec2() * config.speed * config.path_weight;
		let boid_forces = self.forces.cohesion * config.cohesion_weight
			+ self.forces.alignment * config.alignment_weight
			+ self.forces.separation * config.separation_weight;
		self.velocity = path + boid_forces;

		self.is_on_wall = false;
		if let Some(neighbour) = fields.highest_cost_neighbour(self.position) {
			if neighbour.is_impassable() {
				let offset = neighbour.get_ordinal().to_ivec2().as_vec2();
				let obstacle = self.position + offset * (fields.cell_size() / 2.0);
				let away_from_obstacle = (self.position - obstacle).normalize_or_zero();
				self.velocity += away_from_obstacle * config.speed;
				self.is_on_wall = true;
			}
		}

		let aim = self.position + self.velocity * config.lookahead;
		self.position = move_toward(self.position, aim, config.speed);
	}
}

/// Move `from` towards `to` by at most `max_distance`
fn move_toward(from: Vec2, to: Vec2, max_distance: f32) -> Vec2 {
	let delta = to - from;
	let length = delta.length();
	if length <= max_distance || length < f32::EPSILON {
		to
	} else {
		from + delta / length * max_distance
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	/// A 10x10 open map with a target in the middle
	fn open_fields() -> NavigationFields {
		let terrain = TerrainGrid::new(GridDimensions::new(10, 10).unwrap());
		let mut fields = NavigationFields::from_terrain(&terrain, 32.0).unwrap();
		fields
			.rebuild_integration_and_flow(FieldCell::new(5, 5))
			.unwrap();
		fields
	}
	#[test]
	fn lone_boid_follows_flow() {
		let fields = open_fields();
		let config = FlockConfig::default();
		let mut boid = Boid::new(0, Vec2::new(80.0, 176.0));
		// cell (2, 5) points East
		boid.step(Entity::from_raw(0), &fields, &FlockSnapshot::default(), &config);
		assert_eq!(Vec2::new(0.8, 0.0), boid.get_velocity());
		assert_eq!(Vec2::new(82.0, 176.0), boid.get_position());
		assert!(!boid.is_on_wall());
	}
	#[test]
	fn step_never_exceeds_speed() {
		let fields = open_fields();
		let config = FlockConfig::default();
		let entity = Entity::from_raw(0);
		let neighbour = Entity::from_raw(1);
		let mut boid = Boid::new(0, Vec2::new(100.0, 100.0));
		boid.get_neighbours_mut().add(neighbour);
		let snapshot: FlockSnapshot = [(
			neighbour,
			BoidState {
				position: Vec2::new(100.5, 100.0),
				velocity: Vec2::new(-500.0, 300.0),
				is_on_wall: true,
			},
		)]
		.into_iter()
		.collect();
		let start = boid.get_position();
		boid.step(entity, &fields, &snapshot, &config);
		assert!(start.distance(boid.get_position()) <= config.speed + 1e-4);
	}
	#[test]
	fn self_is_not_a_neighbour() {
		let config = FlockConfig::default();
		let entity = Entity::from_raw(4);
		let mut boid = Boid::new(4, Vec2::new(10.0, 10.0));
		boid.get_neighbours_mut().add(entity);
		let snapshot: FlockSnapshot = [(entity, boid.get_state())].into_iter().collect();
		let forces = boid.calculate_flock_forces(entity, &snapshot, &config);
		assert_eq!(FlockForces::default(), forces);
	}
	#[test]
	fn unknown_neighbour_ignored() {
		let config = FlockConfig::default();
		let mut boid = Boid::new(0, Vec2::new(10.0, 10.0));
		boid.get_neighbours_mut().add(Entity::from_raw(9));
		let forces =
			boid.calculate_flock_forces(Entity::from_raw(0), &FlockSnapshot::default(), &config);
		assert_eq!(FlockForces::default(), forces);
	}
	#[test]
	fn alignment_and_cohesion() {
		let config = FlockConfig::default();
		let entity = Entity::from_raw(0);
		let mut boid = Boid::new(0, Vec2::ZERO);
		let snapshot: FlockSnapshot = [
			(
				Entity::from_raw(1),
				BoidState {
					position: Vec2::new(100.0, 0.0),
					velocity: Vec2::new(2.0, 0.0),
					is_on_wall: false,
				},
			),
			(
				Entity::from_raw(2),
				BoidState {
					position: Vec2::new(100.0, 100.0),
					velocity: Vec2::new(0.0, 4.0),
					is_on_wall: false,
				},
			),
		]
		.into_iter()
		.collect();
		boid.get_neighbours_mut().add(Entity::from_raw(1));
		boid.get_neighbours_mut().add(Entity::from_raw(2));
		let forces = boid.calculate_flock_forces(entity, &snapshot, &config);
		assert_eq!(Vec2::new(1.0, 2.0), forces.alignment);
		// centre is (100, 50), both neighbours are beyond the avoid distance
		let centre = Vec2::new(100.0, 50.0);
		let expected = centre.normalize() * (2.0 * centre.length() / 50.0);
		assert!((expected - forces.cohesion).length() < 1e-4);
		assert_eq!(Vec2::ZERO, forces.separation);
	}
	#[test]
	fn separation_grows_as_distance_shrinks() {
		let config = FlockConfig::default();
		let entity = Entity::from_raw(0);
		let neighbour = Entity::from_raw(1);
		let mut boid = Boid::new(0, Vec2::ZERO);
		boid.get_neighbours_mut().add(neighbour);
		let at = |x: f32| -> FlockSnapshot {
			[(
				neighbour,
				BoidState {
					position: Vec2::new(x, 0.0),
					..default()
				},
			)]
			.into_iter()
			.collect()
		};
		let near = boid.calculate_flock_forces(entity, &at(8.0), &config);
		let far = boid.calculate_flock_forces(entity, &at(16.0), &config);
		// speed * avoid / distance, pointing away from the neighbour
		assert_eq!(Vec2::new(-8.0, 0.0), near.separation);
		assert_eq!(Vec2::new(-4.0, 0.0), far.separation);
	}
	#[test]
	fn wall_pushes_boid_away() {
		let mut terrain = TerrainGrid::new(GridDimensions::new(5, 5).unwrap());
		terrain.set_kind(FieldCell::new(3, 2), 2).unwrap();
		let fields = NavigationFields::from_terrain(&terrain, 32.0).unwrap();
		let config = FlockConfig::default();
		// centre of (2, 2), the wall is East
		let mut boid = Boid::new(0, Vec2::new(80.0, 80.0));
		boid.step(Entity::from_raw(0), &fields, &FlockSnapshot::default(), &config);
		assert!(boid.is_on_wall());
		assert_eq!(Vec2::new(-2.0, 0.0), boid.get_velocity());
		assert_eq!(Vec2::new(78.0, 80.0), boid.get_position());
	}
	#[test]
	fn draw_position_lags_behind() {
		let fields = open_fields();
		let config = FlockConfig::default();
		let mut boid = Boid::new(0, Vec2::new(80.0, 176.0));
		boid.step(Entity::from_raw(0), &fields, &FlockSnapshot::default(), &config);
		// smoothing reads the position from before the move
		assert_eq!(Vec2::new(80.0, 176.0), boid.get_draw_position());
		boid.step(Entity::from_raw(0), &fields, &FlockSnapshot::default(), &config);
		let draw = boid.get_draw_position();
		assert!(draw.x > 80.0 && draw.x < 82.0);
	}
	#[test]
	fn move_toward_stops_at_target() {
		assert_eq!(
			Vec2::new(1.0, 0.0),
			move_toward(Vec2::ZERO, Vec2::new(1.0, 0.0), 2.0)
		);
		assert_eq!(
			Vec2::new(0.0, 2.0),
			move_toward(Vec2::ZERO, Vec2::new(0.0, 10.0), 2.0)
		);
	}
}
