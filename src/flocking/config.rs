//! Tunable parameters shared by every [Boid] of a flock
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Steering weights and distances of the flock. Speeds and distances are in world units, a
/// speed is the furthest a boid may travel in one physics step
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Resource, Clone, Copy, Debug, PartialEq, Reflect)]
pub struct FlockConfig {
	/// Maximum displacement of a boid per step
	pub speed: f32,
	/// Distance at which a neighbour counts fully towards cohesion
	pub flock_radius: f32,
	/// Neighbours closer than this are pushed away
	pub avoid_distance: f32,
	/// Weight of the previous draw position when smoothing jitter, `0` disables smoothing
	pub draw_smoothing: f32,
	/// Pull towards the centre of the neighbours
	pub cohesion_weight: f32,
	/// Pull towards the average heading of the neighbours, stops boids walking into each other
	pub alignment_weight: f32,
	/// Push away from neighbours that are too close
	pub separation_weight: f32,
	/// Pull along the [FlowField]
	pub path_weight: f32,
	/// How far along the velocity a boid aims before its step is capped to `speed`
	pub lookahead: f32,
}

impl Default for FlockConfig {
	fn default() -> Self {
		FlockConfig {
			speed: 2.0,
			flock_radius: 50.0,
			avoid_distance: 32.0,
			draw_smoothing: 0.8,
			cohesion_weight: 0.0,
			alignment_weight: 0.4,
			separation_weight: 0.4,
			path_weight: 0.4,
			lookahead: 10.0,
		}
	}
}

impl FlockConfig {
	/// Check every parameter is a non-negative finite number, the flock radius must also be non-zero
	pub fn validate(&self) -> Result<(), FlowFieldError> {
		let parameters = [
			("speed", self.speed),
			("flock_radius", self.flock_radius),
			("avoid_distance", self.avoid_distance),
			("draw_smoothing", self.draw_smoothing),
			("cohesion_weight", self.cohesion_weight),
			("alignment_weight", self.alignment_weight),
			("separation_weight", self.separation_weight),
			("path_weight", self.path_weight),
			("lookahead", self.lookahead),
		];
		for (name, value) in parameters {
			if !value.is_finite() || value < 0.0 {
				return Err(FlowFieldError::InvalidFlockConfig { name, value });
			}
		}
		if self.flock_radius == 0.0 {
			return Err(FlowFieldError::InvalidFlockConfig {
				name: "flock_radius",
				value: self.flock_radius,
			});
		}
		if self.draw_smoothing > 1.0 {
			return Err(FlowFieldError::InvalidFlockConfig {
				name: "draw_smoothing",
				value: self.draw_smoothing,
			});
		}
		Ok(())
	}
	/// From a `ron` file generate the [FlockConfig]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, FlowFieldError> {
		let file = std::fs::File::open(path)?;
		let config: FlockConfig = ron::de::from_reader(file)?;
		config.validate()?;
		Ok(config)
	}
}
