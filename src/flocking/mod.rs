//! Flocking steers a group of actors along a [FlowField] while keeping them together as a crowd.
//!
//! Each [Boid] blends the direction of the flow field with the classic boid rules of cohesion,
//! alignment and separation. Which other boids count as neighbours is decided externally (e.g. by
//! a physics sensor) and reported to the boid, see [Neighbours].
//!
//! A physics step first captures a [FlockSnapshot] of every boid, then each boid calculates its
//! new velocity and position from that frozen snapshot. The outcome of a step is therefore
//! independent of the order boids are visited in.
//!

pub mod boid;
pub mod config;
pub mod neighbours;
