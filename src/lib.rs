//! This is a plugin for Bevy game engine to setup and handle the logic for calculating pathfinding FlowFields over a weighted grid and steering a flock of actors along them
//!

pub mod flocking;
pub mod flowfields;
pub mod plugin;

pub mod prelude;
