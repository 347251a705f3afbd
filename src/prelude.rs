//! `use bevy_flowfield_flocking_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::flowfields::{
	error::*,
	fields::{cost_field::*, flow_field::*, integration_field::*, *},
	navigation::*,
	terrain::*,
	utilities::*,
	*,
};

#[doc(hidden)]
pub use crate::flocking::{boid::*, config::*, neighbours::*, *};

#[doc(hidden)]
pub use crate::plugin::{field_layer::*, flock_layer::*, *};
