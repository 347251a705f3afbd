//! Generates a 10x10 world from `assets/terrain.ron`. Left click spawns a boid under the cursor,
//! right click sets the target the flock heads towards. Holding `1`, `2` or `3` paints open,
//! difficult or impassable ground under the cursor.
//!
//! World `y` points up so row `0` of the terrain is drawn along the bottom of the window
//!

use bevy::{prelude::*, window::PrimaryWindow};
use bevy_flowfield_flocking_plugin::prelude::*;

/// Dimension of square sprites making up the world
const FIELD_SPRITE_DIMENSION: f32 = DEFAULT_CELL_SIZE;

fn main() {
	App::new()
		.add_plugins(DefaultPlugins)
		.add_plugins(FlowFieldFlockingPlugin)
		.add_systems(Startup, setup)
		.add_systems(
			Update,
			(
				(user_input, paint_terrain).before(FieldSet::Terrain),
				(recolour_tiles, report_rebuild_timings).after(FieldSet::Rebuild),
			),
		)
		.add_systems(
			FixedUpdate,
			track_proximity.before(process_neighbour_events),
		)
		.run();
}

/// Labels the boid sprites
#[derive(Component)]
struct BoidSprite;

/// Attached to each tile sprite so it can be recoloured when the terrain changes
#[derive(Component)]
struct TileLabel(FieldCell);

/// Colour of a tile of the given kind
fn tile_colour(kind: Option<TerrainKind>) -> Color {
	match kind {
		Some(TerrainKind::Impassable) => Color::srgb(0.1, 0.1, 0.1),
		Some(TerrainKind::Difficult) => Color::srgb(0.4, 0.3, 0.1),
		_ => Color::srgb(0.2, 0.5, 0.2),
	}
}

/// Load the terrain, insert the navigation resources and spawn a sprite per cell
fn setup(mut cmds: Commands) {
	let path = env!("CARGO_MANIFEST_DIR").to_string() + "/assets/terrain.ron";
	let terrain = match TerrainGrid::from_ron(&path) {
		Ok(terrain) => terrain,
		Err(e) => {
			error!("Failed loading terrain: {}", e);
			return;
		}
	};
	let fields = match NavigationFields::from_terrain(&terrain, FIELD_SPRITE_DIMENSION) {
		Ok(fields) => fields,
		Err(e) => {
			error!("Failed creating fields: {}", e);
			return;
		}
	};
	let dimensions = terrain.get_dimensions();
	let centre = Vec2::new(
		dimensions.get_columns() as f32,
		dimensions.get_rows() as f32,
	) * FIELD_SPRITE_DIMENSION
		/ 2.0;
	cmds.spawn((Camera2d, Transform::from_xyz(centre.x, centre.y, 0.0)));
	for field_cell in dimensions.iter_field_cells() {
		let position = fields.get_cell_centre(field_cell);
		cmds.spawn((
			Sprite::from_color(
				tile_colour(terrain.get_kind(field_cell)),
				Vec2::splat(FIELD_SPRITE_DIMENSION - 1.0),
			),
			Transform::from_xyz(position.x, position.y, 0.0),
			TileLabel(field_cell),
		));
	}
	cmds.insert_resource(fields);
	cmds.insert_resource(terrain);
}

/// Find the [FieldCell] under the cursor
fn cursor_field_cell(
	windows: &Query<&Window, With<PrimaryWindow>>,
	camera_q: &Query<(&Camera, &GlobalTransform)>,
	fields: &NavigationFields,
) -> Option<(Vec2, FieldCell)> {
	let (Ok((camera, camera_transform)), Ok(window)) = (camera_q.single(), windows.single())
	else {
		return None;
	};
	let world_position = window
		.cursor_position()
		.and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok())?;
	fields
		.get_field_cell(world_position)
		.map(|field_cell| (world_position, field_cell))
}

/// Handle spawning boids via left click and choosing a target via right click
fn user_input(
	mut cmds: Commands,
	mouse_button_input: Res<ButtonInput<MouseButton>>,
	windows: Query<&Window, With<PrimaryWindow>>,
	camera_q: Query<(&Camera, &GlobalTransform)>,
	fields: Option<Res<NavigationFields>>,
	boids: Query<&Boid>,
	mut event_target: EventWriter<EventTargetSelected>,
) {
	let Some(fields) = fields else {
		return;
	};
	let left = mouse_button_input.just_released(MouseButton::Left);
	let right = mouse_button_input.just_released(MouseButton::Right);
	if !left && !right {
		return;
	}
	let Some((world_position, field_cell)) = cursor_field_cell(&windows, &camera_q, &fields) else {
		error!("Cursor out of bounds");
		return;
	};
	if right {
		event_target.write(EventTargetSelected::new(field_cell));
	}
	if left {
		let index = boids.iter().count() as u32;
		cmds.spawn((
			Boid::new(index, world_position),
			BoidSprite,
			Sprite::from_color(Color::srgb(0.9, 0.0, 1.0), Vec2::splat(8.0)),
			Transform::from_xyz(world_position.x, world_position.y, 1.0),
		));
	}
}

/// A brute force proximity sensor, reports boids entering and leaving the flock radius of each other
fn track_proximity(
	boids: Query<(Entity, &Boid), With<BoidSprite>>,
	config: Res<FlockConfig>,
	mut entered: EventWriter<EventNeighbourEntered>,
	mut exited: EventWriter<EventNeighbourExited>,
) {
	for (entity, boid) in boids.iter() {
		for (other, other_boid) in boids.iter() {
			if entity == other {
				continue;
			}
			let in_range =
				boid.get_position().distance(other_boid.get_position()) < config.flock_radius;
			let known = boid.get_neighbours().contains(other);
			if in_range && !known {
				entered.write(EventNeighbourEntered::new(entity, other));
			} else if !in_range && known {
				exited.write(EventNeighbourExited::new(entity, other));
			}
		}
	}
}

/// Paint the terrain under the cursor while `1` (open), `2` (difficult) or `3` (impassable) is held
fn paint_terrain(
	keyboard_input: Res<ButtonInput<KeyCode>>,
	windows: Query<&Window, With<PrimaryWindow>>,
	camera_q: Query<(&Camera, &GlobalTransform)>,
	fields: Option<Res<NavigationFields>>,
	terrain: Option<Res<TerrainGrid>>,
	mut event_terrain: EventWriter<EventUpdateTerrainCell>,
) {
	let (Some(fields), Some(terrain)) = (fields, terrain) else {
		return;
	};
	let kind = if keyboard_input.pressed(KeyCode::Digit1) {
		TerrainKind::Normal
	} else if keyboard_input.pressed(KeyCode::Digit2) {
		TerrainKind::Difficult
	} else if keyboard_input.pressed(KeyCode::Digit3) {
		TerrainKind::Impassable
	} else {
		return;
	};
	let Some((_, field_cell)) = cursor_field_cell(&windows, &camera_q, &fields) else {
		return;
	};
	// only send an edit when it changes something, the whole map is rebuilt for each one
	if terrain.get_kind(field_cell) != Some(kind) {
		event_terrain.write(EventUpdateTerrainCell::new(field_cell, kind.as_kind()));
	}
}

/// Update tile colours after the terrain has been edited
fn recolour_tiles(terrain: Option<Res<TerrainGrid>>, mut tiles: Query<(&TileLabel, &mut Sprite)>) {
	let Some(terrain) = terrain else {
		return;
	};
	if !terrain.is_changed() {
		return;
	}
	for (label, mut sprite) in tiles.iter_mut() {
		sprite.color = tile_colour(terrain.get_kind(label.0));
	}
}

/// Log how long the fields took to build whenever they lead to a new target or were rebuilt
fn report_rebuild_timings(fields: Option<Res<NavigationFields>>) {
	let Some(fields) = fields else {
		return;
	};
	if !fields.is_changed() || fields.get_target().is_none() {
		return;
	}
	let timings = fields.get_timings();
	info!(
		"Integration: {:?}, Flow Field: {:?}, Total: {:?}",
		timings.get_integration(),
		timings.get_flow(),
		timings.get_total()
	);
}
