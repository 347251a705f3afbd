//! Measure deriving a large CostField from terrain
//!

use bevy_flowfield_flocking_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Create a CostField from a terrain with a wall every tenth column
fn init_cost_field(columns: usize, rows: usize) {
	let dimensions = GridDimensions::new(columns, rows).unwrap();
	let terrain = |column: usize, _row: usize| -> u8 {
		if column % 10 == 9 {
			2
		} else {
			0
		}
	};
	let _cost_field = CostField::from_terrain(dimensions, &terrain);
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("data_initialisation");
	group.significance_level(0.05).sample_size(100);
	group.bench_function("init_cost_field", |b| {
		b.iter(|| init_cost_field(black_box(1000), black_box(1000)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
