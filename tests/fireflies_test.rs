use portal_scene::data_structures::fireflies::{
    FireflyField, HORIZONTAL_RANGE, SCALE_RANGE, VERTICAL_RANGE,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::common::test_utils::SequenceSource;

mod common;

#[test]
fn should_generate_thirty_fireflies_within_bounds() {
    let field = FireflyField::generate(30, &mut SmallRng::seed_from_u64(7));

    assert_eq!(field.len(), 30);
    assert_eq!(field.positions().len(), 90);
    assert_eq!(field.scales().len(), 30);
    for idx in 0..field.len() {
        let [x, y, z] = field.position(idx).expect("position in range");
        assert!((-2.0..=2.0).contains(&x), "x = {x}");
        assert!((0.0..=2.0).contains(&y), "y = {y}");
        assert!((-2.0..=2.0).contains(&z), "z = {z}");
        let scale = field.scales()[idx];
        assert!((0.0..=1.0).contains(&scale), "scale = {scale}");
    }
}

#[test]
fn should_map_extreme_samples_to_range_edges() {
    let mut low = SequenceSource::new(vec![0.0]);
    let field = FireflyField::generate(1, &mut low);
    assert_eq!(field.position(0), Some([HORIZONTAL_RANGE.start, VERTICAL_RANGE.start, HORIZONTAL_RANGE.start]));
    assert_eq!(field.scales(), &[SCALE_RANGE.start]);

    // Largest sample `random::<f32>()` can return.
    let max_sample = 1.0 - f32::EPSILON / 2.0;
    let mut high = SequenceSource::new(vec![max_sample]);
    let field = FireflyField::generate(1, &mut high);
    let [x, y, z] = field.position(0).expect("one particle");
    let scale = field.scales()[0];
    for (value, end) in [
        (x, HORIZONTAL_RANGE.end),
        (y, VERTICAL_RANGE.end),
        (z, HORIZONTAL_RANGE.end),
        (scale, SCALE_RANGE.end),
    ] {
        assert!(value < end, "{value} reaches {end}");
        assert!(end - value < 1e-5, "{value} is far from {end}");
    }
}

#[test]
fn should_consume_samples_in_x_y_z_scale_order() {
    let mut source = SequenceSource::new(vec![0.25, 0.5, 0.75, 0.125]);
    let field = FireflyField::generate(1, &mut source);

    assert_eq!(field.position(0), Some([-1.0, 1.0, 1.0]));
    assert_eq!(field.scales(), &[0.125]);
}

#[test]
fn should_keep_raw_instances_in_sync_with_arrays() {
    let field = FireflyField::generate(5, &mut SmallRng::seed_from_u64(42));
    let raw = field.to_raw();

    assert_eq!(raw.len(), 5);
    for (idx, particle) in raw.iter().enumerate() {
        assert_eq!(Some(particle.position), field.position(idx));
        assert_eq!(particle.scale, field.scales()[idx]);
    }
}

#[test]
fn should_generate_an_empty_field() {
    let field = FireflyField::generate(0, &mut SmallRng::seed_from_u64(1));
    assert!(field.is_empty());
    assert!(field.to_raw().is_empty());
    assert_eq!(field.position(0), None);
}

#[test]
fn should_stay_inside_half_open_ranges() {
    let field = FireflyField::generate(10_000, &mut SmallRng::seed_from_u64(0));
    for idx in 0..field.len() {
        let [x, y, z] = field.position(idx).expect("position in range");
        assert!(HORIZONTAL_RANGE.contains(&x), "x = {x}");
        assert!(VERTICAL_RANGE.contains(&y), "y = {y}");
        assert!(HORIZONTAL_RANGE.contains(&z), "z = {z}");
        assert!(SCALE_RANGE.contains(&field.scales()[idx]));
    }
}

#[test]
fn should_repeat_a_seeded_sequence() {
    let a = FireflyField::generate(30, &mut SmallRng::seed_from_u64(1234));
    let b = FireflyField::generate(30, &mut SmallRng::seed_from_u64(1234));
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.scales(), b.scales());
}

#[test]
fn should_scatter_differently_for_different_seeds() {
    let a = FireflyField::generate(30, &mut SmallRng::seed_from_u64(1));
    let b = FireflyField::generate(30, &mut SmallRng::seed_from_u64(2));
    assert_ne!(a.positions(), b.positions());
}

#[test]
fn should_draw_four_samples_per_particle() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut replay = SmallRng::seed_from_u64(9);
    let field = FireflyField::generate(3, &mut rng);

    let expected: Vec<f32> = (0..12).map(|_| replay.random::<f32>()).collect();
    assert_eq!(field.scales()[0], expected[3]);
    assert_eq!(field.scales()[2], expected[11]);
    // Both generators are now at the same point of the stream.
    assert_eq!(rng.random::<u64>(), replay.random::<u64>());
}
