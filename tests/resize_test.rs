use portal_scene::{
    config::SceneConfig,
    data_structures::fireflies::FireflyField,
    scene::SceneState,
    viewport::{Viewport, clamp_pixel_ratio},
};
use rand::{SeedableRng, rngs::SmallRng};

use crate::common::test_utils::test_scene;

mod common;

#[test]
fn should_set_aspect_to_width_over_height() {
    let mut scene = test_scene(800, 600, 1.0);

    assert!(scene.resize(1280, 720, 1.0));

    assert_eq!(scene.projection.aspect(), 1280.0 / 720.0);
    assert_eq!(scene.viewport.size(), (1280, 720));
}

#[test]
fn should_clamp_pixel_ratio_to_two() {
    let mut scene = test_scene(800, 600, 1.0);

    scene.resize(1000, 500, 3.0);

    assert_eq!(scene.viewport.pixel_ratio(), 2.0);
    assert_eq!(scene.fireflies_uniform.pixel_ratio, 2.0);
    assert_eq!(scene.viewport.backing_size(), (2000, 1000));
    assert_eq!(scene.fireflies_uniform.resolution, [2000.0, 1000.0]);
}

#[test]
fn should_keep_fractional_pixel_ratios_below_the_cap() {
    let mut scene = test_scene(800, 600, 1.0);

    scene.resize(801, 601, 1.5);

    assert_eq!(scene.viewport.pixel_ratio(), 1.5);
    assert_eq!(scene.fireflies_uniform.pixel_ratio, 1.5);
    // round(801 * 1.5) = 1202, round(601 * 1.5) = 902
    assert_eq!(scene.viewport.backing_size(), (1202, 902));
}

#[test]
fn should_be_idempotent_for_equal_input() {
    let mut scene = test_scene(800, 600, 1.0);

    scene.resize(1024, 768, 2.0);
    let viewport = scene.viewport;
    let aspect = scene.projection.aspect();
    let uniform = scene.fireflies_uniform;

    scene.resize(1024, 768, 2.0);

    assert_eq!(scene.viewport, viewport);
    assert_eq!(scene.projection.aspect(), aspect);
    assert_eq!(scene.fireflies_uniform, uniform);
}

#[test]
fn should_ignore_zero_sized_viewports() {
    let mut scene = test_scene(800, 600, 1.0);

    assert!(!scene.resize(0, 600, 1.0));
    assert!(!scene.resize(800, 0, 2.0));

    assert_eq!(scene.viewport.size(), (800, 600));
    assert_eq!(scene.projection.aspect(), 800.0 / 600.0);
    assert_eq!(scene.fireflies_uniform.pixel_ratio, 1.0);
}

#[test]
fn should_start_from_a_window_without_layout() {
    let config = SceneConfig::default();
    for (width, height) in [(0, 600), (800, 0), (0, 0)] {
        let fireflies = FireflyField::generate(config.firefly_count, &mut SmallRng::seed_from_u64(3));
        let mut scene =
            SceneState::new(&config, Viewport::from_physical(width, height, 1.0), fireflies);

        assert!(scene.projection.aspect() > 0.0);
        let matrix: [[f32; 4]; 4] = scene.projection.calc_matrix().into();
        assert!(matrix.iter().flatten().all(|value| value.is_finite()));

        assert!(scene.resize(800, 600, 1.0));
        assert_eq!(scene.projection.aspect(), 800.0 / 600.0);
    }
}

#[test]
fn should_recover_logical_size_from_physical_pixels() {
    let viewport = Viewport::from_physical(2560, 1440, 2.0);

    assert_eq!(viewport.size(), (1280, 720));
    assert_eq!(viewport.pixel_ratio(), 2.0);
    assert_eq!(viewport.backing_size(), (2560, 1440));
}

#[test]
fn should_clamp_device_pixel_ratios() {
    assert_eq!(clamp_pixel_ratio(1.0), 1.0);
    assert_eq!(clamp_pixel_ratio(2.0), 2.0);
    assert_eq!(clamp_pixel_ratio(2.625), 2.0);
}

#[test]
fn should_track_the_configured_surface_size() {
    let mut scene = test_scene(800, 600, 3.0);

    scene.set_surface_size(2400, 1800);

    assert_eq!(scene.fireflies_uniform.resolution, [2400.0, 1800.0]);
    assert_eq!(scene.fireflies_uniform.pixel_ratio, 2.0);
}
