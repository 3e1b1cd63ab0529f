#![cfg(feature = "integration-tests")]

use std::io::Cursor;

use portal_scene::{
    data_structures::texture::Texture,
    pipelines::{Layouts, Pipelines, baked},
    resources::{ModelData, mesh::upload_meshes},
};

use crate::common::test_utils::{build_glb, headless_device};

mod common;

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

fn baked_png() -> Vec<u8> {
    let img = image::RgbaImage::from_fn(4, 2, |x, _| image::Rgba([(x * 60) as u8, 32, 64, 255]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png)
        .expect("failed to encode png");
    bytes.into_inner()
}

#[test]
fn should_compile_every_pipeline() {
    let (device, _queue) = headless_device();
    let layouts = Layouts::new(&device);

    let pipelines = futures::executor::block_on(Pipelines::new(&device, FORMAT, &layouts));

    assert!(pipelines.is_ok(), "{:?}", pipelines.err());
}

#[test]
fn should_upload_the_baked_texture_in_srgb() {
    let (device, queue) = headless_device();
    let layouts = Layouts::new(&device);

    let texture =
        Texture::from_bytes(&device, &queue, &baked_png(), "baked.png", Some("png"), true).unwrap();
    let _bind_group = baked::mk_bind_group(&device, &layouts.texture, &texture);

    assert_eq!(texture.texture.width(), 4);
    assert_eq!(texture.texture.height(), 2);
    assert_eq!(texture.texture.format(), wgpu::TextureFormat::Rgba8UnormSrgb);
}

#[test]
fn should_upload_one_mesh_per_primitive() {
    let (device, _queue) = headless_device();
    let model = ModelData::from_slice(&build_glb(&["Baked", "Circle"]), "portal.glb").unwrap();

    let meshes = upload_meshes(&model.meshes, &device);

    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].num_elements, 3);
}
