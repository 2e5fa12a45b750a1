//! Asset pipeline integration tests.
//!
//! These tests exercise the texture cache and render object construction
//! against every available backend. Backend-independent invariants (cache
//! identity, stream buffer layout, command recording) are checked on the
//! dummy backend; the same cases run on wgpu when the feature is enabled.

mod common;

use std::sync::Arc;

use common::*;
use rstest::rstest;
use whirligig_core::mesh::generators::{generate_cube, generate_quad};
use whirligig_graphics::{
    GraphicsError, IndexFormat, MaterialSlot, RenderCommand, RenderObject, RenderPass,
};

// ============================================================================
// Texture Cache
// ============================================================================

#[rstest]
#[case::dummy(Backend::Dummy)]
#[case::wgpu(Backend::Wgpu)]
fn test_cache_returns_same_texture_for_same_key(#[case] backend: Backend) {
    let Some(ctx) = TestContext::new(backend) else {
        eprintln!("Skipping test for unavailable backend {:?}", backend);
        return;
    };

    let fixture = MediaFixture::new(&format!("cache_same_key_{}", backend.name()));
    fixture.write_png("diff.png", 8, 8, [200, 60, 30, 255]);
    let cache = fixture.cache();

    let first = cache.get_or_load(&ctx.device, "diff.png", true).unwrap();
    let second = cache.get_or_load(&ctx.device, "diff.png", true).unwrap();

    // Same key, same GPU texture
    assert!(Arc::ptr_eq(&first, &second));
    // One reference held by the cache, two by this test
    assert_eq!(Arc::strong_count(&first), 3);
    assert_eq!(cache.len(), 1);
    assert_eq!(ctx.device.texture_count(), 1);
    assert_eq!(first.width(), 8);
    assert_eq!(first.height(), 8);
}

#[rstest]
#[case::dummy(Backend::Dummy)]
#[case::wgpu(Backend::Wgpu)]
fn test_cache_distinguishes_srgb_variants(#[case] backend: Backend) {
    let Some(ctx) = TestContext::new(backend) else {
        eprintln!("Skipping test for unavailable backend {:?}", backend);
        return;
    };

    let fixture = MediaFixture::new(&format!("cache_srgb_{}", backend.name()));
    fixture.write_png("map.png", 4, 4, [128, 128, 255, 255]);
    let cache = fixture.cache();

    let color = cache.get_or_load(&ctx.device, "map.png", true).unwrap();
    let linear = cache.get_or_load(&ctx.device, "map.png", false).unwrap();

    // Same file, different color space: two distinct GPU textures
    assert!(!Arc::ptr_eq(&color, &linear));
    assert!(color.format().is_srgb());
    assert!(!linear.format().is_srgb());
    assert_eq!(cache.len(), 2);
    assert_eq!(ctx.device.texture_count(), 2);

    assert!(cache.contains("map.png", true));
    assert!(cache.contains("map.png", false));
    assert!(!cache.contains("other.png", true));
}

#[rstest]
#[case::dummy(Backend::Dummy)]
#[case::wgpu(Backend::Wgpu)]
fn test_cache_release_all_keeps_caller_handles(#[case] backend: Backend) {
    let Some(ctx) = TestContext::new(backend) else {
        eprintln!("Skipping test for unavailable backend {:?}", backend);
        return;
    };

    let fixture = MediaFixture::new(&format!("cache_release_{}", backend.name()));
    fixture.write_png("held.png", 8, 8, [10, 20, 30, 255]);
    let cache = fixture.cache();

    let handle = cache.get_or_load(&ctx.device, "held.png", true).unwrap();
    assert_eq!(Arc::strong_count(&handle), 2);

    cache.release_all();
    assert!(cache.is_empty());

    // The caller's handle survives the release
    assert_eq!(Arc::strong_count(&handle), 1);
    assert_eq!(handle.width(), 8);

    // A later request loads fresh instead of reusing the released entry
    let reloaded = cache.get_or_load(&ctx.device, "held.png", true).unwrap();
    assert!(!Arc::ptr_eq(&handle, &reloaded));
    assert_eq!(cache.len(), 1);
}

#[rstest]
#[case::dummy(Backend::Dummy)]
#[case::wgpu(Backend::Wgpu)]
fn test_cache_missing_file_is_hard_error(#[case] backend: Backend) {
    let Some(ctx) = TestContext::new(backend) else {
        eprintln!("Skipping test for unavailable backend {:?}", backend);
        return;
    };

    let fixture = MediaFixture::new(&format!("cache_missing_{}", backend.name()));
    let cache = fixture.cache();

    let result = cache.get_or_load(&ctx.device, "missing_texture_57f3.png", true);
    match result {
        Err(GraphicsError::MediaNotFound(name)) => {
            // The error reports the requested name, not a resolved path
            assert_eq!(name, "missing_texture_57f3.png");
        }
        other => panic!("expected MediaNotFound, got {other:?}"),
    }
    assert!(cache.is_empty());
    assert_eq!(ctx.device.texture_count(), 0);
}

#[rstest]
#[case::dummy(Backend::Dummy)]
#[case::wgpu(Backend::Wgpu)]
fn test_cache_empty_path_rejected(#[case] backend: Backend) {
    let Some(ctx) = TestContext::new(backend) else {
        eprintln!("Skipping test for unavailable backend {:?}", backend);
        return;
    };

    let fixture = MediaFixture::new(&format!("cache_empty_{}", backend.name()));
    let cache = fixture.cache();

    let result = cache.get_or_load(&ctx.device, "", true);
    assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
    assert!(cache.is_empty());
}

// ============================================================================
// Render Objects
// ============================================================================

#[rstest]
#[case::dummy(Backend::Dummy)]
#[case::wgpu(Backend::Wgpu)]
fn test_render_object_build_and_draw(#[case] backend: Backend) {
    let Some(ctx) = TestContext::new(backend) else {
        eprintln!("Skipping test for unavailable backend {:?}", backend);
        return;
    };

    let fixture = MediaFixture::new(&format!("object_quad_{}", backend.name()));
    fixture.write_png("diff.png", 16, 16, [220, 180, 40, 255]);
    fixture.write_png("normal.png", 16, 16, [128, 128, 255, 255]);
    let cache = fixture.cache();

    let mesh = generate_quad(0.5, 0.5);
    let object = RenderObject::build(&ctx.device, &cache, &mesh, "diff.png", "normal.png").unwrap();

    assert_eq!(object.vertex_count(), 4);
    assert_eq!(object.index_count(), 6);
    assert_eq!(object.face_count(), 2);
    assert_eq!(object.label(), Some("quad"));

    // One stream buffer per attribute: positions, normals, texcoords
    assert_eq!(object.vertex_buffers().len(), 3);
    assert_eq!(object.vertex_buffers()[0].size(), 4 * 12);
    assert_eq!(object.vertex_buffers()[1].size(), 4 * 12);
    assert_eq!(object.vertex_buffers()[2].size(), 4 * 8);
    assert_eq!(object.index_buffer().size(), 6 * 4);
    assert_eq!(ctx.device.buffer_count(), 4);

    // Diffuse is sRGB, normal is linear, specular stays unbound
    let diffuse = object.texture(MaterialSlot::Diffuse).unwrap();
    let normal = object.texture(MaterialSlot::Normal).unwrap();
    assert!(diffuse.format().is_srgb());
    assert!(!normal.format().is_srgb());
    assert!(object.texture(MaterialSlot::Specular).is_none());

    let mut pass = RenderPass::new("quad");
    object.render(&mut pass);

    // Index buffer + 3 streams + 3 material slots + 1 draw
    assert_eq!(pass.commands().len(), 8);
    assert_eq!(pass.draw_count(), 1);
    assert!(matches!(
        pass.commands()[0],
        RenderCommand::SetIndexBuffer {
            format: IndexFormat::Uint32,
            ..
        }
    ));
    assert!(matches!(
        pass.commands()[7],
        RenderCommand::DrawIndexed {
            index_count: 6,
            first_index: 0,
            base_vertex: 0,
        }
    ));
}

#[rstest]
#[case::dummy(Backend::Dummy)]
#[case::wgpu(Backend::Wgpu)]
fn test_render_object_binds_every_material_slot(#[case] backend: Backend) {
    let Some(ctx) = TestContext::new(backend) else {
        eprintln!("Skipping test for unavailable backend {:?}", backend);
        return;
    };

    let fixture = MediaFixture::new(&format!("object_slots_{}", backend.name()));
    fixture.write_png("diff.png", 4, 4, [255, 0, 0, 255]);
    fixture.write_png("normal.png", 4, 4, [128, 128, 255, 255]);
    let cache = fixture.cache();

    let object = RenderObject::build(
        &ctx.device,
        &cache,
        &generate_quad(1.0, 1.0),
        "diff.png",
        "normal.png",
    )
    .unwrap();

    let mut pass = RenderPass::new("slots");
    object.render(&mut pass);

    let bound: Vec<(u32, bool)> = pass
        .commands()
        .iter()
        .filter_map(|c| match c {
            RenderCommand::SetTexture { slot, texture } => Some((*slot, texture.is_some())),
            _ => None,
        })
        .collect();

    // Slots 0..2 are always set; only specular (1) is empty
    assert_eq!(bound, vec![(0, true), (1, false), (2, true)]);
}

#[rstest]
#[case::dummy(Backend::Dummy)]
#[case::wgpu(Backend::Wgpu)]
fn test_render_objects_share_cached_textures(#[case] backend: Backend) {
    let Some(ctx) = TestContext::new(backend) else {
        eprintln!("Skipping test for unavailable backend {:?}", backend);
        return;
    };

    let fixture = MediaFixture::new(&format!("object_share_{}", backend.name()));
    fixture.write_png("shared_diff.png", 8, 8, [90, 120, 200, 255]);
    fixture.write_png("shared_norm.png", 8, 8, [128, 128, 255, 255]);
    let cache = fixture.cache();

    let quad = RenderObject::build(
        &ctx.device,
        &cache,
        &generate_quad(1.0, 1.0),
        "shared_diff.png",
        "shared_norm.png",
    )
    .unwrap();
    let cube = RenderObject::build(
        &ctx.device,
        &cache,
        &generate_cube(0.5),
        "shared_diff.png",
        "shared_norm.png",
    )
    .unwrap();

    // Both objects reference the same two GPU textures
    let quad_diffuse = quad.texture(MaterialSlot::Diffuse).unwrap();
    let cube_diffuse = cube.texture(MaterialSlot::Diffuse).unwrap();
    assert!(Arc::ptr_eq(quad_diffuse, cube_diffuse));

    let quad_normal = quad.texture(MaterialSlot::Normal).unwrap();
    let cube_normal = cube.texture(MaterialSlot::Normal).unwrap();
    assert!(Arc::ptr_eq(quad_normal, cube_normal));

    assert_eq!(cache.len(), 2);
    assert_eq!(ctx.device.texture_count(), 2);
}

#[rstest]
#[case::dummy(Backend::Dummy)]
#[case::wgpu(Backend::Wgpu)]
fn test_cube_draw_covers_all_indices(#[case] backend: Backend) {
    let Some(ctx) = TestContext::new(backend) else {
        eprintln!("Skipping test for unavailable backend {:?}", backend);
        return;
    };

    let fixture = MediaFixture::new(&format!("object_cube_{}", backend.name()));
    fixture.write_png("diff.png", 8, 8, [200, 200, 200, 255]);
    fixture.write_png("normal.png", 8, 8, [128, 128, 255, 255]);
    let cache = fixture.cache();

    let mesh = generate_cube(1.0);
    let object = RenderObject::build(&ctx.device, &cache, &mesh, "diff.png", "normal.png").unwrap();

    assert_eq!(object.vertex_count(), 24);
    assert_eq!(object.index_count(), 36);
    assert_eq!(object.face_count(), 12);

    let mut pass = RenderPass::new("cube");
    object.render(&mut pass);
    assert!(matches!(
        pass.commands().last(),
        Some(RenderCommand::DrawIndexed {
            index_count: 36,
            first_index: 0,
            base_vertex: 0,
        })
    ));
}
