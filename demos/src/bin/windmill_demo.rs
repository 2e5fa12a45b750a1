//! # Windmill Demo
//!
//! Builds a small windmill scene on top of the asset pipeline:
//! - Generates demo textures into a temporary media directory
//! - Resolves them through the media search path
//! - Builds render objects (sail quad, tower cube) over the texture cache
//! - Records one frame of bind and draw commands
//!
//! Runs on the dummy backend by default; enable the `wgpu-backend` feature
//! to upload to a real GPU.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use whirligig_core::mesh::generators::{generate_cube, generate_quad};
use whirligig_graphics::{
    BackendKind, GraphicsInstance, MaterialSlot, RenderObject, RenderPass, ResourceCache,
};
use whirligig_media::MediaResolver;

/// Write the demo textures into `<dir>/media`.
fn write_demo_media(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let media_dir = dir.join("media");
    std::fs::create_dir_all(&media_dir)?;

    // Wooden checker for the sails
    let sail = image::RgbaImage::from_fn(64, 64, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            image::Rgba([188, 136, 72, 255])
        } else {
            image::Rgba([121, 85, 46, 255])
        }
    });
    sail.save(media_dir.join("WindMill_Diff.png"))?;

    // Stone checker for the tower
    let tower = image::RgbaImage::from_fn(64, 64, |x, y| {
        if (x / 16 + y / 16) % 2 == 0 {
            image::Rgba([168, 168, 160, 255])
        } else {
            image::Rgba([120, 120, 116, 255])
        }
    });
    tower.save(media_dir.join("Tower_Diff.png"))?;

    // Flat +Z normal map shared by both objects
    let normal = image::RgbaImage::from_pixel(64, 64, image::Rgba([128, 128, 255, 255]));
    normal.save(media_dir.join("WindMill_Normal.png"))?;

    Ok(media_dir)
}

fn select_backend() -> BackendKind {
    if cfg!(feature = "wgpu-backend") {
        BackendKind::Wgpu
    } else {
        BackendKind::Dummy
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let scratch = std::env::temp_dir().join("whirligig_windmill_demo");
    let _ = std::fs::remove_dir_all(&scratch);
    std::fs::create_dir_all(&scratch)?;
    let media_dir = write_demo_media(&scratch)?;

    let mut resolver = MediaResolver::new()?;
    resolver.set_media_search_path(&media_dir);
    let cache = ResourceCache::new(resolver);

    let instance = match GraphicsInstance::new(select_backend()) {
        Ok(instance) => instance,
        Err(err) => {
            log::warn!("Falling back to dummy backend: {err}");
            GraphicsInstance::new(BackendKind::Dummy)?
        }
    };
    let adapter = instance.adapter_info();
    log::info!("Adapter: {} ({:?})", adapter.name, adapter.device_type);

    let device = instance.create_device()?;

    let sails = RenderObject::build(
        &device,
        &cache,
        &generate_quad(2.0, 0.4).with_label("sails"),
        "WindMill_Diff.png",
        "WindMill_Normal.png",
    )?;
    let tower = RenderObject::build(
        &device,
        &cache,
        &generate_cube(1.0).with_label("tower"),
        "Tower_Diff.png",
        "WindMill_Normal.png",
    )?;

    log::info!(
        "Scene ready: {} buffers, {} textures on device, {} cache entries",
        device.buffer_count(),
        device.texture_count(),
        cache.len()
    );

    // Both objects resolve the same normal map to one GPU texture
    if let (Some(a), Some(b)) = (
        sails.texture(MaterialSlot::Normal),
        tower.texture(MaterialSlot::Normal),
    ) {
        log::info!("Normal map shared between objects: {}", Arc::ptr_eq(a, b));
    }

    let mut pass = RenderPass::new("windmill");
    sails.render(&mut pass);
    tower.render(&mut pass);
    log::info!(
        "Recorded pass '{}': {} commands, {} draws, {} indices",
        pass.name(),
        pass.commands().len(),
        pass.draw_count(),
        sails.index_count() + tower.index_count()
    );

    cache.release_all();
    std::fs::remove_dir_all(&scratch)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Whirligig Windmill Demo");
    log::info!("Core version: {}", whirligig_core::VERSION);
    log::info!("Graphics version: {}", whirligig_graphics::VERSION);

    whirligig_core::init();
    whirligig_graphics::init();

    if let Err(err) = run() {
        log::error!("Demo failed: {err}");
        std::process::exit(1);
    }
}
