//! Example host demonstrating the asset lifecycle
//!
//! A render thread resolves a shader every frame while the main thread
//! hot-reloads it. Teardown runs after rendering stops and before the
//! rendering context is destroyed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use asset_registry::prelude::*;

/// Stand-in for the graphics context asset destructors depend on
struct RenderContext {
    alive: AtomicBool,
    frames: AtomicU64,
}

impl RenderContext {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            alive: AtomicBool::new(true),
            frames: AtomicU64::new(0),
        })
    }

    fn destroy(&self) {
        self.alive.store(false, Ordering::SeqCst);
        log::info!("Render context destroyed");
    }
}

/// Compiled shader program owned by the registry
struct ShaderProgram {
    context: Arc<RenderContext>,
    name: String,
    revision: u32,
}

impl Asset for ShaderProgram {
    fn asset_name() -> &'static str {
        "ShaderProgram"
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if self.context.alive.load(Ordering::SeqCst) {
            log::debug!("Deleting program {} r{}", self.name, self.revision);
        } else {
            log::error!(
                "Program {} r{} outlived its render context",
                self.name,
                self.revision
            );
        }
    }
}

/// Mesh metadata, read through `AssetRef::map`
struct MeshAsset {
    vertex_count: u32,
}

impl Asset for MeshAsset {
    fn asset_name() -> &'static str {
        "Mesh"
    }
}

fn render_loop(
    registry: Arc<AssetRegistry>,
    context: Arc<RenderContext>,
    shader: AssetHandle<ShaderProgram>,
    mesh: AssetHandle<MeshAsset>,
    running: Arc<AtomicBool>,
) -> Result<(), AssetError> {
    let shaders = registry.table::<ShaderProgram>();
    let meshes = registry.table::<MeshAsset>();
    let mut last_revision = 0;

    while running.load(Ordering::SeqCst) {
        // Resolve, use, drop: one table at a time
        let revision = {
            let program = shaders.get(shader)?;
            program.revision
        };
        let vertices = *AssetRef::map(meshes.get(mesh)?, |m| &m.vertex_count);

        if revision != last_revision {
            log::info!("Frame now drawing {vertices} vertices with shader r{revision}");
            last_revision = revision;
        }

        context.frames.fetch_add(1, Ordering::Relaxed);
        thread::sleep(Duration::from_millis(2));
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => RegistryConfig::load(path)?,
        None => RegistryConfig::default(),
    };
    log::info!("Starting with {config:?}");

    let context = RenderContext::new();
    let registry = Arc::new(AssetRegistry::new(config));

    let shader = registry.table::<ShaderProgram>().init(ShaderProgram {
        context: Arc::clone(&context),
        name: "basic".to_string(),
        revision: 1,
    });
    let mesh = registry
        .table::<MeshAsset>()
        .init(MeshAsset { vertex_count: 36 });

    let running = Arc::new(AtomicBool::new(true));
    let renderer = {
        let registry = Arc::clone(&registry);
        let context = Arc::clone(&context);
        let running = Arc::clone(&running);
        thread::spawn(move || render_loop(registry, context, shader, mesh, running))
    };

    // Hot-reload the shader a few times while frames are in flight
    for revision in 2..=4 {
        thread::sleep(Duration::from_millis(20));
        registry.table::<ShaderProgram>().replace(
            shader,
            ShaderProgram {
                context: Arc::clone(&context),
                name: "basic".to_string(),
                revision,
            },
        )?;
    }

    thread::sleep(Duration::from_millis(20));
    running.store(false, Ordering::SeqCst);
    match renderer.join() {
        Ok(result) => result?,
        Err(_) => return Err("render thread panicked".into()),
    }

    log::info!(
        "Rendered {} frames, live assets: {:?}",
        context.frames.load(Ordering::Relaxed),
        registry.stats()
    );

    registry.table::<MeshAsset>().release(mesh)?;
    registry.teardown_all();
    context.destroy();

    Ok(())
}
