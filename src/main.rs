//! Sphere Field: real-time software sphere rasterizer
//!
//! Renders a seeded field of spheres as flat discs into a CPU framebuffer,
//! rotating the field about the vertical axis at 45 degrees per second.
//!
//! Usage:
//!   sphere-field [--config scene.ron]
//!
//! Keys:
//!   Space  - pause/resume rotation
//!   Tab    - toggle approximate/silhouette sphere sizing
//!   P      - save a PNG snapshot of the current frame
//!   Escape - quit

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod scene;
mod app;

use macroquad::prelude::*;
use rasterizer::{HEIGHT, WIDTH};
use scene::{load_config, SceneConfig};
use app::{fps_label, AppState};
use std::path::PathBuf;
use tracing::{info, warn};

fn window_conf() -> Conf {
    Conf {
        window_title: "Sphere Field".to_string(),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn config_path_from_args() -> Option<PathBuf> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn load_startup_config() -> SceneConfig {
    let Some(path) = config_path_from_args() else {
        return SceneConfig::default();
    };
    match load_config(&path) {
        Ok(config) => {
            info!(path = %path.display(), "Loaded config");
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Config load failed, using defaults");
            SceneConfig::default()
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!(version = VERSION, width = WIDTH, height = HEIGHT, "Starting Sphere Field");

    let config = load_startup_config();
    let mut app = AppState::new(&config);

    // RGBA upload buffer, reused every frame
    let mut rgba: Vec<u8> = Vec::with_capacity(WIDTH * HEIGHT * 4);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Space) {
            app.toggle_pause();
        }
        if is_key_pressed(KeyCode::Tab) {
            app.toggle_sizing();
        }

        let delta = get_frame_time() as f64;
        let start = get_time();
        app.tick(delta);
        let render_secs = get_time() - start;

        if is_key_pressed(KeyCode::P) {
            match app.save_snapshot() {
                Ok(path) => info!(path = %path.display(), "Saved snapshot"),
                Err(e) => warn!(error = %e, "Snapshot failed"),
            }
        }

        app.framebuffer.write_rgba8(&mut rgba);
        let texture = Texture2D::from_rgba8(WIDTH as u16, HEIGHT as u16, &rgba);
        texture.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );
        draw_text(&fps_label(render_secs), 10.0, 24.0, 24.0, WHITE);

        next_frame().await
    }

    info!(frames = app.frame, "Exiting");
}
