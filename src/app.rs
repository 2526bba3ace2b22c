//! Application state
//!
//! Owns the scene and the framebuffer and is threaded through the main loop.
//! Nothing here touches the window, so a frame can be driven headless.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::rasterizer::{render_spheres, Camera, Framebuffer, RasterSettings, HEIGHT, WIDTH};
use crate::scene::{Scene, SceneConfig};

/// Main application state
pub struct AppState {
    pub scene: Scene,
    pub framebuffer: Framebuffer,
    pub camera: Camera,
    pub settings: RasterSettings,

    /// Rotation is frozen while paused, rendering continues
    pub paused: bool,

    /// Frames rendered so far
    pub frame: u64,
}

impl AppState {
    pub fn new(config: &SceneConfig) -> Self {
        let scene = Scene::generate(config.sphere_count, config.seed);
        info!(
            spheres = scene.spheres().len(),
            seed = config.seed,
            sizing = config.sizing.label(),
            "Scene generated"
        );

        Self {
            scene,
            framebuffer: Framebuffer::new(WIDTH, HEIGHT),
            camera: config.camera(),
            settings: config.raster_settings(),
            paused: false,
            frame: 0,
        }
    }

    /// Advance the animation by `elapsed_secs` and render a fresh frame
    pub fn tick(&mut self, elapsed_secs: f64) {
        if !self.paused {
            self.scene.advance(elapsed_secs);
        }
        self.render();
    }

    /// Render the current scene without advancing time
    pub fn render(&mut self) {
        render_spheres(
            &mut self.framebuffer,
            self.scene.spheres(),
            &self.camera,
            self.scene.model_to_world(),
            &self.settings,
        );
        self.frame += 1;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "Rotation toggled");
    }

    pub fn toggle_sizing(&mut self) {
        self.settings.sizing = self.settings.sizing.toggled();
        info!(sizing = self.settings.sizing.label(), "Sizing mode changed");
    }

    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(format!("snapshot_{}.png", self.frame))
    }

    /// Write the last rendered frame to a PNG next to the working directory
    pub fn save_snapshot(&self) -> image::ImageResult<PathBuf> {
        let path = self.snapshot_path();
        self.framebuffer.save_png(&path)?;
        debug!(path = %path.display(), "Snapshot written");
        Ok(path)
    }
}

/// Status line for the window chrome
pub fn fps_label(render_secs: f64) -> String {
    format!("FPS: {:.1}", 1.0 / (render_secs + 1e-6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;
    use crate::scene::ROTATION_SPEED;

    fn small_config() -> SceneConfig {
        SceneConfig { sphere_count: 50, ..Default::default() }
    }

    #[test]
    fn test_tick_advances_and_renders() {
        let mut app = AppState::new(&small_config());
        app.tick(0.5);
        assert_eq!(app.frame, 1);
        assert!((app.scene.angle - 0.5 * ROTATION_SPEED).abs() < 1e-12);
        assert_eq!(app.framebuffer.pixels.len(), WIDTH * HEIGHT);
        assert!(app.framebuffer.pixels.iter().any(|&c| c != Color::BLACK));
    }

    #[test]
    fn test_pause_freezes_angle() {
        let mut app = AppState::new(&small_config());
        app.tick(1.0);
        let before = app.scene.angle;
        app.toggle_pause();
        app.tick(3.0);
        assert_eq!(app.scene.angle, before);
        assert_eq!(app.frame, 2);

        // Same angle, same frame
        let frozen = app.framebuffer.pixels.clone();
        app.tick(1.0);
        assert_eq!(frozen, app.framebuffer.pixels);
    }

    #[test]
    fn test_toggle_sizing_changes_output() {
        let mut app = AppState::new(&small_config());
        app.render();
        let approximate = app.framebuffer.pixels.clone();
        app.toggle_sizing();
        app.render();
        assert_ne!(approximate, app.framebuffer.pixels);
    }

    #[test]
    fn test_snapshot_path_uses_frame() {
        let mut app = AppState::new(&small_config());
        app.render();
        app.render();
        assert_eq!(app.snapshot_path(), PathBuf::from("snapshot_2.png"));
    }

    #[test]
    fn test_fps_label() {
        assert_eq!(fps_label(0.1 - 1e-6), "FPS: 10.0");
        assert_eq!(fps_label(0.0), "FPS: 1000000.0");
    }
}
