//! Sandbox: a handful of sprites orbiting under an orthographic camera.
//!
//! Exercises the engine end to end: window runtime, render queue, camera,
//! transforms and the sprite renderer.

use anyhow::Result;
use glam::Vec3;
use winit::event::WindowEvent;

use lily_engine::core::{App, AppControl, FrameCtx};
use lily_engine::device::GpuInit;
use lily_engine::logging::{init_logging, LoggingConfig};
use lily_engine::paint::Color;
use lily_engine::render::SpriteRenderer;
use lily_engine::scene::{Camera, RenderQueue, Sprite};
use lily_engine::window::{Runtime, RuntimeConfig};

/// World-space height of the camera's view box; width follows the aspect.
const VIEW_HEIGHT: f32 = 10.0;

struct Sandbox {
    camera: Camera,
    queue: RenderQueue,
    renderer: SpriteRenderer,

    sprites: Vec<Sprite>,
    elapsed: f32,
}

impl Sandbox {
    fn new() -> Self {
        let sprites = vec![
            Sprite::new(Vec3::new(-2.5, 0.0, 0.0), Vec3::new(2.0, 2.0, 1.0), Color::TEAL),
            Sprite::new(Vec3::new(2.5, 0.0, 0.0), Vec3::new(2.0, 2.0, 1.0), Color::PURPLE),
            Sprite::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), Color::YELLOW),
        ];

        Self {
            camera: Camera::orthographic(-VIEW_HEIGHT / 2.0, VIEW_HEIGHT / 2.0,
                                         -VIEW_HEIGHT / 2.0, VIEW_HEIGHT / 2.0),
            queue: RenderQueue::new(),
            renderer: SpriteRenderer::new(),
            sprites,
            elapsed: 0.0,
        }
    }

    fn fit_camera_to(&mut self, width: f32, height: f32) {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let half_h = VIEW_HEIGHT / 2.0;
        let half_w = half_h * aspect;
        self.camera.reset_projection(-half_w, half_w, -half_h, half_h);
    }
}

impl App for Sandbox {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            use winit::keyboard::{KeyCode, PhysicalKey};
            if event.physical_key == PhysicalKey::Code(KeyCode::Escape) && event.state.is_pressed()
            {
                return AppControl::Exit;
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        self.fit_camera_to(w, h);

        self.elapsed += ctx.time.dt;

        // Spin the center sprite, bob the outer two.
        let angle = self.elapsed * 90.0;
        self.sprites[2]
            .transform_mut()
            .set_rotation(Vec3::new(0.0, 0.0, angle));

        let bob = (self.elapsed * 1.5).sin();
        self.sprites[0]
            .transform_mut()
            .set_position(Vec3::new(-2.5, bob, 0.0));
        self.sprites[1]
            .transform_mut()
            .set_position(Vec3::new(2.5, -bob, 0.0));

        for sprite in &self.sprites {
            sprite.submit(&mut self.queue);
        }

        let clear = Color::new(0.07, 0.07, 0.1, 1.0);
        let camera = &self.camera;
        let queue = &mut self.queue;
        let renderer = &mut self.renderer;

        ctx.render(clear, |rctx, target| {
            if let Err(e) = renderer.render(rctx, target, queue, camera) {
                log::error!("sprite renderer failed: {e:#}");
            }
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "lily sandbox".to_string(),
        initial_size: winit::dpi::LogicalSize::new(960.0, 720.0),
    };

    Runtime::run(config, GpuInit::default(), Sandbox::new())
}
