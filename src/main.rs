mod canvas;
mod cli;
mod field;
mod framepace;
mod gpu;
mod gui;
mod layout;
mod overlay;
mod particle;
mod render;
mod scheduler;
mod skills;
mod view;

use std::sync::Arc;

use canvas::{Bounds, DrawList};
use clap::Parser;
use field::FrameOutcome;
use framepace::Framepacer;
use glam::Vec2;
use gpu::GpuContext;
use gui::EguiIntegration;
use log::{error, info, warn};
use overlay::{SettingsChange, SettingsPanel, SkillTreeOverlay};
use render::RenderModule;
use scheduler::RedrawScheduler;
use view::{StarfieldView, ViewEvent};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Collect Arguments
    let args = cli::Args::parse();

    // Setup Winit, frames are driven by redraw requests
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app_state = AppState {
        tokio_rt: tokio::runtime::Runtime::new()?,
        args,
        gfx: None,
        framepace: Framepacer::new(),
    };

    event_loop.run_app(&mut app_state)?;
    Ok(())
}

struct GfxState {
    window: Arc<Window>,
    gpu: GpuContext<'static>,
    egui: EguiIntegration,
    render_module: RenderModule,

    view: StarfieldView<RedrawScheduler>,
    draw_list: DrawList,
    skill_tree: SkillTreeOverlay,
    settings: SettingsPanel,
}

struct AppState {
    tokio_rt: tokio::runtime::Runtime,
    args: cli::Args,
    gfx: Option<GfxState>,
    framepace: Framepacer,
}

impl AppState {
    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<GfxState> {
        let window = Arc::new(
            event_loop.create_window(Window::default_attributes().with_title("Starfield"))?,
        );
        let window_size = window.inner_size();

        let gpu = self.tokio_rt.block_on(GpuContext::new(window.clone()))?;
        let surface_format = gpu.surface_format();

        let render_module = RenderModule::new(&gpu.device, surface_format);
        render_module.update_size(&gpu.queue, window_size.width, window_size.height);

        let mut egui = EguiIntegration::new(&gpu.device, surface_format);
        egui.resize(window_size.width, window_size.height);

        let config = self.args.field_config();
        let settings = SettingsPanel::new(config.particle_count, config.parallax_strength);
        let view = StarfieldView::mount(
            config,
            Bounds::from(window_size),
            RedrawScheduler::new(window.clone()),
        );

        Ok(GfxState {
            window,
            gpu,
            egui,
            render_module,

            view,
            draw_list: DrawList::new(),
            skill_tree: SkillTreeOverlay::new(!self.args.no_skills),
            settings,
        })
    }

    fn teardown(&mut self) {
        if let Some(gfx) = self.gfx.take() {
            gfx.view.dispose();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gfx) = self.gfx.as_mut() else {
            return;
        };

        let now_ms = self.framepace.timestamp_ms();
        self.framepace.begin_frame();
        let frame_limit = framepace::frame_limit(self.args.framerate);

        if let Err(err) = gfx.draw(now_ms, &self.framepace) {
            match surface_recovery(&err) {
                SurfaceRecovery::Reconfigure => gfx.gpu.reconfigure_surface(),
                SurfaceRecovery::Exit => {
                    error!("Out of GPU memory, exiting");
                    event_loop.exit();
                }
                SurfaceRecovery::Skip => warn!("Dropped frame: {err}"),
            }
        }

        // Every path through the frame counts against the cap.
        self.framepace.end_frame(frame_limit);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SurfaceRecovery {
    Reconfigure,
    Exit,
    Skip,
}

fn surface_recovery(err: &wgpu::SurfaceError) -> SurfaceRecovery {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceRecovery::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => SurfaceRecovery::Exit,
        _ => SurfaceRecovery::Skip,
    }
}

impl GfxState {
    /// Ticks the view and presents the frame. A skipped tick is not an error,
    /// it has already asked for the next one.
    fn draw(&mut self, now_ms: f64, framepace: &Framepacer) -> Result<(), wgpu::SurfaceError> {
        let GfxState {
            gpu,
            egui,
            render_module,
            view,
            draw_list,
            skill_tree,
            settings,
            ..
        } = self;

        if view.handle(ViewEvent::Tick { now_ms }, draw_list) != Some(FrameOutcome::Drawn) {
            return Ok(());
        }

        render_module.prepare(&gpu.device, &gpu.queue, draw_list);
        let frame = gpu.surface.get_current_texture()?;

        let framerate = framepace.framerate();
        let mut changes = Vec::new();
        egui.run(|ctx| {
            skill_tree.show(ctx, now_ms);
            changes = settings.show(ctx, framerate, &mut skill_tree.visible);
        });

        for change in changes {
            match change {
                SettingsChange::ParticleCount(count) => {
                    info!("Particle count set to {count}");
                    view.field_mut().set_particle_count(count);
                }
                SettingsChange::ParallaxStrength(strength) => {
                    view.field_mut().set_parallax_strength(strength);
                }
            }
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        egui.pre_render(&gpu.device, &gpu.queue, &mut encoder, framepace.frametime());

        // Render
        {
            let texture_view = frame
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());

            let mut rpass = render_module.begin_pass(&mut encoder, &texture_view);
            egui.render(&mut rpass);
        }

        gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(gfx) => self.gfx = Some(gfx),
            Err(err) => {
                error!("Failed to initialise graphics: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::RedrawRequested) {
            self.redraw(event_loop);
            return;
        }

        let Some(gfx) = self.gfx.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.teardown();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if gfx.gpu.resize(new_size.width, new_size.height) {
                    gfx.render_module
                        .update_size(&gfx.gpu.queue, new_size.width, new_size.height);
                    gfx.egui.resize(new_size.width, new_size.height);
                }

                // Zero sized windows still go through, the view turns them into no-op frames.
                gfx.view
                    .handle(ViewEvent::Resized(Bounds::from(new_size)), &mut gfx.draw_list);
                gfx.window.request_redraw();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }

                match event.physical_key {
                    PhysicalKey::Code(KeyCode::F11) => {
                        if gfx.window.fullscreen().is_none() {
                            gfx.window
                                .set_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
                        } else {
                            gfx.window.set_fullscreen(None);
                        }
                    }
                    PhysicalKey::Code(KeyCode::KeyH) => {
                        gfx.settings.visible = !gfx.settings.visible;
                        gfx.skill_tree.visible = gfx.settings.visible;
                    }
                    PhysicalKey::Code(KeyCode::Escape) => gfx.skill_tree.clear_selection(),
                    _ => (),
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                gfx.egui.mouse_event(state, button);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                gfx.view
                    .handle(ViewEvent::PointerMoved(position), &mut gfx.draw_list);
                gfx.egui.mouse_motion(position);
            }
            WindowEvent::CursorLeft { .. } => {
                gfx.egui.pointer_gone();
            }

            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}
