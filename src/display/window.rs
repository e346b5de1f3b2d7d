// Window host - winit event loop + pixels surface around a Console
//
// Drives the console from the redraw loop: each redraw consumes the
// elapsed wall-clock time through `Console::update`, converts the
// framebuffer to RGBA and presents it. Input is a fixed keyboard map
// onto the single gamepad.
//
// Key map:
//   Z / X            A / B
//   RShift / Enter   Select / Start
//   Arrow keys       D-pad
//   F9               Screenshot
//   Escape           Quit

use super::framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use super::screenshot::save_screenshot;
use crate::console::Console;
use crate::input::Controller;
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Window configuration
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Integer scale factor for the 256x240 output
    pub scale: u32,
    /// Target frame rate (60 for NTSC)
    pub target_fps: u32,
    /// Show live stats in the window title
    pub overlay: bool,
}

impl WindowConfig {
    /// Default configuration: 3x scale, 60 FPS, overlay off
    pub fn new() -> Self {
        Self {
            scale: 3,
            target_fps: 60,
            overlay: false,
        }
    }

    /// Set the scale factor (clamped to 1-8)
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8);
        self
    }

    /// Enable or disable the title-bar overlay
    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    /// Window width in physical pixels
    pub fn window_width(&self) -> u32 {
        SCREEN_WIDTH as u32 * self.scale
    }

    /// Window height in physical pixels
    pub fn window_height(&self) -> u32 {
        SCREEN_HEIGHT as u32 * self.scale
    }

    /// Wall-clock budget of one frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.target_fps.max(1) as u64)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The running host: window, surface, console and input state
struct EmulatorWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    console: Console,
    frame_buffer: FrameBuffer,
    buttons: Controller,
    last_update: Instant,
    // Overlay bookkeeping
    frames_rendered: u32,
    overlay_timer: Instant,
}

impl EmulatorWindow {
    fn new(config: WindowConfig, console: Console) -> Self {
        Self {
            window: None,
            pixels: None,
            config,
            console,
            frame_buffer: FrameBuffer::new(),
            buttons: Controller::new(),
            last_update: Instant::now(),
            frames_rendered: 0,
            overlay_timer: Instant::now(),
        }
    }

    /// Map a physical key onto the gamepad snapshot
    fn handle_key(&mut self, key: PhysicalKey, pressed: bool) -> bool {
        let buttons = &mut self.buttons;
        match key {
            PhysicalKey::Code(KeyCode::KeyZ) => buttons.a = pressed,
            PhysicalKey::Code(KeyCode::KeyX) => buttons.b = pressed,
            PhysicalKey::Code(KeyCode::ShiftRight) => buttons.select = pressed,
            PhysicalKey::Code(KeyCode::Enter) => buttons.start = pressed,
            PhysicalKey::Code(KeyCode::ArrowUp) => buttons.up = pressed,
            PhysicalKey::Code(KeyCode::ArrowDown) => buttons.down = pressed,
            PhysicalKey::Code(KeyCode::ArrowLeft) => buttons.left = pressed,
            PhysicalKey::Code(KeyCode::ArrowRight) => buttons.right = pressed,
            _ => return false,
        }
        true
    }

    /// Run the console for the elapsed wall-clock time and present
    fn render(&mut self) -> Result<(), pixels::Error> {
        let now = Instant::now();
        let dt_ms = now.duration_since(self.last_update).as_secs_f64() * 1000.0;
        self.last_update = now;

        self.console.set_buttons(self.buttons);
        self.console.update(dt_ms);

        self.frame_buffer.copy_from_indices(self.console.frame());
        if let Some(pixels) = &mut self.pixels {
            self.frame_buffer.to_rgba(pixels.frame_mut());
            pixels.render()?;
        }

        self.frames_rendered += 1;
        if self.config.overlay {
            self.update_overlay();
        }

        Ok(())
    }

    /// Refresh the title-bar stats about once a second
    fn update_overlay(&mut self) {
        let elapsed = self.overlay_timer.elapsed();
        if elapsed < Duration::from_secs(1) {
            return;
        }

        let fps = self.frames_rendered as f64 / elapsed.as_secs_f64();
        let ppu = self.console.bus().ppu();
        let title = format!(
            "famicore - {:.1} fps | frame {} | scanline {} dot {}",
            fps,
            self.console.frame_count(),
            ppu.scanline(),
            ppu.dot()
        );

        if let Some(window) = &self.window {
            window.set_title(&title);
        }
        self.frames_rendered = 0;
        self.overlay_timer = Instant::now();
    }
}

impl ApplicationHandler for EmulatorWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("famicore")
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("failed to create window"),
        );
        let size = window.inner_size();

        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface)
            .expect("failed to create pixel surface");

        self.window = Some(window);
        self.pixels = Some(pixels);
        self.last_update = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;

                match physical_key {
                    PhysicalKey::Code(KeyCode::Escape) if pressed => {
                        event_loop.exit();
                    }
                    PhysicalKey::Code(KeyCode::F9) if pressed => {
                        if let Err(e) = save_screenshot(&self.frame_buffer) {
                            log::warn!("screenshot failed: {}", e);
                        }
                    }
                    key => {
                        self.handle_key(key, pressed);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    log::error!("render error: {}", e);
                    event_loop.exit();
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run a console inside a window until the user quits
pub fn run_window(config: WindowConfig, console: Console) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    log::info!(
        "opening {}x{} window ({}x scale)",
        config.window_width(),
        config.window_height(),
        config.scale
    );

    let mut host = EmulatorWindow::new(config, console);
    event_loop.run_app(&mut host)?;
    Ok(())
}
