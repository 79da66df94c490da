//! SDL2 host window for the demo.
//!
//! The window only presents finished ARGB8888 frames and collects input; all
//! drawing happens on the CPU in a [`crate::render::FrameBuffer`].

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::error::{RenderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// Input gathered over one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Mouse movement while the left button is held, in pixels.
    pub drag_delta: (i32, i32),
    /// Wheel ticks; positive is away from the user.
    pub scroll: i32,
    pub pan_left: bool,
    pub pan_right: bool,
    pub pan_up: bool,
    pub pan_down: bool,
    pub pan_forward: bool,
    pub pan_backward: bool,
    /// Reset the camera to the fitted view.
    pub reset: bool,
    /// Centre the board on the selected cell, or back on its middle.
    pub toggle_focus: bool,
    /// Step to the next [`crate::scene::Wrapping`] mode.
    pub cycle_wrapping: bool,
}

impl InputState {
    /// Clears the per-frame deltas. Held keys are re-read every poll.
    pub fn begin_frame(&mut self) {
        *self = Self::default();
    }
}

/// Sleeps to cap the frame rate and measures frame time.
pub struct FrameLimiter {
    previous_frame_time: u64,
    /// Minimum frame time in milliseconds; `None` runs uncapped.
    frame_target_ms: Option<u64>,
}

impl FrameLimiter {
    /// `max_fps == 0` disables the cap.
    pub fn new(window: &Window, max_fps: u32) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            frame_target_ms: (max_fps > 0).then(|| 1000 / max_fps as u64),
        }
    }

    /// Waits if necessary to maintain the frame rate and returns the time
    /// since the previous call in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if let Some(target) = self.frame_target_ms {
            if delta_time < target {
                std::thread::sleep(std::time::Duration::from_millis(target - delta_time));
                current_time = window.timer().ticks64();
                delta_time = current_time - self.previous_frame_time;
            }
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Field order matters: `texture` borrows from `texture_creator` and must drop first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

fn host_error(err: impl ToString) -> RenderError {
    RenderError::Window(err.to_string())
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(host_error)?;
        let video_subsystem = sdl_context.video().map_err(host_error)?;
        let timer_subsystem = sdl_context.timer().map_err(host_error)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(host_error)?;

        let canvas = window.into_canvas().build().map_err(host_error)?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(host_error)?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped first.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(host_error)?;

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains pending events into `input` and reports quit/resize.
    ///
    /// # Input Mapping
    /// - Left mouse drag: orbit
    /// - Mouse wheel: zoom
    /// - Arrow keys: pan across the view
    /// - Page Up / Page Down: pan forward / backward
    /// - R: reset view
    /// - F: toggle focus on the selected cell
    /// - W: cycle wrapping
    /// - Escape: quit
    pub fn poll_events(&mut self, input: &mut InputState) -> WindowEvent {
        let mut outcome = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(Keycode::R),
                    repeat: false,
                    ..
                } => input.reset = true,
                Event::KeyDown {
                    keycode: Some(Keycode::F),
                    repeat: false,
                    ..
                } => input.toggle_focus = true,
                Event::KeyDown {
                    keycode: Some(Keycode::W),
                    repeat: false,
                    ..
                } => input.cycle_wrapping = true,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => outcome = WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32),
                Event::MouseMotion {
                    mousestate, xrel, yrel, ..
                } if mousestate.left() => {
                    input.drag_delta.0 += xrel;
                    input.drag_delta.1 += yrel;
                }
                Event::MouseWheel { y, .. } => input.scroll += y,
                _ => {}
            }
        }

        let keys = self.event_pump.keyboard_state();
        input.pan_left = keys.is_scancode_pressed(Scancode::Left);
        input.pan_right = keys.is_scancode_pressed(Scancode::Right);
        input.pan_up = keys.is_scancode_pressed(Scancode::Up);
        input.pan_down = keys.is_scancode_pressed(Scancode::Down);
        input.pan_forward = keys.is_scancode_pressed(Scancode::PageUp);
        input.pan_backward = keys.is_scancode_pressed(Scancode::PageDown);
        outcome
    }

    /// Shows a frame of `width * height` ARGB8888 pixels.
    pub fn present(&mut self, buffer: &[u8]) -> Result<()> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(host_error)?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))
            .map_err(host_error)?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(host_error)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
