//! SDL2 window, event polling and frame pacing.
//!
//! Only compiled with the `window` feature. The window turns SDL events into
//! an [`InputState`] and blits the renderer's ARGB8888 buffer through a
//! streaming texture.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::engine::RenderMode;
use crate::error::Error;
use crate::input::InputState;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

fn sdl_error(e: impl ToString) -> Error {
    Error::Window(e.to_string())
}

fn mode_for_key(key: Keycode) -> Option<RenderMode> {
    match key {
        Keycode::Num1 => Some(RenderMode::Wireframe),
        Keycode::Num2 => Some(RenderMode::WireframeVertices),
        Keycode::Num3 => Some(RenderMode::FilledWireframe),
        Keycode::Num4 => Some(RenderMode::FilledWireframeVertices),
        Keycode::Num5 => Some(RenderMode::Filled),
        Keycode::Num6 => Some(RenderMode::Points),
        _ => None,
    }
}

fn set_held(input: &mut InputState, key: Keycode, down: bool) {
    match key {
        Keycode::W => input.forward = down,
        Keycode::S => input.back = down,
        Keycode::A => input.left = down,
        Keycode::D => input.right = down,
        Keycode::Space => input.up = down,
        Keycode::LShift | Keycode::RShift => input.down = down,
        _ => {}
    }
}

// Field order matters: `texture` borrows from `texture_creator` and must be
// dropped first.
pub struct Window {
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, Error> {
        let sdl_context = sdl2::init().map_err(sdl_error)?;
        let video_subsystem = sdl_context.video().map_err(sdl_error)?;
        let timer_subsystem = sdl_context.timer().map_err(sdl_error)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(sdl_error)?;

        let canvas = window.into_canvas().build().map_err(sdl_error)?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(sdl_error)?;
        sdl_context.mouse().set_relative_mouse_mode(true);

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped first.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(sdl_error)?;

        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains pending events into `input`. Held keys persist across calls;
    /// one-shot fields accumulate until [`InputState::begin_frame`].
    pub fn poll_events(&mut self, input: &mut InputState) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => result = WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat,
                    ..
                } => {
                    set_held(input, key, true);
                    if repeat {
                        continue;
                    }
                    if let Some(mode) = mode_for_key(key) {
                        input.render_mode = Some(mode);
                    }
                    match key {
                        Keycode::C => input.toggle_culling = true,
                        Keycode::P => input.toggle_pause = true,
                        _ => {}
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => set_held(input, key, false),
                Event::MouseMotion { xrel, yrel, .. } => {
                    input.mouse_delta.0 += xrel;
                    input.mouse_delta.1 += yrel;
                }
                _ => {}
            }
        }
        result
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), Error> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(sdl_error)?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))
            .map_err(sdl_error)?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(sdl_error)?;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_select_modes() {
        assert_eq!(mode_for_key(Keycode::Num1), Some(RenderMode::Wireframe));
        assert_eq!(mode_for_key(Keycode::Num6), Some(RenderMode::Points));
        assert_eq!(mode_for_key(Keycode::Q), None);
    }

    #[test]
    fn held_keys_track_press_and_release() {
        let mut input = InputState::default();
        set_held(&mut input, Keycode::W, true);
        set_held(&mut input, Keycode::LShift, true);
        assert!(input.forward && input.down);
        set_held(&mut input, Keycode::W, false);
        assert!(!input.forward && input.down);
    }
}
