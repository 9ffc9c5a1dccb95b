//! Per-frame input snapshot.
//!
//! Whatever polls the keyboard and pointer fills an [`InputState`] once per
//! frame and hands it to [`Engine::update`](crate::engine::Engine::update).
//! Nothing here is global: a fresh snapshot is built every frame.

use crate::engine::RenderMode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Relative pointer motion in pixels since the previous frame.
    pub mouse_delta: (i32, i32),
    /// Render mode selected this frame, if any.
    pub render_mode: Option<RenderMode>,
    /// Backface culling toggle was pressed this frame.
    pub toggle_culling: bool,
    /// Animation pause toggle was pressed this frame.
    pub toggle_pause: bool,
}

impl InputState {
    /// Clears the one-shot fields while keeping held keys.
    pub fn begin_frame(&mut self) {
        self.mouse_delta = (0, 0);
        self.render_mode = None;
        self.toggle_culling = false;
        self.toggle_pause = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_frame_keeps_held_keys() {
        let mut input = InputState {
            forward: true,
            mouse_delta: (3, -2),
            render_mode: Some(RenderMode::Wireframe),
            toggle_culling: true,
            ..InputState::default()
        };
        input.begin_frame();
        assert!(input.forward);
        assert_eq!(input.mouse_delta, (0, 0));
        assert_eq!(input.render_mode, None);
        assert!(!input.toggle_culling);
    }
}
