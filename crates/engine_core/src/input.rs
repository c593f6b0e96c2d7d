//! Pointer input state.
//!
//! The render host forwards pointer moves over its canvas; components read
//! the latest position in pixels or normalised device coordinates.

use std::sync::{PoisonError, RwLock};

use engine_math::Vec2;

/// The canvas rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl CanvasBounds {
    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.right - self.left, self.bottom - self.top)
    }
}

#[derive(Debug, Clone, Copy)]
struct PointerState {
    canvas_size: Vec2,
    mouse_pos: Vec2,
    mouse_ndc: Vec2,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            canvas_size: Vec2::ONE,
            mouse_pos: Vec2::ZERO,
            mouse_ndc: Vec2::NEG_ONE,
        }
    }
}

/// Latest pointer position over the canvas.
#[derive(Debug, Default)]
pub struct InputManager {
    state: RwLock<PointerState>,
}

impl InputManager {
    /// Create a manager with the pointer at the top-left of a 1×1 canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move at `client` over a canvas occupying `bounds`.
    pub fn on_mouse_move(&self, client: Vec2, bounds: CanvasBounds) {
        let size = bounds.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let pos = client - Vec2::new(bounds.left, bounds.top);
        let ndc = Vec2::new(pos.x / size.x * 2.0 - 1.0, pos.y / size.y * -2.0 + 1.0);

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.canvas_size = size;
        state.mouse_pos = pos;
        state.mouse_ndc = ndc;
    }

    /// Canvas size from the last pointer move.
    #[must_use]
    pub fn canvas_size(&self) -> Vec2 {
        self.read().canvas_size
    }

    /// Pointer position relative to the canvas, in pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> Vec2 {
        self.read().mouse_pos
    }

    /// Pointer position in normalised device coordinates (y up).
    #[must_use]
    pub fn mouse_ndc(&self) -> Vec2 {
        self.read().mouse_ndc
    }

    fn read(&self) -> PointerState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}
