use std::ops::Range;

use crate::frame::VERTEX_COUNT;
use crate::paint::Color;

/// Color the render target is cleared to every frame.
///
/// Starts from a named black and overwrites the channels; only the final
/// green is ever used.
pub fn clear_color() -> Color {
    let mut clear = Color::BLACK;
    clear.r = 0.0;
    clear.g = 1.0;
    clear.b = 0.0;
    clear
}

/// Shape of the one draw submitted per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub clear: Color,
    /// Non-indexed vertex range.
    pub vertices: Range<u32>,
    pub instances: Range<u32>,
}

impl DrawCall {
    /// Clear to green, then three vertices from offset 0.
    pub fn triangle() -> Self {
        Self {
            clear: clear_color(),
            vertices: 0..VERTEX_COUNT as u32,
            instances: 0..1,
        }
    }
}

/// Result of submitting a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawOutcome {
    Presented,
    /// The back buffer could not be acquired this tick.
    Skipped,
    /// Rendering cannot continue.
    Fatal,
}
