//! Color representation shared by the frame state and the draw pass.

mod color;

pub use color::Color;
