use crate::frame::Vertex;
use crate::render::{DrawCall, DrawOutcome};

/// GPU operations a tick needs.
pub trait FrameBackend {
    /// Stages the current vertex data for the next draw.
    fn upload_vertices(&mut self, vertices: &[Vertex]);

    /// Clears, draws and presents one frame.
    fn draw(&mut self, call: &DrawCall) -> DrawOutcome;
}
