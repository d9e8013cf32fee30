use crate::paint::Color;

use super::vertex::{Vertex, VERTEX_COUNT};

/// float4 values held by the state: 3 vertices × 3 attributes.
pub const FLOAT4_COUNT: usize = VERTEX_COUNT * 3;

/// Per-tick change applied to both animation accumulators.
pub const VELOCITY_STEP: f32 = 0.001;

/// Which vertices receive the updated velocity attribute on each tick.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum VelocityWrite {
    /// Every vertex gets the new value (float4 slots 2, 5 and 8).
    #[default]
    PerVertex,

    /// Writes slot 2, then slot 5 twice. The third vertex keeps its initial
    /// velocity forever. Kept for parity with the first release.
    Legacy,
}

/// Animated triangle data, mutated in place by `advance`.
#[derive(Debug, Clone)]
pub struct FrameState {
    vertices: [Vertex; VERTEX_COUNT],
    vel_x: f32,
    vel_y: f32,
    ticks: u64,
    write: VelocityWrite,
}

impl FrameState {
    pub const INITIAL_VELOCITY: (f32, f32) = (1.0, 1.0);

    pub fn new(write: VelocityWrite) -> Self {
        let (vel_x, vel_y) = Self::INITIAL_VELOCITY;
        let color = Color::YELLOW.to_array();
        let velocity = [vel_x, vel_y, 1.0, 1.0];

        let vertices = [
            Vertex { position: [0.0, 0.5, 0.5, 1.0], color, velocity },
            Vertex { position: [0.5, -0.5, 0.5, 1.0], color, velocity },
            Vertex { position: [-0.5, -0.5, 0.5, 1.0], color, velocity },
        ];

        Self { vertices, vel_x, vel_y, ticks: 0, write }
    }

    /// Advances the animation by one tick and stages the new velocity.
    pub fn advance(&mut self) {
        self.vel_x += VELOCITY_STEP;
        self.vel_y -= VELOCITY_STEP;
        self.ticks += 1;

        let velocity = [self.vel_x, self.vel_y, 1.0, 1.0];
        match self.write {
            VelocityWrite::PerVertex => {
                for v in &mut self.vertices {
                    v.velocity = velocity;
                }
            }
            VelocityWrite::Legacy => {
                self.vertices[0].velocity = velocity;
                self.vertices[1].velocity = velocity;
                self.vertices[1].velocity = velocity;
            }
        }

        log::trace!(
            "tick {}: vel = ({:.4}, {:.4})",
            self.ticks,
            self.vel_x,
            self.vel_y
        );
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The vertex data as the flat float4 sequence the GPU sees.
    #[inline]
    pub fn float4s(&self) -> &[[f32; 4]] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn velocity(&self) -> (f32, f32) {
        (self.vel_x, self.vel_y)
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn velocity_write(&self) -> VelocityWrite {
        self.write
    }
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new(VelocityWrite::default())
    }
}
