use crate::frame::{FrameState, VelocityWrite};
use crate::render::{DrawCall, DrawOutcome};
use crate::time::FrameClock;

use super::backend::FrameBackend;

/// Lifecycle of the render loop. `Stopped` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Drives Update then Draw once per call to `advance_one_frame`.
///
/// Has no timing of its own: the host decides when the next tick runs.
pub struct RenderLoop<B> {
    state: LoopState,
    frame: FrameState,
    backend: B,
    clock: FrameClock,
    draw_call: DrawCall,
}

impl<B: FrameBackend> RenderLoop<B> {
    pub fn new(backend: B, frame: FrameState) -> Self {
        Self {
            state: LoopState::Running,
            frame,
            backend,
            clock: FrameClock::new(),
            draw_call: DrawCall::triangle(),
        }
    }

    pub fn with_velocity_write(backend: B, write: VelocityWrite) -> Self {
        Self::new(backend, FrameState::new(write))
    }

    /// Runs one tick. A stopped loop does nothing.
    pub fn advance_one_frame(&mut self) -> LoopState {
        if self.state == LoopState::Stopped {
            return self.state;
        }

        self.update();

        if self.draw() == DrawOutcome::Fatal {
            log::error!("rendering failed at frame {}; stopping", self.clock.frames());
            self.state = LoopState::Stopped;
        }

        let ft = self.clock.tick();
        log::trace!("frame {} took {:.3} ms", ft.frame_index, ft.dt * 1000.0);
        self.state
    }

    /// Moves the loop to `Stopped`. Further ticks are no-ops.
    pub fn request_stop(&mut self) {
        if self.state == LoopState::Running {
            log::info!("render loop stopped after {} frames", self.clock.frames());
        }
        self.state = LoopState::Stopped;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Ticks run so far, including ones whose draw was skipped.
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    fn update(&mut self) {
        self.frame.advance();
        self.backend.upload_vertices(self.frame.vertices());
    }

    fn draw(&mut self) -> DrawOutcome {
        self.backend.draw(&self.draw_call)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::frame::Vertex;
    use crate::paint::Color;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Upload(Vec<Vertex>),
        Draw(DrawCall),
    }

    /// Records every backend call; replays scripted draw outcomes.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        outcomes: VecDeque<DrawOutcome>,
    }

    impl Recorder {
        fn draws(&self) -> Vec<&DrawCall> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Draw(d) => Some(d),
                    _ => None,
                })
                .collect()
        }

        fn uploads(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, Call::Upload(_))).count()
        }
    }

    impl FrameBackend for Recorder {
        fn upload_vertices(&mut self, vertices: &[Vertex]) {
            self.calls.push(Call::Upload(vertices.to_vec()));
        }

        fn draw(&mut self, call: &DrawCall) -> DrawOutcome {
            self.calls.push(Call::Draw(call.clone()));
            self.outcomes.pop_front().unwrap_or(DrawOutcome::Presented)
        }
    }

    fn new_loop() -> RenderLoop<Recorder> {
        RenderLoop::new(Recorder::default(), FrameState::default())
    }

    // ── tick shape ────────────────────────────────────────────────────────

    #[test]
    fn starts_running() {
        assert_eq!(new_loop().state(), LoopState::Running);
    }

    #[test]
    fn each_tick_uploads_then_draws_once() {
        let mut l = new_loop();
        for _ in 0..5 {
            assert_eq!(l.advance_one_frame(), LoopState::Running);
        }

        let calls = &l.backend().calls;
        assert_eq!(calls.len(), 10);
        for pair in calls.chunks(2) {
            assert!(matches!(pair[0], Call::Upload(_)));
            assert!(matches!(pair[1], Call::Draw(_)));
        }
        assert_eq!(l.frames(), 5);
    }

    #[test]
    fn every_draw_is_three_vertices_from_zero_on_green() {
        let mut l = new_loop();
        for _ in 0..20 {
            l.advance_one_frame();
        }
        let draws = l.backend().draws();
        assert_eq!(draws.len(), 20);
        for d in draws {
            assert_eq!(d.vertices, 0..3);
            assert_eq!(d.instances, 0..1);
            assert_eq!(d.clear, Color::rgba(0.0, 1.0, 0.0, 1.0));
        }
    }

    #[test]
    fn upload_carries_the_updated_velocity() {
        let mut l = new_loop();
        l.advance_one_frame();
        let Call::Upload(vertices) = &l.backend().calls[0] else { panic!("expected upload") };
        assert_eq!(vertices.len(), 3);
        let (vx, vy) = l.frame().velocity();
        assert!(vertices.iter().all(|v| v.velocity == [vx, vy, 1.0, 1.0]));
    }

    // ── long run ──────────────────────────────────────────────────────────

    #[test]
    fn thousand_ticks_without_close() {
        let mut l = new_loop();
        for _ in 0..1000 {
            l.advance_one_frame();
        }
        let (vx, vy) = l.frame().velocity();
        assert!((vx - 2.0).abs() < 1e-3, "vel_x = {vx}");
        assert!(vy.abs() < 1e-3, "vel_y = {vy}");
        assert_eq!(l.state(), LoopState::Running);
        assert_eq!(l.frame().float4s().len(), 9);
    }

    #[test]
    fn animation_advances_even_when_draws_are_skipped() {
        let mut l = new_loop();
        l.backend.outcomes = VecDeque::from(vec![DrawOutcome::Skipped; 10]);
        for _ in 0..10 {
            assert_eq!(l.advance_one_frame(), LoopState::Running);
        }
        let (vx, _) = l.frame().velocity();
        assert!((vx - 1.01).abs() < 1e-5);
    }

    // ── stopping ──────────────────────────────────────────────────────────

    #[test]
    fn stop_mid_loop_halts_update_and_draw() {
        let mut l = new_loop();
        for _ in 0..7 {
            l.advance_one_frame();
        }
        l.request_stop();
        assert_eq!(l.state(), LoopState::Stopped);

        let calls_before = l.backend().calls.len();
        let velocity_before = l.frame().velocity();
        for _ in 0..3 {
            assert_eq!(l.advance_one_frame(), LoopState::Stopped);
        }

        assert_eq!(l.backend().calls.len(), calls_before);
        assert_eq!(l.frame().velocity(), velocity_before);
        assert_eq!(l.backend().uploads(), 7);
        assert_eq!(l.frames(), 7);
    }

    #[test]
    fn request_stop_is_idempotent() {
        let mut l = new_loop();
        l.request_stop();
        l.request_stop();
        assert_eq!(l.state(), LoopState::Stopped);
    }

    #[test]
    fn fatal_draw_stops_the_loop() {
        let mut l = new_loop();
        l.backend.outcomes = VecDeque::from(vec![DrawOutcome::Presented, DrawOutcome::Fatal]);
        assert_eq!(l.advance_one_frame(), LoopState::Running);
        assert_eq!(l.advance_one_frame(), LoopState::Stopped);
        assert_eq!(l.advance_one_frame(), LoopState::Stopped);
        assert_eq!(l.backend().draws().len(), 2);
    }

    #[test]
    fn velocity_write_policy_reaches_uploads() {
        let mut l = RenderLoop::with_velocity_write(Recorder::default(), VelocityWrite::Legacy);
        l.advance_one_frame();
        l.advance_one_frame();
        let last_upload = l
            .backend()
            .calls
            .iter()
            .rev()
            .find(|c| matches!(c, Call::Upload(_)));
        let Some(Call::Upload(vertices)) = last_upload else {
            panic!("expected upload")
        };
        assert_eq!(vertices[2].velocity, [1.0, 1.0, 1.0, 1.0]);
        assert_ne!(vertices[0].velocity, [1.0, 1.0, 1.0, 1.0]);
    }
}
