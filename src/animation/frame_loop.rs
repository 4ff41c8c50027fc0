// src/animation/frame_loop.rs
//
// The per-frame driver for the animator.
// The host (nannou's update) calls on_frame once per frame; the running flag
// is checked before any work, so stop() takes effect on the next frame.

use super::position_animator::PositionAnimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Keep animating on the next frame.
    Continue,
    Halt,
}

#[derive(Debug)]
pub struct AnimationLoop {
    running: bool,
    ticks_per_second: f32,
    frames: u64,
}

impl AnimationLoop {
    pub fn new(ticks_per_second: f32) -> Self {
        Self {
            running: false,
            ticks_per_second,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("animation started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!("animation stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Converts wall-clock seconds into animator ticks.
    pub fn ticks_for(&self, elapsed_secs: f32) -> f32 {
        elapsed_secs.max(0.0) * self.ticks_per_second
    }

    pub fn on_frame(&mut self, animator: &mut PositionAnimator, elapsed_secs: f32) -> FrameRequest {
        if !self.running {
            return FrameRequest::Halt;
        }

        animator.tick(self.ticks_for(elapsed_secs));
        self.frames += 1;
        FrameRequest::Continue
    }
}
