//! Score count-up animation.
//!
//! The displayed value climbs from 0 toward the target in equal steps, one
//! per tick, and the sequence ends on the first frame that reaches the target.

use serde::Serialize;

/// Milliseconds between frames.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Number of equal steps from 0 to the target.
pub const STEPS: u32 = 60;

/// One tick of the animation. Label and bar always move together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    /// Rounded value for the numeric label.
    pub label: u8,
    /// Bar width as a percentage of the track.
    pub bar_width: f64,
}

/// Iterator over the frames of one count-up.
#[derive(Debug, Clone)]
pub struct ScoreAnimation {
    target: f64,
    step: f64,
    current: f64,
    done: bool,
}

impl ScoreAnimation {
    /// `target` is clamped into 0–100.
    pub fn new(target: f64) -> Self {
        let target = if target.is_finite() {
            target.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            target,
            step: target / f64::from(STEPS),
            current: 0.0,
            done: false,
        }
    }
}

impl Iterator for ScoreAnimation {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.done {
            return None;
        }
        self.current = (self.current + self.step).min(self.target);
        if self.current >= self.target {
            self.done = true;
        }
        Some(Frame {
            label: self.current.round() as u8,
            bar_width: self.current,
        })
    }
}

/// Serializable form handed to the page.
#[derive(Debug, Clone, Serialize)]
pub struct AnimationPlan {
    pub interval_ms: u64,
    pub frames: Vec<Frame>,
}

impl AnimationPlan {
    pub fn for_score(target: f64) -> Self {
        Self {
            interval_ms: FRAME_INTERVAL_MS,
            frames: ScoreAnimation::new(target).collect(),
        }
    }
}
