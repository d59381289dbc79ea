//! Gain ramps.
//!
//! A generator chain fades in from silence over a fixed window and can have
//! its target moved while the ramp is still in flight (volume slider on an
//! already-playing channel). `LinearRamp` covers both: constant-slope motion
//! towards a target, retargetable at any time, allocation free.

/// Constant-slope ramp towards a target value.
///
/// The per-sample increment is precomputed from the ramp window, so `tick()`
/// is one add and one compare. Retargeting recomputes the slope from the
/// *current* value, never snapping.
#[derive(Copy, Clone, Debug)]
pub struct LinearRamp {
    current: f32,
    target: f32,
    step: f32, // signed per-sample increment; 0 when settled
}

impl LinearRamp {
    /// Start at `start` and move to `target` over `secs` seconds at `sr`.
    #[inline]
    pub fn new(start: f32, target: f32, secs: f32, sr: f32) -> Self {
        let mut r = Self { current: start, target: start, step: 0.0 };
        r.retarget(target, secs, sr);
        r
    }

    /// Move the target; the ramp runs from the current value over `secs`.
    /// A non-positive window jumps immediately.
    #[inline]
    pub fn retarget(&mut self, target: f32, secs: f32, sr: f32) {
        self.target = target;
        let n = secs * sr.max(1.0);
        if n <= 1.0 {
            self.current = target;
            self.step = 0.0;
        } else {
            self.step = (target - self.current) / n;
        }
    }

    /// Advance one sample and return the ramp value.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        if self.step != 0.0 {
            self.current += self.step;
            let done = if self.step > 0.0 {
                self.current >= self.target
            } else {
                self.current <= self.target
            };
            if done {
                self.current = self.target;
                self.step = 0.0;
            }
        }
        self.current
    }

    #[inline] pub fn value(&self) -> f32 { self.current }
    #[inline] pub fn target(&self) -> f32 { self.target }
    #[inline] pub fn is_settled(&self) -> bool { self.step == 0.0 }
}

// ------------------------------------ Tests --------------------------------------
