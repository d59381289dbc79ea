//! Colored-noise recurrences.
//!
//! Everything here is a per-sample struct fed white noise by the caller; the
//! crate itself carries no random source, so these stay deterministic and
//! `no_std`-friendly. Buffer-fill helpers take the white source as a closure.
//!
//! Contents
//! - `PinkFilter` : Paul Kellet 6-pole approximation of a -3 dB/octave slope
//! - `BrownWalk`  : leaky random-walk integrator (-6 dB/octave)
//! - `fill_white` / `fill_pink` / `fill_brown` : buffer fills over a white source
//!
//! The pink and brown recurrences are coefficient-exact: derived sounds (rain,
//! surf, fire rumble) get their timbre from filtering these, so the constants
//! must not drift.

/// Paul Kellet style pink-noise filter: six one-pole states plus a delayed
/// white tap, summed with a scaled raw white component.
///
/// Per white input `w`:
/// `b0 = 0.99886 b0 + 0.0555179 w` … `b5 = -0.7616 b5 - 0.0168981 w`,
/// `out = (b0 + … + b6 + 0.5362 w) * 0.11`, then `b6 = 0.115926 w`.
///
/// The 0.11 factor compensates the summed gain so output stays near [-1, 1].
#[derive(Copy, Clone, Debug, Default)]
pub struct PinkFilter {
    b0: f32,
    b1: f32,
    b2: f32,
    b3: f32,
    b4: f32,
    b5: f32,
    b6: f32,
}

impl PinkFilter {
    #[inline]
    pub fn new() -> Self { Self::default() }

    /// Feed one white sample in [-1, 1], get one pink sample.
    #[inline]
    pub fn tick(&mut self, white: f32) -> f32 {
        self.b0 = 0.99886 * self.b0 + white * 0.0555179;
        self.b1 = 0.99332 * self.b1 + white * 0.0750759;
        self.b2 = 0.96900 * self.b2 + white * 0.1538520;
        self.b3 = 0.86650 * self.b3 + white * 0.3104856;
        self.b4 = 0.55000 * self.b4 + white * 0.5329522;
        self.b5 = -0.7616 * self.b5 - white * 0.0168981;
        let out = (self.b0 + self.b1 + self.b2 + self.b3 + self.b4 + self.b5 + self.b6
            + white * 0.5362)
            * 0.11;
        self.b6 = white * 0.115926;
        out
    }

    #[inline]
    pub fn reset(&mut self) { *self = Self::default(); }
}

/// Leaky integrator over white noise: `y = (prev + 0.02 w) / 1.02`.
///
/// The division keeps the walk from diverging; the raw walk is quiet, so the
/// output is scaled by 3.5 before filtering.
#[derive(Copy, Clone, Debug, Default)]
pub struct BrownWalk {
    last: f32,
}

impl BrownWalk {
    /// Output gain compensation for the low-amplitude raw walk.
    pub const GAIN: f32 = 3.5;

    #[inline]
    pub fn new() -> Self { Self::default() }

    /// Feed one white sample in [-1, 1], get one brown sample.
    #[inline]
    pub fn tick(&mut self, white: f32) -> f32 {
        self.last = (self.last + 0.02 * white) / 1.02;
        self.last * Self::GAIN
    }

    #[inline]
    pub fn reset(&mut self) { self.last = 0.0; }
}

// ------------------------------- Buffer fills -------------------------------------

/// Fill `out` with white samples drawn from `white`. The source is expected to
/// produce values in [-1, 1].
#[inline]
pub fn fill_white(out: &mut [f32], mut white: impl FnMut() -> f32) {
    for y in out.iter_mut() {
        *y = white();
    }
}

/// Fill `out` with pink noise, running a fresh [`PinkFilter`] over `white`.
#[inline]
pub fn fill_pink(out: &mut [f32], mut white: impl FnMut() -> f32) {
    let mut pink = PinkFilter::new();
    for y in out.iter_mut() {
        *y = pink.tick(white());
    }
}

/// Fill `out` with brown noise, running a fresh [`BrownWalk`] over `white`.
#[inline]
pub fn fill_brown(out: &mut [f32], mut white: impl FnMut() -> f32) {
    let mut walk = BrownWalk::new();
    for y in out.iter_mut() {
        *y = walk.tick(white());
    }
}

// ------------------------------------ Tests --------------------------------------
