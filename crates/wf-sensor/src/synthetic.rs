//! `SyntheticWalk`: a seeded, noisy walk from one point to another.
//!
//! The walker moves along the great circle from `from` to `to` at a constant
//! speed, reporting a location fix every `fix_interval_ms` with uniform
//! positional jitter of up to `jitter_m` metres, and a compass heading half
//! way between fixes with up to `heading_noise_deg` of noise.  The last fix
//! is exactly at `to` (plus jitter).

use wf_core::{GeoPoint, RawHeading, Timestamp, WfError};

use crate::{SensorResult, SensorRng, SensorSample};

const POSITION_STREAM: u64 = 1;
const HEADING_STREAM: u64 = 2;

/// Longest walk `generate` will produce, in location fixes.
pub const MAX_WALK_FIXES: u64 = 100_000;

#[derive(Clone, Debug)]
pub struct SyntheticWalk {
    pub from:              GeoPoint,
    pub to:                GeoPoint,
    /// Walking speed, metres per second.
    pub speed_mps:         f64,
    pub fix_interval_ms:   u64,
    /// Maximum positional error, metres.
    pub jitter_m:          f64,
    /// Maximum compass error, degrees.  Negative disables heading samples.
    pub heading_noise_deg: f64,
    pub seed:              u64,
}

impl SyntheticWalk {
    /// A walk at 1.4 m/s with one fix per second, 3 m jitter, and 5° compass
    /// noise.
    pub fn new(from: GeoPoint, to: GeoPoint, seed: u64) -> Self {
        Self {
            from,
            to,
            speed_mps:         1.4,
            fix_interval_ms:   1_000,
            jitter_m:          3.0,
            heading_noise_deg: 5.0,
            seed,
        }
    }

    pub fn with_jitter_m(mut self, jitter_m: f64) -> Self {
        self.jitter_m = jitter_m;
        self
    }

    pub fn with_heading_noise_deg(mut self, deg: f64) -> Self {
        self.heading_noise_deg = deg;
        self
    }

    /// Generate the samples, ordered by timestamp.
    pub fn generate(&self) -> SensorResult<Vec<SensorSample>> {
        let from = self.from.validate()?;
        let to = self.to.validate()?;
        if !(self.speed_mps.is_finite() && self.speed_mps > 0.0) || self.fix_interval_ms == 0 {
            return Err(WfError::Config(format!(
                "synthetic walk needs a positive speed and fix interval, got {} m/s every {} ms",
                self.speed_mps, self.fix_interval_ms
            ))
            .into());
        }

        let total_m = from.distance_m(to)?;
        let step_m = self.speed_mps * self.fix_interval_ms as f64 / 1_000.0;
        // Absorb rounding so an exact multiple of the step is not one fix longer.
        let steps = (total_m / step_m - 1e-6).ceil().max(0.0);
        if steps >= MAX_WALK_FIXES as f64 {
            return Err(WfError::Config(format!(
                "synthetic walk of {total_m:.0} m needs {steps} fixes, limit is {MAX_WALK_FIXES}"
            ))
            .into());
        }
        let steps = steps as u64;

        let mut root = SensorRng::new(self.seed);
        let mut pos_rng = root.child(POSITION_STREAM);
        let mut hdg_rng = root.child(HEADING_STREAM);

        let mut samples = Vec::with_capacity(2 * steps as usize + 1);
        for k in 0..=steps {
            let at = Timestamp(k * self.fix_interval_ms);
            let truth = if k == 0 {
                from
            } else if k == steps {
                to
            } else {
                from.destination(from.bearing_to(to)?, k as f64 * step_m)?
            };
            samples.push(SensorSample::location(at, self.jitter(truth, &mut pos_rng)?));

            if k < steps && self.heading_noise_deg >= 0.0 {
                let facing = truth.bearing_to(to)?;
                let compass = facing + hdg_rng.symmetric(self.heading_noise_deg);
                samples.push(SensorSample::heading(
                    at + self.fix_interval_ms / 2,
                    RawHeading::compass(compass),
                ));
            }
        }
        Ok(samples)
    }

    fn jitter(&self, truth: GeoPoint, rng: &mut SensorRng) -> SensorResult<GeoPoint> {
        if self.jitter_m <= 0.0 {
            return Ok(truth);
        }
        let bearing = rng.gen_range(0.0..360.0);
        let dist = rng.gen_range(0.0..=self.jitter_m);
        Ok(truth.destination(bearing, dist)?)
    }
}
