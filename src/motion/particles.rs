//! Seeded particle generation for decorative effects.

use std::ops::Range;

use crate::dom::host::ElementSpec;

/// SplitMix64 generator; identical seeds yield identical particle sets.
#[derive(Clone, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    pub(crate) fn in_range(&mut self, r: &Range<f64>) -> f64 {
        r.start + self.next_f64_01() * (r.end - r.start)
    }
}

/// Sampling ranges for a particle burst.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleRanges {
    /// Horizontal position in percent of the container width.
    pub left_pct: Range<f64>,
    /// Fall duration in seconds.
    pub duration_secs: Range<f64>,
    /// Start delay in seconds.
    pub delay_secs: Range<f64>,
}

impl Default for ParticleRanges {
    fn default() -> Self {
        Self {
            left_pct: 0.0..100.0,
            duration_secs: 5.0..10.0,
            delay_secs: 0.0..5.0,
        }
    }
}

/// One falling decoration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Particle {
    /// Horizontal position in percent.
    pub left_pct: f64,
    /// Animation duration in seconds.
    pub duration_secs: f64,
    /// Animation delay in seconds.
    pub delay_secs: f64,
}

impl Particle {
    /// Element carrying `class` and the particle parameters as `data-*` attributes.
    pub fn to_element(&self, class: &str) -> ElementSpec {
        ElementSpec::new("div")
            .with_flag(class)
            .with_attr("data-left", format!("{:.3}%", self.left_pct))
            .with_attr("data-duration", format!("{:.3}s", self.duration_secs))
            .with_attr("data-delay", format!("{:.3}s", self.delay_secs))
    }
}

pub(crate) fn spawn(rng: &mut Rng64, count: usize, ranges: &ParticleRanges) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            left_pct: rng.in_range(&ranges.left_pct),
            duration_secs: rng.in_range(&ranges.duration_secs),
            delay_secs: rng.in_range(&ranges.delay_secs),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/motion/particles.rs"]
mod tests;
