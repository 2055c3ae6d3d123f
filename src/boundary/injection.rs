//! Entry policy for the open lane

use rand::Rng;

/// Whether a car enters when cell 0 is free after motion
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum InjectionPolicy {
    /// Every free entry slot is filled; consumes no draws
    Always,
    /// A free slot is filled with this probability, drawn independently of
    /// the braking probability. Every trial consumes one draw, also at 0 and 1.
    Probability(f64),
}

impl InjectionPolicy {
    /// Decide admission for this step
    pub fn admits<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        match *self {
            InjectionPolicy::Always => true,
            InjectionPolicy::Probability(q) => rng.gen::<f64>() < q,
        }
    }

    /// Admission probability
    pub fn probability(&self) -> f64 {
        match *self {
            InjectionPolicy::Always => 1.0,
            InjectionPolicy::Probability(q) => q,
        }
    }
}

impl Default for InjectionPolicy {
    fn default() -> Self {
        InjectionPolicy::Probability(0.5)
    }
}
