// src/model/variates.rs

//! Random variates built on a single uniform draw in [0, 1).
//!
//! Each generator is a validated value type implementing
//! `rand_distr::Distribution`, so it can be sampled from any `Rng`.
//! The free functions at the bottom are one-shot conveniences.

use crate::error::{SimError, SimResult};
use rand::Rng;
use rand_distr::Distribution;

/// Exponential distribution parameterised by its mean.
///
/// Sampled by inversion: `-ln(1 - u) * mean`.
#[derive(Debug, Clone, Copy)]
pub struct Exponential {
    mean: f64,
}

impl Exponential {
    pub fn new(mean: f64) -> SimResult<Self> {
        if !mean.is_finite() || mean < 0.0 {
            return Err(SimError::invalid(
                "mean",
                format!("exponential mean must be finite and >= 0, got {mean}"),
            ));
        }
        Ok(Self { mean })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }
}

impl Distribution<f64> for Exponential {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.gen();
        // u < 1, so the log is finite and non-positive
        -(1.0 - u).ln() * self.mean
    }
}

/// Continuous uniform distribution over `[low, high)`.
#[derive(Debug, Clone, Copy)]
pub struct UniformSpan {
    low: f64,
    high: f64,
}

impl UniformSpan {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

impl Distribution<f64> for UniformSpan {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.gen();
        self.low + (self.high - self.low) * u
    }
}

/// Poisson distribution sampled with Knuth's product-of-uniforms method.
///
/// Exact, but the expected number of uniform draws is `lambda + 1` and there
/// is no iteration cap. Past roughly `lambda = 700` the threshold
/// `exp(-lambda)` underflows and samples stop following the distribution,
/// so this is only suitable for the small daily rates it is used for.
#[derive(Debug, Clone, Copy)]
pub struct KnuthPoisson {
    lambda: f64,
    threshold: f64,
}

impl KnuthPoisson {
    pub fn new(lambda: f64) -> SimResult<Self> {
        if !lambda.is_finite() {
            return Err(SimError::invalid(
                "lambda",
                format!("poisson rate must be finite, got {lambda}"),
            ));
        }
        Ok(Self {
            lambda,
            threshold: (-lambda).exp(),
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Distribution<u64> for KnuthPoisson {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        if self.lambda <= 0.0 {
            return 0;
        }
        let mut k: u64 = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= rng.gen::<f64>();
            if p <= self.threshold {
                return k - 1;
            }
        }
    }
}

/// Replenishment lead time in whole days.
///
/// A uniform draw over `[min, max]`, rounded to the nearest day and clamped
/// back into the bounds.
#[derive(Debug, Clone, Copy)]
pub struct LeadTime {
    min: u32,
    max: u32,
}

impl LeadTime {
    pub fn new(min: u32, max: u32) -> SimResult<Self> {
        if min > max {
            return Err(SimError::invalid(
                "lead_time",
                format!("minimum {min} exceeds maximum {max}"),
            ));
        }
        Ok(Self { min, max })
    }
}

impl Distribution<u32> for LeadTime {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let raw = UniformSpan::new(self.min as f64, self.max as f64).sample(rng);
        (raw.round() as u32).clamp(self.min, self.max)
    }
}

pub fn exponential<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> SimResult<f64> {
    Ok(Exponential::new(mean)?.sample(rng))
}

pub fn uniform<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
    UniformSpan::new(a, b).sample(rng)
}

pub fn poisson<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> SimResult<u64> {
    Ok(KnuthPoisson::new(lambda)?.sample(rng))
}
