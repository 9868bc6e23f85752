use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::errors::AppError;

/// Probability of a synthetic failure, drawn once per request.
///
/// The draw is uniform and never looks at the request, so any request can
/// fail. Probabilities outside `0.0..=1.0` are clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultPolicy {
    probability: f64,
}

impl FaultPolicy {
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        FaultPolicy { probability }
    }

    pub fn never() -> Self {
        FaultPolicy::new(0.0)
    }

    pub fn always() -> Self {
        FaultPolicy::new(1.0)
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn should_fail(&self) -> bool {
        rand::thread_rng().gen::<f64>() < self.probability
    }
}

impl Default for FaultPolicy {
    fn default() -> Self {
        FaultPolicy::new(0.1)
    }
}

/// Artificial network conditions applied by every mock handler.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    pub delay: Duration,
    pub faults: FaultPolicy,
}

impl Latency {
    pub fn new(delay: Duration, faults: FaultPolicy) -> Self {
        Latency { delay, faults }
    }

    /// No delay and no injected failures.
    pub fn instant() -> Self {
        Latency::new(Duration::ZERO, FaultPolicy::never())
    }

    pub async fn delay(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Called by mutation handlers after the delay.
    pub fn maybe_fail(&self) -> Result<(), AppError> {
        if self.faults.should_fail() {
            debug!("Injecting mock transport failure");
            return Err(AppError::SimulatedFailure);
        }
        Ok(())
    }
}
