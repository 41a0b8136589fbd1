//! Settings of the simulator.

use serde::{Deserialize, Serialize};

use crate::{SimulatorError, cache::DEFAULT_CACHE_CAPACITY, error::Result};

/// Default ceiling on the number of qubits of a register, the composite operator being `4^n` complex numbers.
pub const DEFAULT_MAX_QUBITS: usize = 16;

/// Hard ceiling on `max_qubits`.
pub const MAX_SUPPORTED_QUBITS: usize = 30;

/// Default tolerance on unitarity and on the sum of probabilities.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default number of shots from which sampling is split across threads.
pub const DEFAULT_PARALLEL_SHOT_THRESHOLD: usize = 8192;

/// Configuration of a [DenseCPUBackend](crate::backend::dense_cpu::DenseCPUBackend) and of a [Session](crate::session::Session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
	/// Number of gate sequences whose composite is memoized, 0 to disable.
	pub cache_capacity:          usize,
	/// Registers larger than this are rejected before allocating anything.
	pub max_qubits:              usize,
	/// Tolerance on the sum of probabilities before sampling.
	pub tolerance:               f64,
	/// Shot counts at or above this are sampled in parallel chunks.
	pub parallel_shot_threshold: usize,
	/// Seed of the session's random number generator, entropy if unset.
	pub seed:                    Option<u64>,
}

impl Default for SimulatorConfig {
	fn default() -> Self {
		Self {
			cache_capacity:          DEFAULT_CACHE_CAPACITY,
			max_qubits:              DEFAULT_MAX_QUBITS,
			tolerance:               DEFAULT_TOLERANCE,
			parallel_shot_threshold: DEFAULT_PARALLEL_SHOT_THRESHOLD,
			seed:                    None,
		}
	}
}

impl SimulatorConfig {
	pub fn with_cache_capacity(self, cache_capacity: usize) -> Self {
		Self { cache_capacity, ..self }
	}

	pub fn with_max_qubits(self, max_qubits: usize) -> Self {
		Self { max_qubits, ..self }
	}

	pub fn with_tolerance(self, tolerance: f64) -> Self {
		Self { tolerance, ..self }
	}

	pub fn with_parallel_shot_threshold(self, parallel_shot_threshold: usize) -> Self {
		Self {
			parallel_shot_threshold,
			..self
		}
	}

	pub fn with_seed(self, seed: u64) -> Self {
		Self {
			seed: Some(seed),
			..self
		}
	}

	/// Checks every value is in its accepted range.
	pub fn validate(&self) -> Result<()> {
		if self.max_qubits == 0 || self.max_qubits > MAX_SUPPORTED_QUBITS {
			return Err(SimulatorError::InvalidConfig(format!(
				"max_qubits must be between 1 and {}, got {}",
				MAX_SUPPORTED_QUBITS, self.max_qubits
			)));
		}
		if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
			return Err(SimulatorError::InvalidConfig(format!(
				"tolerance must be a positive number, got {}",
				self.tolerance
			)));
		}
		if self.parallel_shot_threshold == 0 {
			return Err(SimulatorError::InvalidConfig(
				"parallel_shot_threshold must be at least 1".to_string(),
			));
		}
		return Ok(());
	}
}
