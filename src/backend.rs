use rand::Rng;

use crate::{GateDescriptor, SimulationResult, error::Result};

/// Turns gate sequences into programs that can be sampled.
/// Any implementation must honor the [SimulationResult] contract so backends stay interchangeable.
pub trait Backend<P: Program> {
	fn compile(&self, gates: &[GateDescriptor]) -> Result<P>;
}

pub trait Program {
	/// Measures every qubit of the register `num_shots` times, starting each shot from `initial_states`.
	///
	/// # Arguments
	///
	/// * `initial_states` - The classical state, 0 or 1, of each qubit of the register.
	/// * `num_shots` - The number of independent measurements.
	/// * `rng` - Source of randomness for the measurements.
	fn sample<R: Rng + ?Sized>(&self, initial_states: &[u8], num_shots: usize, rng: &mut R)
	-> Result<SimulationResult>;
}

pub mod dense_cpu;
