//! Errors raised while composing circuits, sampling them, and reading results back.
//!
//! Every failure is a local validation failure of the caller's input, nothing here is transient.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
	/// Two qubit orderings that should be permutations of each other aren't.
	#[error("invalid permutation: {old:?} cannot be reordered into {new:?}")]
	InvalidPermutation {
		/// The ordering the matrix is currently expressed in.
		old: Vec<usize>,
		/// The requested ordering.
		new: Vec<usize>,
	},

	/// Malformed gate sequence: empty, dimension mismatch, out of range qubit...
	#[error("circuit error: {0}")]
	Circuit(String),

	/// The simulation could not produce a valid distribution, or was asked for no shots.
	#[error("simulation error: {0}")]
	Simulation(String),

	/// A result lookup key isn't a valid outcome for the register width.
	#[error("invalid key '{key}' for a result with {sig_bits} significant bits")]
	InvalidKey {
		/// The key as given by the caller.
		key:      String,
		/// Width of the register of the result.
		sig_bits: usize,
	},

	/// A configuration value is out of its accepted range.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

impl SimulatorError {
	/// Creates a [SimulatorError::Circuit] error.
	pub fn circuit(message: impl Into<String>) -> Self {
		Self::Circuit(message.into())
	}

	/// Creates a [SimulatorError::Simulation] error.
	pub fn simulation(message: impl Into<String>) -> Self {
		Self::Simulation(message.into())
	}

	/// Creates a [SimulatorError::InvalidPermutation] error.
	pub fn invalid_permutation(old: &[usize], new: &[usize]) -> Self {
		Self::InvalidPermutation {
			old: old.to_vec(),
			new: new.to_vec(),
		}
	}
}
