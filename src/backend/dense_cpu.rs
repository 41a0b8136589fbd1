//! Compile and run quantum programs using a simulator with dense linear algebra algorithms on the CPU.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use rand::{
	Rng, SeedableRng,
	distr::{Distribution, weighted::WeightedIndex},
	rngs::StdRng,
};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
	ComplexMatrix, GateDescriptor, SimulationResult, SimulatorError,
	backend::{Backend, Program},
	cache::{CacheStats, CompositionCache},
	composition::{combine, nb_distinct_qubits},
	config::SimulatorConfig,
	error::Result,
	qubits::{bit_at, reorder},
	state::StateVector,
};

/// Number of shots drawn from each seed when sampling in parallel.
pub const SHOTS_PER_CHUNK: usize = 1024;

/// Backend to compile gate sequences into [DenseCPUProgram]'s.
/// Composites are memoized per gate sequence, the memo being shared between threads behind a lock.
#[derive(Debug)]
pub struct DenseCPUBackend {
	config: SimulatorConfig,
	cache:  Mutex<CompositionCache>,
}

/// A program that samples a single composite operator with dense linear algebra calculations on the CPU.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseCPUProgram {
	/// All the gates of the circuit, fused.
	composite:               GateDescriptor,
	max_qubits:              usize,
	tolerance:               f64,
	parallel_shot_threshold: usize,
}

impl Default for DenseCPUBackend {
	fn default() -> Self {
		let config = SimulatorConfig::default();
		Self {
			cache: Mutex::new(CompositionCache::new(config.cache_capacity)),
			config,
		}
	}
}

impl DenseCPUBackend {
	/// Creates a backend with the given settings.
	///
	/// # Errors
	///
	/// Fails with [SimulatorError::InvalidConfig] if the configuration is out of range.
	pub fn new(config: SimulatorConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self {
			cache: Mutex::new(CompositionCache::new(config.cache_capacity)),
			config,
		})
	}

	pub fn config(&self) -> &SimulatorConfig {
		&self.config
	}

	/// Counters of the composition memo.
	pub fn cache_stats(&self) -> CacheStats {
		self.cache.lock().stats()
	}

	/// Forgets every memoized composite.
	pub fn clear_cache(&self) {
		self.cache.lock().clear();
	}
}

impl Backend<DenseCPUProgram> for DenseCPUBackend {
	fn compile(&self, gates: &[GateDescriptor]) -> Result<DenseCPUProgram> {
		let nb_qubits = nb_distinct_qubits(gates);
		if nb_qubits > self.config.max_qubits {
			warn!(nb_qubits, max_qubits = self.config.max_qubits, "rejecting circuit");
			return Err(SimulatorError::circuit(format!(
				"circuit acts on {} qubits, more than the maximum of {}",
				nb_qubits, self.config.max_qubits
			)));
		}

		let composite = self.cache.lock().get_or_try_insert_with(gates, || combine(gates))?;
		debug!(nb_gates = gates.len(), qubits = ?composite.qubits, "compiled circuit");

		return Ok(DenseCPUProgram {
			composite,
			max_qubits: self.config.max_qubits,
			tolerance: self.config.tolerance,
			parallel_shot_threshold: self.config.parallel_shot_threshold,
		});
	}
}

impl DenseCPUProgram {
	/// The qubits of the composite operator, in the order its matrix is expressed in.
	pub fn qubits(&self) -> &[usize] {
		self.composite.qubits()
	}

	/// The composite operator, expressed in the order of [DenseCPUProgram::qubits].
	pub fn as_matrix(&self) -> &ComplexMatrix {
		self.composite.matrix()
	}

	/// The composite descriptor the program runs.
	pub fn composite(&self) -> &GateDescriptor {
		&self.composite
	}

	/// The composite operator on the whole `nb_qubits` register, in register order: qubit 0 is the most significant.
	/// Qubits no gate acts on get the identity.
	///
	/// # Errors
	///
	/// Fails with [SimulatorError::Circuit] if a gate acts on a qubit outside of the register.
	pub fn register_matrix(&self, nb_qubits: usize) -> Result<ComplexMatrix> {
		self.check_register(nb_qubits)?;

		let untouched: Vec<usize> = (0..nb_qubits).filter(|q| !self.qubits().contains(q)).collect();
		let mut matrix = self.as_matrix().clone();
		if !untouched.is_empty() {
			matrix = matrix.kronecker_product(&ComplexMatrix::identity(1 << untouched.len()));
		}
		let padded_order: Vec<usize> = self.qubits().iter().copied().chain(untouched).collect();
		let register_order: Vec<usize> = (0..nb_qubits).collect();
		return reorder(&matrix, &padded_order, &register_order);
	}

	/// Applies the composite operator to the initial state of its qubits.
	/// The resulting amplitudes are indexed in the order of [DenseCPUProgram::qubits].
	pub fn final_state(&self, initial_states: &[u8]) -> Result<StateVector> {
		self.check_initial_states(initial_states)?;
		let initial_state = StateVector::assemble(initial_states, self.qubits())?;
		return Ok(self.as_matrix() * &initial_state);
	}

	/// Probability of each outcome over the composite's qubits, renormalized to sum to 1.
	///
	/// # Errors
	///
	/// Fails with [SimulatorError::Simulation] if the squared amplitudes don't sum to 1 within tolerance,
	/// which happens when a gate isn't unitary.
	pub fn probabilities(&self, initial_states: &[u8]) -> Result<Vec<f64>> {
		let mut probabilities = self.final_state(initial_states)?.probabilities();

		let total: f64 = probabilities.iter().sum();
		if !total.is_finite() || (total - 1.0).abs() > self.tolerance {
			return Err(SimulatorError::simulation(format!(
				"probabilities sum to {} instead of 1, is every gate unitary?",
				total
			)));
		}
		if total != 1.0 {
			debug!(drift = total - 1.0, "renormalizing probabilities");
		}
		for probability in probabilities.iter_mut() {
			*probability /= total;
		}

		let total: f64 = probabilities.iter().sum();
		if (total - 1.0).abs() > self.tolerance {
			return Err(SimulatorError::simulation(format!(
				"probabilities sum to {} after renormalization",
				total
			)));
		}
		return Ok(probabilities);
	}

	/// Translates an outcome over the composite's qubits into an outcome over the whole register.
	/// Qubits outside of the composite keep their initial state.
	///
	/// # Errors
	///
	/// Fails with [SimulatorError::Circuit] if the register doesn't hold every qubit of the composite
	/// or an initial state isn't 0 or 1.
	pub fn register_outcome(&self, outcome: usize, initial_states: &[u8]) -> Result<usize> {
		self.check_initial_states(initial_states)?;
		return Ok(self.map_to_register(outcome, initial_states));
	}

	fn map_to_register(&self, outcome: usize, initial_states: &[u8]) -> usize {
		let nb_qubits = initial_states.len();
		let width = self.qubits().len();

		let mut bits: Vec<usize> = initial_states.iter().map(|bit| *bit as usize).collect();
		for (position, &qubit) in self.qubits().iter().enumerate() {
			bits[qubit] = bit_at(outcome, position, width);
		}
		return bits
			.iter()
			.enumerate()
			.fold(0, |register, (qubit, &bit)| register | (bit << (nb_qubits - 1 - qubit)));
	}

	/// Checks the register holds the composite and every qubit starts in a classical state.
	fn check_initial_states(&self, initial_states: &[u8]) -> Result<()> {
		self.check_register(initial_states.len())?;
		if let Some((qubit, bit)) = initial_states.iter().enumerate().find(|(_, bit)| **bit > 1) {
			return Err(SimulatorError::circuit(format!(
				"initial state of qubit {} must be 0 or 1, got {}",
				qubit, bit
			)));
		}
		return Ok(());
	}

	fn check_register(&self, nb_qubits: usize) -> Result<()> {
		if nb_qubits > self.max_qubits {
			return Err(SimulatorError::circuit(format!(
				"register of {} qubits is larger than the maximum of {}",
				nb_qubits, self.max_qubits
			)));
		}
		if let Some(qubit) = self.qubits().iter().find(|q| **q >= nb_qubits) {
			return Err(SimulatorError::circuit(format!(
				"gate acts on qubit {} outside of the {}-qubit register",
				qubit, nb_qubits
			)));
		}
		return Ok(());
	}
}

/// Draws `num_shots` outcomes and counts them.
fn tally<R: Rng + ?Sized>(distribution: &WeightedIndex<f64>, num_shots: usize, rng: &mut R) -> BTreeMap<usize, usize> {
	let mut counts = BTreeMap::new();
	for _ in 0..num_shots {
		*counts.entry(distribution.sample(rng)).or_insert(0) += 1;
	}
	return counts;
}

impl Program for DenseCPUProgram {
	fn sample<R: Rng + ?Sized>(
		&self, initial_states: &[u8], num_shots: usize, rng: &mut R,
	) -> Result<SimulationResult> {
		if num_shots == 0 {
			return Err(SimulatorError::simulation("number of shots must be positive"));
		}
		self.check_initial_states(initial_states)?;

		let probabilities = self.probabilities(initial_states)?;
		let distribution = WeightedIndex::new(&probabilities)
			.map_err(|e| SimulatorError::simulation(format!("invalid outcome distribution: {}", e)))?;

		let counts = if num_shots >= self.parallel_shot_threshold {
			// Chunks have a fixed size and one seed each, drawn in order, whatever the size of the thread pool.
			let nb_chunks = num_shots.div_ceil(SHOTS_PER_CHUNK);
			let chunks: Vec<(u64, usize)> = (0..nb_chunks)
				.map(|i| (rng.next_u64(), SHOTS_PER_CHUNK.min(num_shots - i * SHOTS_PER_CHUNK)))
				.collect();

			chunks
				.into_par_iter()
				.map(|(seed, shots)| tally(&distribution, shots, &mut StdRng::seed_from_u64(seed)))
				.reduce(BTreeMap::new, |mut lhs, rhs| {
					for (outcome, count) in rhs {
						*lhs.entry(outcome).or_insert(0) += count;
					}
					lhs
				})
		}
		else {
			tally(&distribution, num_shots, rng)
		};

		let register_counts: BTreeMap<usize, usize> = counts
			.into_iter()
			.map(|(outcome, count)| (self.map_to_register(outcome, initial_states), count))
			.collect();
		debug!(
			num_shots,
			nb_outcomes = register_counts.len(),
			"sampled circuit"
		);

		return SimulationResult::new(register_counts, initial_states.len());
	}
}
