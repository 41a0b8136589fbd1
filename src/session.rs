//! Entry points running circuits on an explicit backend.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
	GateDescriptor, SimulationResult, SimulatorError,
	backend::{Backend, Program, dense_cpu::DenseCPUBackend},
	circuit::Circuit,
	config::SimulatorConfig,
	error::Result,
};

/// Number of shots of a [Session::run_default] call.
pub const DEFAULT_NUM_SHOTS: usize = 1024;

/// Runs a gate sequence on a backend and measures the whole register `num_shots` times.
///
/// # Arguments
///
/// * `backend` - The backend to compile the gates with.
/// * `initial_states` - The classical state, 0 or 1, of each qubit of the register.
/// * `gates` - The gates to apply, in order.
/// * `num_shots` - The number of measurements.
/// * `rng` - Source of randomness for the measurements.
///
/// # Examples
/// ```
/// use qsampler::{Gate, backend::dense_cpu::DenseCPUBackend, session::run};
/// let gates = [Gate::x().on(0)];
/// let result = run(&DenseCPUBackend::default(), &[0, 0], &gates, 100, &mut rand::rng()).unwrap();
/// assert_eq!(result.get("10").unwrap(), 100);
/// ```
pub fn run<B, P, R>(
	backend: &B, initial_states: &[u8], gates: &[GateDescriptor], num_shots: usize, rng: &mut R,
) -> Result<SimulationResult>
where
	B: Backend<P>,
	P: Program,
	R: Rng + ?Sized,
{
	if num_shots == 0 {
		return Err(SimulatorError::simulation("number of shots must be positive"));
	}
	let program = backend.compile(gates)?;
	return program.sample(initial_states, num_shots, rng);
}

/// A backend together with the random number generator its measurements draw from.
#[derive(Debug)]
pub struct Session<B> {
	backend: B,
	rng:     StdRng,
}

impl<B> Session<B> {
	/// Creates a session, sampling deterministically if `seed` is set.
	pub fn new(backend: B, seed: Option<u64>) -> Self {
		let rng = match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		Self { backend, rng }
	}

	pub fn backend(&self) -> &B {
		&self.backend
	}

	/// Runs a circuit and measures its whole register `num_shots` times.
	pub fn run<P: Program>(&mut self, circuit: &Circuit, num_shots: usize) -> Result<SimulationResult>
	where
		B: Backend<P>,
	{
		debug!(nb_qubits = circuit.nb_qubits(), nb_gates = circuit.gates().len(), num_shots, "running circuit");
		return run(
			&self.backend,
			circuit.initial_states(),
			circuit.gates(),
			num_shots,
			&mut self.rng,
		);
	}

	/// Runs a circuit with [DEFAULT_NUM_SHOTS] shots.
	pub fn run_default<P: Program>(&mut self, circuit: &Circuit) -> Result<SimulationResult>
	where
		B: Backend<P>,
	{
		self.run(circuit, DEFAULT_NUM_SHOTS)
	}
}

impl Session<DenseCPUBackend> {
	/// Creates a session on a [DenseCPUBackend], seeded from the configuration.
	pub fn dense_cpu(config: SimulatorConfig) -> Result<Self> {
		let seed = config.seed;
		let backend = DenseCPUBackend::new(config)?;
		return Ok(Self::new(backend, seed));
	}
}
