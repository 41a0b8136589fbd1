//! State vectors of the qubits of a circuit, and how they get built from classical initial states.

use num::{
	Complex, One, Zero,
	complex::{Complex64, ComplexFloat},
};

use crate::{ComplexMatrix, SimulatorError, composition::reduce_pairwise, error::Result};

/// The state vector of the qubits used for simulations in a circuit.
/// Index `i` holds the amplitude of the basis state whose bits are read in some qubit order, most significant first.
#[derive(Clone, PartialEq, Default)]
pub struct StateVector(pub(crate) Vec<Complex<f64>>);

impl std::fmt::Debug for StateVector {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let max_bits = (self.0.len() as f64).log2().ceil() as usize;
		writeln!(f, "StateVector (")?;
		for (idx, amplitude) in self.0.iter().enumerate() {
			let binary_state = format!("{:0width$b}", idx, width = max_bits);
			writeln!(f, "    |{}⟩: {}+{}i", binary_state, amplitude.re(), amplitude.im())?;
		}
		write!(f, ")")?;
		return Ok(());
	}
}

impl StateVector {
	/// Turns a complex vector into a state vector.
	pub fn from_vec(state: Vec<Complex<f64>>) -> Self {
		StateVector(state)
	}

	/// Creates the basis state `|x⟩` among `nb_dimensions` states.
	///
	/// # Examples
	/// ```
	/// use qsampler::state::StateVector;
	/// let state = StateVector::base(0b00100, 32); // Represents |00100⟩ , or |4⟩ depending on which notation you prefer.
	/// assert_eq!(state.dimension(), 32);
	/// ```
	pub fn base(x: usize, nb_dimensions: usize) -> Self {
		let mut components = vec![Complex::zero(); nb_dimensions];
		components[x] = Complex::one();
		return Self(components);
	}

	/// The 2-dimensional state of a single qubit in a classical state, `|0⟩` or `|1⟩`.
	///
	/// # Errors
	///
	/// Fails with [SimulatorError::Circuit] if `bit` isn't 0 or 1.
	pub fn classical_qubit(bit: u8) -> Result<Self> {
		match bit {
			0 | 1 => Ok(Self::base(bit as usize, 2)),
			_ => Err(SimulatorError::circuit(format!("initial qubit state must be 0 or 1, got {}", bit))),
		}
	}

	/// Builds the joint initial state of the qubits in `qubit_order` from the classical state of each qubit.
	/// The first qubit of `qubit_order` is the most significant bit of the resulting indices.
	///
	/// # Arguments
	///
	/// * `initial_states` - The classical state, 0 or 1, of every qubit of the register, indexed by qubit.
	/// * `qubit_order` - The qubits to include, in the order the state should be expressed in.
	///
	/// # Errors
	///
	/// Fails with [SimulatorError::Circuit] if the order is empty or names a qubit outside of the register,
	/// or if an initial state isn't 0 or 1.
	pub fn assemble(initial_states: &[u8], qubit_order: &[usize]) -> Result<Self> {
		let mut qubit_states = Vec::with_capacity(qubit_order.len());
		for &qubit in qubit_order {
			let bit = initial_states.get(qubit).ok_or_else(|| {
				SimulatorError::circuit(format!(
					"qubit {} is outside of the {}-qubit register",
					qubit,
					initial_states.len()
				))
			})?;
			qubit_states.push(Self::classical_qubit(*bit)?);
		}

		let joint = reduce_pairwise(qubit_states, |lhs, rhs| Ok(lhs.kronecker_product(&rhs)))?;
		return joint.ok_or_else(|| SimulatorError::circuit("cannot assemble the state of no qubits"));
	}

	/// Gets the dimension of the state.
	pub fn dimension(&self) -> usize {
		self.0.len()
	}

	/// Computes the kronecker product of a state with `rhs`, `rhs` holding the least significant bits.
	pub fn kronecker_product(&self, rhs: &StateVector) -> StateVector {
		let dim_a = self.dimension();
		let dim_b = rhs.dimension();
		let mut components = vec![Complex::zero(); dim_a * dim_b];

		for i in 0..dim_a {
			for j in 0..dim_b {
				components[i * dim_b + j] = self.0[i] * rhs.0[j];
			}
		}

		return StateVector(components);
	}

	/// Checks whether 2 states are approximately equal given an error threshold.
	///
	/// # Arguments
	///
	/// * `rhs` - The other state to compare with.
	/// * `epsilon` - The margin of error tolerated between 2 elements.
	pub fn approx_eq(&self, rhs: &StateVector, epsilon: f64) -> bool {
		if self.0.len() != rhs.0.len() {
			return false;
		}
		for i in 0..self.0.len() {
			let difference = self.0[i] - rhs.0[i];
			if difference.re().abs() > epsilon || difference.im().abs() > epsilon {
				return false;
			}
		}
		return true;
	}

	/// Probability of measuring each basis state, `|amplitude|^2`, not renormalized.
	pub fn probabilities(&self) -> Vec<f64> {
		self.0.iter().map(|amplitude| amplitude.norm_sqr()).collect()
	}

	/// Computes the most likely outcome when measuring the qubits.
	/// Returns only 1 of them if there are multiple that are as likely as each other.
	pub fn most_likely_outcome(&self) -> Option<usize> {
		self.0
			.iter()
			.enumerate()
			.max_by(|a, b| a.1.norm_sqr().total_cmp(&b.1.norm_sqr()))
			.map(|(i, _)| i)
	}

	/// Gets the components of the state.
	pub fn components(&self) -> &[Complex<f64>] {
		&self.0
	}
}

impl std::ops::Mul<&StateVector> for &ComplexMatrix {
	type Output = StateVector;
	fn mul(self, rhs: &StateVector) -> Self::Output {
		StateVector(self.apply(&rhs.0))
	}
}

impl std::ops::Index<usize> for StateVector {
	type Output = Complex64;

	fn index(&self, index: usize) -> &Self::Output {
		return &self.0[index];
	}
}
