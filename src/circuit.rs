use crate::{GateDescriptor, SimulatorError, error::Result};

/// A register of qubits in classical initial states, and the gates to apply on them, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circuit {
	initial_states: Vec<u8>,
	steps:          Vec<GateDescriptor>,
}

impl Circuit {
	/// Creates a circuit on `nb_qubits` qubits, all initially `|0⟩`.
	pub fn new(nb_qubits: usize) -> Self {
		Self {
			initial_states: vec![0; nb_qubits],
			steps:          Vec::new(),
		}
	}

	/// Sets the classical initial state of a qubit.
	///
	/// # Errors
	///
	/// Fails with [SimulatorError::Circuit] if the qubit isn't in the register or the state isn't 0 or 1.
	pub fn with_initial_state(self, qubit: usize, bit: u8) -> Result<Self> {
		if bit > 1 {
			return Err(SimulatorError::circuit(format!("initial qubit state must be 0 or 1, got {}", bit)));
		}
		if qubit >= self.initial_states.len() {
			return Err(SimulatorError::circuit(format!(
				"qubit {} is outside of the {}-qubit register",
				qubit,
				self.initial_states.len()
			)));
		}
		let mut new_circuit = self;
		new_circuit.initial_states[qubit] = bit;
		return Ok(new_circuit);
	}

	/// Appends a gate to the circuit, applied after every gate already in it.
	/// See [Circuit::try_then] for a non-panicking version.
	///
	/// # Panics
	///
	/// Panics if the gate acts on a qubit outside of the register.
	pub fn then(self, gate: GateDescriptor) -> Self {
		for qubit in gate.qubits() {
			assert!(
				*qubit < self.initial_states.len(),
				"qubit {} is outside of the {}-qubit register",
				qubit,
				self.initial_states.len()
			);
		}
		return self.push(gate);
	}

	/// Appends a gate to the circuit, applied after every gate already in it.
	///
	/// # Errors
	///
	/// Fails with [SimulatorError::Circuit] if the gate acts on a qubit outside of the register.
	pub fn try_then(self, gate: GateDescriptor) -> Result<Self> {
		if let Some(qubit) = gate.qubits().iter().find(|q| **q >= self.initial_states.len()) {
			return Err(SimulatorError::circuit(format!(
				"qubit {} is outside of the {}-qubit register",
				qubit,
				self.initial_states.len()
			)));
		}
		return Ok(self.push(gate));
	}

	fn push(self, gate: GateDescriptor) -> Self {
		let order = self.steps.len();
		let mut new_circuit = self;
		new_circuit.steps.push(gate.with_order(order));
		return new_circuit;
	}

	pub fn nb_qubits(&self) -> usize {
		self.initial_states.len()
	}

	pub fn initial_states(&self) -> &[u8] {
		&self.initial_states
	}

	pub fn gates(&self) -> &[GateDescriptor] {
		&self.steps
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Gate;

	#[test]
	fn test_then_assigns_orders() {
		let circuit = Circuit::new(2).then(Gate::h().on(0)).then(Gate::cx().on_qubits(vec![0, 1]));
		let orders: Vec<usize> = circuit.gates().iter().map(|g| g.order()).collect();
		assert_eq!(orders, vec![0, 1]);
	}

	#[test]
	fn test_initial_states() {
		let circuit = Circuit::new(3).with_initial_state(2, 1).unwrap();
		assert_eq!(circuit.initial_states(), &[0, 0, 1]);
		assert!(Circuit::new(3).with_initial_state(3, 1).is_err());
		assert!(Circuit::new(3).with_initial_state(0, 2).is_err());
	}

	#[test]
	fn test_try_then_rejects_qubit_outside_register() {
		let circuit = Circuit::new(2).try_then(Gate::cx().on_qubits(vec![0, 1])).unwrap();
		assert_eq!(circuit.gates().len(), 1);
		assert!(matches!(circuit.try_then(Gate::x().on(2)), Err(SimulatorError::Circuit(_))));

		let circuit = Circuit::new(1).try_then(Gate::h().on(0)).unwrap().try_then(Gate::x().on(0)).unwrap();
		let orders: Vec<usize> = circuit.gates().iter().map(|g| g.order()).collect();
		assert_eq!(orders, vec![0, 1]);
	}

	#[test]
	#[should_panic]
	fn test_then_rejects_qubit_outside_register() {
		let _ = Circuit::new(1).then(Gate::x().on(1));
	}
}
