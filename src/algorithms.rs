//! Reference circuits with well known outcomes.

use std::f64::consts::PI;

use num::Complex;

use crate::{ComplexMatrix, Gate, circuit::Circuit};

/// The matrix of the quantum Fourier transform on `nb_qubits` qubits, qubit 0 being the most significant.
pub fn qft_matrix(nb_qubits: u32) -> ComplexMatrix {
	let dimension = 2_usize.pow(nb_qubits);
	let omega = Complex::from_polar(1.0, 2.0 * PI / (dimension as f64));
	let mut matrix = ComplexMatrix::zero(dimension);

	for i in 0..dimension {
		for j in 0..dimension {
			// Exponent reduced modulo the dimension to keep the phase accurate
			let exponent = ((i * j) % dimension) as i32;
			matrix[(i, j)] = omega.powi(exponent) * (1.0 / (dimension as f64).sqrt());
		}
	}

	return matrix;
}

/// The quantum Fourier transform built from Hadamards, controlled phase shifts and swaps.
pub fn qft_circuit(nb_qubits: usize) -> Circuit {
	let mut circuit = Circuit::new(nb_qubits);

	for target in 0..nb_qubits {
		circuit = circuit.then(Gate::h().on(target));

		// Controlled rotations from less significant qubits
		for control in (target + 1)..nb_qubits {
			let distance = control - target;
			let angle = 2.0 * PI / 2f64.powi((distance + 1) as i32);
			circuit = circuit.then(Gate::controlled(&Gate::phase_shift(angle)).on_qubits(vec![control, target]));
		}
	}

	// Reverse qubit order by swapping pairs (i <-> n-1-i)
	for i in 0..(nb_qubits / 2) {
		circuit = circuit.then(Gate::swap().on_qubits(vec![i, nb_qubits - 1 - i]));
	}

	circuit
}

/// Entangles `nb_qubits` qubits into `(|0...0⟩ + |1...1⟩) / √2`, with a chain of CNOTs.
pub fn ghz_circuit(nb_qubits: usize) -> Circuit {
	let mut circuit = Circuit::new(nb_qubits).then(Gate::h().on(0));
	for i in 0..nb_qubits.saturating_sub(1) {
		circuit = circuit.then(Gate::cx().on_qubits(vec![i, i + 1]));
	}
	circuit
}

/// The 2-qubit Bell state `(|00⟩ + |11⟩) / √2`.
pub fn bell_circuit() -> Circuit {
	ghz_circuit(2)
}
