use std::f64::consts::PI;

use num::Complex;
use qsampler::{
	ComplexMatrix, Gate,
	algorithms::{qft_circuit, qft_matrix},
	backend::{Backend, dense_cpu::DenseCPUBackend},
	circuit::Circuit,
	state::StateVector,
};

fn r_k(angle: f64) -> Gate {
	Gate::from(ComplexMatrix::from(&[
		vec![Complex::from(1.0), Complex::from(0.0)],
		vec![Complex::from(0.0), Complex::from_polar(1.0, angle)],
	]))
}

#[test]
fn qft_1_qubit() {
	// QFT with 1 qubit is just H
	let given_circuit = Circuit::new(1).then(Gate::h().on(0));
	let built_circuit = qft_circuit(1);
	let actual_matrix = qft_matrix(1);

	let backend = DenseCPUBackend::default();
	let given_program = backend.compile(given_circuit.gates()).unwrap();
	let built_program = backend.compile(built_circuit.gates()).unwrap();

	assert!(given_program.as_matrix().approx_eq(&actual_matrix, 1e-6));
	assert!(built_program.as_matrix().approx_eq(&actual_matrix, 1e-6));
}

#[test]
fn qft_2_qubit() {
	let backend = DenseCPUBackend::default();
	// 2-qubit QFT:
	// - H on qubit 0
	// - controlled R2 (control qubit 1 -> target qubit 0)
	// - H on qubit 1
	// - swap qubit 0 and 1
	let given_circuit = Circuit::new(2)
		.then(Gate::h().on(0))
		.then(Gate::controlled(&r_k(2.0 * PI / 4.0)).on_qubits(vec![1, 0]))
		.then(Gate::h().on(1))
		.then(Gate::swap().on_qubits(vec![0, 1]));
	let given_program = backend.compile(given_circuit.gates()).unwrap();

	let reference_matrix = qft_matrix(2);
	let built_circuit = qft_circuit(2);
	let built_program = backend.compile(built_circuit.gates()).unwrap();

	dbg!(&built_circuit);
	dbg!(&given_circuit);
	assert!(built_circuit.gates().len() == given_circuit.gates().len());

	let given_matrix = given_program.register_matrix(2).unwrap();
	let built_matrix = built_program.register_matrix(2).unwrap();
	dbg!(&reference_matrix);
	dbg!(&given_matrix);
	assert!(reference_matrix.approx_eq(&given_matrix, 1e-6));
	assert!(reference_matrix.approx_eq(&built_matrix, 1e-6));
}

#[test]
fn qft_3_qubit() {
	let backend = DenseCPUBackend::default();
	// 3-qubit QFT circuit:
	// - H on qubit 0
	// - controlled R2 (1 -> 0)
	// - controlled R3 (2 -> 0)
	// - H on qubit 1
	// - controlled R2 (2 -> 1)
	// - H on qubit 2
	// - swap 0 <-> 2
	let given_circuit = Circuit::new(3)
		.then(Gate::h().on(0))
		.then(Gate::controlled(&r_k(2.0 * PI / 4.0)).on_qubits(vec![1, 0]))
		.then(Gate::controlled(&r_k(2.0 * PI / 8.0)).on_qubits(vec![2, 0]))
		.then(Gate::h().on(1))
		.then(Gate::controlled(&r_k(2.0 * PI / 4.0)).on_qubits(vec![2, 1]))
		.then(Gate::h().on(2))
		.then(Gate::swap().on_qubits(vec![0, 2]));
	let given_program = backend.compile(given_circuit.gates()).unwrap();

	let reference_matrix = qft_matrix(3);
	let built_program = backend.compile(qft_circuit(3).gates()).unwrap();

	let given_matrix = given_program.register_matrix(3).unwrap();
	let built_matrix = built_program.register_matrix(3).unwrap();
	dbg!(&reference_matrix);
	dbg!(&given_matrix);
	assert!(reference_matrix.approx_eq(&given_matrix, 1e-6));
	assert!(reference_matrix.approx_eq(&built_matrix, 1e-6));
}

#[test]
fn qft() {
	let frequency = 5;
	let backend = DenseCPUBackend::default();

	for nb_qubits in 4..=7 {
		let dimension = 2_usize.pow(nb_qubits as u32);

		// Check if circuit and matrix match
		let program = backend.compile(qft_circuit(nb_qubits).gates()).unwrap();
		let circuit_matrix = program.register_matrix(nb_qubits).unwrap();
		let matrix = qft_matrix(nb_qubits as u32);
		assert!(matrix.approx_eq(&circuit_matrix, 1e-6));
		assert!(circuit_matrix.is_unitary(1e-6));

		// Prepare state for a wave with given frequency
		let norm = 1.0 / (dimension as f64).sqrt();
		let mut amplitudes = Vec::with_capacity(dimension);
		for x in 0..dimension {
			let angle = -2.0 * PI * (x as f64) / frequency as f64;
			amplitudes.push(Complex::from_polar(norm, angle));
		}
		let state = StateVector::from_vec(amplitudes);

		// Check if total probability is 1
		let total_prob: f64 = state.probabilities().iter().sum();
		assert!((total_prob - 1.0).abs() < 1e-12);

		// Check if the final state gives the closest frequency
		let final_state = &circuit_matrix * &state;
		let peak = final_state.most_likely_outcome().unwrap();
		let found_frequency = dimension as f64 / peak as f64;
		dbg!(&found_frequency);
		assert!(found_frequency.round_ties_even() == frequency as f64);
	}
}
