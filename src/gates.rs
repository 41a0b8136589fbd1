//! Quantum gates, and the descriptors binding them to the qubits of a [circuit](crate::circuit).

use num::Complex;

use crate::{ComplexMatrix, SimulatorError, error::Result};

/// A quantum gate, represented as a [complex matrix](crate::complex_matrix).
/// The number of qubits it's applied on is the logarithm-2 of the the size of the side of the matrix, i.e. for `n` qubits, the matrix will have shape `2^n * 2^n`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gate {
	/// The operation associated with the gate.
	pub(crate) op: ComplexMatrix,
}

impl Gate {
	/// Creates a gate from the specified matrix.
	///
	/// # Arguments
	///
	/// * `op` - The operation of the gate to apply
	pub fn from(op: ComplexMatrix) -> Self {
		Self { op }
	}

	/// Gets the matrix of the gate.
	pub fn as_matrix(&self) -> &ComplexMatrix {
		&self.op
	}

	/// Creates a gate which does nothing on a single qubit.
	pub fn none() -> Self {
		Self::from(ComplexMatrix::identity(2))
	}

	/// Creates an X-gate on a single qubit.
	pub fn x() -> Self {
		Self::from(ComplexMatrix::from_real(&[vec![0.0, 1.0], vec![1.0, 0.0]]))
	}

	/// Creates a Z-gate on a single qubit.
	pub fn z() -> Self {
		Self::from(ComplexMatrix::from_real(&[vec![1.0, 0.0], vec![0.0, -1.0]]))
	}

	/// Creates a Y-gate on a single qubit.
	pub fn y() -> Self {
		Self::from(ComplexMatrix::from(&[
			vec![Complex::from(0.0), -Complex::i()],
			vec![Complex::i(), Complex::from(0.0)],
		]))
	}

	/// Creates an H or Hadamard gate on a single qubit.
	pub fn h() -> Self {
		Self::from(
			ComplexMatrix::from_real(&[vec![1.0, 1.0], vec![1.0, -1.0]]) * Complex::from(1.0 / 2.0f64.sqrt()),
		)
	}

	/// Creates a swap gate on 2 qubits.
	pub fn swap() -> Self {
		let mut op = ComplexMatrix::zero(4);
		op[(0, 0)] = Complex::from(1.0);
		op[(1, 2)] = Complex::from(1.0);
		op[(2, 1)] = Complex::from(1.0);
		op[(3, 3)] = Complex::from(1.0);
		return Self::from(op);
	}

	/// Creates a rotation on x or Rx-gate on a single qubit.
	///
	/// # Arguments
	///
	/// * `angle` - The angle to rotate around the x-axis.
	pub fn rx(angle: f64) -> Self {
		let half_theta = angle / 2.0;
		let cos_half_theta = Complex::from(half_theta.cos());
		let minus_i_sin_half_theta = -Complex::<f64>::i() * Complex::from(half_theta.sin());

		Self::from(ComplexMatrix::from(&[
			vec![cos_half_theta, minus_i_sin_half_theta],
			vec![minus_i_sin_half_theta, cos_half_theta],
		]))
	}

	/// Creates a rotation on y or Ry-gate on a single qubit.
	///
	/// # Arguments
	///
	/// * `angle` - The angle to rotate around the y-axis.
	pub fn ry(angle: f64) -> Self {
		let half_theta = angle / 2.0;
		Self::from(ComplexMatrix::from_real(&[
			vec![half_theta.cos(), -half_theta.sin()],
			vec![half_theta.sin(), half_theta.cos()],
		]))
	}

	/// Creates a rotation on z or Rz-gate on a single qubit.
	///
	/// # Arguments
	///
	/// * `angle` - The angle to rotate around the z-axis.
	pub fn rz(angle: f64) -> Self {
		let half_theta = angle / 2.0;
		let exp_minus_i_half_theta = Complex::<f64>::from_polar(1.0, -half_theta);
		let exp_i_half_theta = Complex::<f64>::from_polar(1.0, half_theta);

		Self::from(ComplexMatrix::from(&[
			vec![exp_minus_i_half_theta, Complex::from(0.0)],
			vec![Complex::from(0.0), exp_i_half_theta],
		]))
	}

	/// Creates a phase shift gate on a single qubit.
	///
	/// # Arguments
	///
	/// * `angle` - The angle with which to shift the phase.
	pub fn phase_shift(angle: f64) -> Self {
		let exp_i_phi: Complex<f64> = Complex::<f64>::from_polar(1.0, angle);

		Self::from(ComplexMatrix::from(&[
			vec![Complex::from(1.0), Complex::from(0.0)],
			vec![Complex::from(0.0), exp_i_phi],
		]))
	}

	/// Creates an S-gate on a single qubit.
	pub fn s() -> Self {
		Self::from(ComplexMatrix::from(&[
			vec![Complex::from(1.0), Complex::from(0.0)],
			vec![Complex::from(0.0), Complex::i()],
		]))
	}

	/// Creates a T-gate on a single qubit.
	pub fn t() -> Self {
		Self::phase_shift(std::f64::consts::PI / 4.0)
	}

	/// Computes the controlled version of a gate.
	/// The control is the first qubit of the resulting gate, the original gate acts on the following ones.
	pub fn controlled(gate: &Gate) -> Gate {
		let inner_side = gate.op.size_side();
		let size_side = inner_side * 2;
		let mut op = ComplexMatrix::identity(size_side);

		for i in inner_side..size_side {
			for j in inner_side..size_side {
				op[(i, j)] = gate.op[(i - inner_side, j - inner_side)];
			}
		}

		return Gate::from(op);
	}

	/// Creates a CNOT gate, controlled by its first qubit.
	pub fn cx() -> Self {
		Self::controlled(&Self::x())
	}

	/// Creates a controlled Hadamard gate.
	pub fn ch() -> Self {
		Self::controlled(&Self::h())
	}

	/// Creates a controlled Rz-gate.
	pub fn crz(angle: f64) -> Self {
		Self::controlled(&Self::rz(angle))
	}

	/// Creates a Toffoli gate, the X acts on the third qubit if both first ones are set.
	pub fn ccnot() -> Self {
		Self::controlled(&Self::cx())
	}

	/// The number of qubits the gate acts on, if its matrix is shaped like an operator on qubits.
	pub fn nb_qubits(&self) -> Option<usize> {
		self.op.nb_qubits()
	}

	/// Applies the gate on the specified qubit.
	///
	/// # Arguments
	///
	/// * `qubit` - The index of the qubit to apply the gate on.
	pub fn on(self, qubit: usize) -> GateDescriptor {
		self.on_qubits(vec![qubit])
	}

	/// Applies the gate on the specified qubits.
	/// The first qubit in `qubits` is the most significant one in the gate's matrix.
	///
	/// # Arguments
	///
	/// * `qubits` - The indices of the qubits to apply the gate on.
	pub fn on_qubits(self, qubits: Vec<usize>) -> GateDescriptor {
		GateDescriptor {
			qubits,
			matrix: self.op,
			order: 0,
		}
	}
}

/// A gate bound to the qubits it acts on, as consumed by the [composition engine](crate::composition).
/// Composites produced by merging descriptors have the same shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GateDescriptor {
	/// The qubits the matrix acts on, position 0 being the most significant bit of the matrix's indices.
	pub(crate) qubits: Vec<usize>,
	/// The `2^k * 2^k` operator for `k` qubits.
	pub(crate) matrix: ComplexMatrix,
	/// Position in the circuit, used to keep merges in application order.
	pub(crate) order:  usize,
}

impl GateDescriptor {
	/// Creates a descriptor, checking it is well formed.
	///
	/// # Errors
	///
	/// Fails with [SimulatorError::Circuit] if the qubits contain duplicates, or if the matrix isn't `2^k * 2^k` for `k` qubits.
	pub fn new(qubits: Vec<usize>, matrix: ComplexMatrix) -> Result<Self> {
		let descriptor = Self {
			qubits,
			matrix,
			order: 0,
		};
		descriptor.validate()?;
		return Ok(descriptor);
	}

	/// Sets the position of the gate in its circuit.
	pub fn with_order(self, order: usize) -> Self {
		Self { order, ..self }
	}

	pub fn qubits(&self) -> &[usize] {
		&self.qubits
	}

	pub fn matrix(&self) -> &ComplexMatrix {
		&self.matrix
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Checks the qubits are distinct and non-empty, and the matrix has the matching dimension.
	pub fn validate(&self) -> Result<()> {
		if self.qubits.is_empty() {
			return Err(SimulatorError::circuit("gate is not applied on any qubit"));
		}
		for (i, qubit) in self.qubits.iter().enumerate() {
			if self.qubits[..i].contains(qubit) {
				return Err(SimulatorError::circuit(format!(
					"qubit {} appears twice in gate on {:?}",
					qubit, self.qubits
				)));
			}
		}
		let expected_side = 1usize
			.checked_shl(self.qubits.len() as u32)
			.ok_or_else(|| SimulatorError::circuit(format!("gate on {} qubits is too large", self.qubits.len())))?;
		if self.matrix.size_side() != expected_side {
			return Err(SimulatorError::circuit(format!(
				"gate on qubits {:?} needs a {}x{} matrix, got {}x{}",
				self.qubits,
				expected_side,
				expected_side,
				self.matrix.size_side(),
				self.matrix.size_side()
			)));
		}
		return Ok(());
	}
}
