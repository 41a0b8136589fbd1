use num::{Complex, One, Zero, complex::ComplexFloat};

/// Dense square matrix of complex numbers, the representation of every gate and composite operator.
#[derive(Clone, PartialEq, Default)]
pub struct ComplexMatrix {
	values:    Vec<Complex<f64>>,
	size_side: usize,
}

impl std::fmt::Debug for ComplexMatrix {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f)?;
		for i in 0..self.size_side {
			for j in 0..self.size_side {
				write!(f, "{}+{}i ", self[(i, j)].re(), self[(i, j)].im())?;
			}
			writeln!(f)?;
		}
		return Ok(());
	}
}

impl ComplexMatrix {
	pub fn zero(size_side: usize) -> Self {
		Self {
			values: vec![Complex::zero(); size_side * size_side],
			size_side,
		}
	}

	/// Builds a matrix from its rows.
	///
	/// # Panics
	///
	/// Panics if the rows don't all have as many elements as there are rows.
	pub fn from(values: &[Vec<Complex<f64>>]) -> Self {
		let size_side = values.len();
		for row in values {
			assert!(row.len() == size_side);
		}

		let mut result = ComplexMatrix::zero(size_side);
		for i in 0..size_side {
			for j in 0..size_side {
				result[(i, j)] = values[i][j];
			}
		}

		return result;
	}

	/// Builds a matrix from rows of real numbers.
	pub fn from_real(values: &[Vec<f64>]) -> Self {
		let rows: Vec<Vec<Complex<f64>>> = values
			.iter()
			.map(|row| row.iter().map(|x| Complex::from(*x)).collect())
			.collect();
		return Self::from(&rows);
	}

	pub fn size_side(&self) -> usize {
		self.size_side
	}

	/// The number of qubits the matrix acts on, if its side is a power of 2.
	pub fn nb_qubits(&self) -> Option<usize> {
		if self.size_side.is_power_of_two() {
			return Some(self.size_side.trailing_zeros() as usize);
		}
		return None;
	}

	pub fn identity(size_side: usize) -> Self {
		let mut result = ComplexMatrix::zero(size_side);

		for i in 0..size_side {
			result[(i, i)] = Complex::one();
		}

		return result;
	}
}

impl std::ops::Index<(usize, usize)> for ComplexMatrix {
	type Output = Complex<f64>;
	fn index(&self, index: (usize, usize)) -> &Self::Output {
		return &self.values[index.1 * self.size_side + index.0];
	}
}

impl std::ops::IndexMut<(usize, usize)> for ComplexMatrix {
	fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
		return &mut self.values[index.1 * self.size_side + index.0];
	}
}

impl<'a, 'b> std::ops::Mul<&'b ComplexMatrix> for &'a ComplexMatrix {
	type Output = ComplexMatrix;

	fn mul(self, rhs: &'b ComplexMatrix) -> Self::Output {
		assert!(rhs.size_side == self.size_side);

		let mut result = ComplexMatrix::zero(self.size_side);
		for i in 0..self.size_side {
			for k in 0..self.size_side {
				let lhs_ik = self[(i, k)];
				if lhs_ik.is_zero() {
					continue;
				}
				for j in 0..self.size_side {
					result[(i, j)] += lhs_ik * rhs[(k, j)];
				}
			}
		}
		return result;
	}
}

impl std::ops::MulAssign<Complex<f64>> for ComplexMatrix {
	fn mul_assign(&mut self, rhs: Complex<f64>) {
		for value in self.values.iter_mut() {
			*value *= rhs;
		}
	}
}

impl std::ops::Mul<Complex<f64>> for ComplexMatrix {
	type Output = ComplexMatrix;

	fn mul(self, rhs: Complex<f64>) -> Self::Output {
		let mut result = self;
		result *= rhs;
		return result;
	}
}

impl ComplexMatrix {
	pub fn transpose(&self) -> Self {
		let mut result = Self::zero(self.size_side);

		for i in 0..self.size_side {
			for j in 0..self.size_side {
				result[(i, j)] = self[(j, i)];
			}
		}

		return result;
	}

	/// Element-wise complex conjugate.
	pub fn conjugate(&self) -> Self {
		Self {
			values:    self.values.iter().map(|z| z.conj()).collect(),
			size_side: self.size_side,
		}
	}

	/// Conjugate transpose, M†.
	pub fn adjoint(&self) -> Self {
		return self.conjugate().transpose();
	}

	pub fn kronecker_product(&self, rhs: &Self) -> Self {
		let mut result = ComplexMatrix::zero(self.size_side() * rhs.size_side());
		for i in 0..self.size_side() {
			for j in 0..self.size_side() {
				let lhs_ij = self[(i, j)];
				if lhs_ij.is_zero() {
					continue;
				}
				for k in 0..rhs.size_side() {
					for l in 0..rhs.size_side() {
						result[(i * rhs.size_side() + k, j * rhs.size_side() + l)] = lhs_ij * rhs[(k, l)];
					}
				}
			}
		}
		return result;
	}

	/// Permutes both rows and columns: `result[(i, j)] = self[(permutation[i], permutation[j])]`.
	///
	/// # Panics
	///
	/// Panics if `permutation` doesn't have exactly one entry per row.
	pub fn permute(&self, permutation: &[usize]) -> Self {
		assert!(permutation.len() == self.size_side);

		let mut result = Self::zero(self.size_side);
		for (i, &from_row) in permutation.iter().enumerate() {
			for (j, &from_col) in permutation.iter().enumerate() {
				result[(i, j)] = self[(from_row, from_col)];
			}
		}
		return result;
	}

	/// Multiplies the matrix with a column vector.
	///
	/// # Panics
	///
	/// Panics if the vector's length isn't the side of the matrix.
	pub fn apply(&self, vector: &[Complex<f64>]) -> Vec<Complex<f64>> {
		assert!(vector.len() == self.size_side);

		let mut result = vec![Complex::zero(); self.size_side];
		for j in 0..self.size_side {
			let vector_j = vector[j];
			if vector_j.is_zero() {
				continue;
			}
			for i in 0..self.size_side {
				result[i] += self[(i, j)] * vector_j;
			}
		}
		return result;
	}

	pub fn approx_eq(&self, rhs: &Self, epsilon: f64) -> bool {
		if self.size_side() != rhs.size_side() {
			return false;
		}

		for (lhs, rhs) in self.values.iter().zip(rhs.values.iter()) {
			let difference = lhs - rhs;
			if difference.re().abs() > epsilon || difference.im().abs() > epsilon {
				return false;
			}
		}
		return true;
	}

	/// Checks `M · M† ≈ I` within `epsilon` on every element.
	pub fn is_unitary(&self, epsilon: f64) -> bool {
		let product = self * &self.adjoint();
		return product.approx_eq(&Self::identity(self.size_side), epsilon);
	}

	/// Exact bit patterns of the elements, row by row, used to key memoized compositions.
	pub(crate) fn bit_pattern(&self) -> Vec<(u64, u64)> {
		let mut bits = Vec::with_capacity(self.values.len());
		for i in 0..self.size_side {
			for j in 0..self.size_side {
				let z = self[(i, j)];
				bits.push((z.re.to_bits(), z.im.to_bits()));
			}
		}
		return bits;
	}
}
