//! Qubit orderings: re-expressing operators in another qubit order, and bit-string conversions of basis indices.
//!
//! Everywhere in the crate, the qubit at position 0 of an ordering is the most significant bit of a basis index.
//! With the ordering `[q0, q1, q2]`, the index `0b100` is the basis state where only `q0` is set.

use crate::{ComplexMatrix, SimulatorError, error::Result};

/// Reads the bit of `index` at `position` of a `width`-bit ordering.
pub fn bit_at(index: usize, position: usize, width: usize) -> usize {
	(index >> (width - 1 - position)) & 1
}

/// Builds the basis index whose bit at position `k` is the bit of `index` at position `source_positions[k]`.
///
/// # Arguments
///
/// * `index` - The basis index to read bits from, `source_positions.len()` bits wide.
/// * `source_positions` - For each bit of the result, where to read it from in `index`.
pub fn rearrange_bits(index: usize, source_positions: &[usize]) -> usize {
	let width = source_positions.len();
	let mut result = 0;
	for (position, &source) in source_positions.iter().enumerate() {
		result |= bit_at(index, source, width) << (width - 1 - position);
	}
	return result;
}

/// Checks `new_order` is a permutation of `old_order` and gives, for each qubit of `old_order`, its position in `new_order`.
pub(crate) fn positions_in(old_order: &[usize], new_order: &[usize]) -> Result<Vec<usize>> {
	if old_order.len() != new_order.len() {
		return Err(SimulatorError::invalid_permutation(old_order, new_order));
	}

	let mut positions = Vec::with_capacity(old_order.len());
	for (i, qubit) in old_order.iter().enumerate() {
		if old_order[..i].contains(qubit) {
			return Err(SimulatorError::invalid_permutation(old_order, new_order));
		}
		match new_order.iter().position(|q| q == qubit) {
			Some(position) => positions.push(position),
			None => return Err(SimulatorError::invalid_permutation(old_order, new_order)),
		}
	}
	// Distinct qubits of `old_order` all found in a same-length `new_order` means `new_order` is distinct too.
	return Ok(positions);
}

/// The permutation of basis indices taking an index in `new_order` to the index of the same basis state in `old_order`.
pub fn index_permutation(old_order: &[usize], new_order: &[usize]) -> Result<Vec<usize>> {
	let positions = positions_in(old_order, new_order)?;
	let dimension = 1usize << old_order.len();
	return Ok((0..dimension).map(|i| rearrange_bits(i, &positions)).collect());
}

/// Expresses an operator written in the qubit order `old_order` in the qubit order `new_order`.
///
/// # Arguments
///
/// * `matrix` - The operator, of side `2^k` for `k` qubits.
/// * `old_order` - The qubits the operator is currently expressed in.
/// * `new_order` - A permutation of `old_order`.
///
/// # Errors
///
/// Fails with [SimulatorError::InvalidPermutation] if the orders aren't permutations of the same distinct qubits,
/// and with [SimulatorError::Circuit] if the matrix doesn't have side `2^k`.
///
/// # Examples
/// ```
/// use qsampler::{Gate, qubits::reorder};
/// // A CNOT controlled by qubit 0, re-expressed with qubit 1 first, is controlled by its second qubit.
/// let cx = Gate::cx();
/// let reordered = reorder(cx.as_matrix(), &[0, 1], &[1, 0]).unwrap();
/// assert_eq!(reordered[(1, 3)], cx.as_matrix()[(2, 3)]);
/// ```
pub fn reorder(matrix: &ComplexMatrix, old_order: &[usize], new_order: &[usize]) -> Result<ComplexMatrix> {
	let permutation = index_permutation(old_order, new_order)?;
	if matrix.size_side() != permutation.len() {
		return Err(SimulatorError::circuit(format!(
			"cannot reorder a {}x{} matrix over {} qubits",
			matrix.size_side(),
			matrix.size_side(),
			old_order.len()
		)));
	}
	if old_order == new_order {
		return Ok(matrix.clone());
	}
	return Ok(matrix.permute(&permutation));
}

/// Formats a basis index as a bit string, zero padded to `sig_bits` characters.
pub fn int_to_bit_string(index: usize, sig_bits: usize) -> String {
	format!("{:0width$b}", index, width = sig_bits)
}

/// Parses a bit string, with an optional `0b` prefix, into a basis index.
///
/// # Errors
///
/// Fails with [SimulatorError::InvalidKey] if the string is empty, longer than `sig_bits` or has a character other than `0` or `1`.
pub fn int_from_bit_string(bits: &str, sig_bits: usize) -> Result<usize> {
	let invalid = || SimulatorError::InvalidKey {
		key: bits.to_string(),
		sig_bits,
	};

	let digits = bits.strip_prefix("0b").unwrap_or(bits);
	if digits.is_empty() || digits.len() > sig_bits || digits.len() > usize::BITS as usize {
		return Err(invalid());
	}

	let mut index = 0usize;
	for c in digits.chars() {
		index <<= 1;
		match c {
			'0' => {}
			'1' => index |= 1,
			_ => return Err(invalid()),
		}
	}
	return Ok(index);
}
