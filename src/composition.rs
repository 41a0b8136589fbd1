//! Fusion of a sequence of gates, each acting on its own qubits, into a single operator on all of them.
//!
//! Gates are merged pairwise in passes over a queue: every pass merges neighbours `(0, 1), (2, 3), ...`
//! and carries an odd one out to the end of the next pass, so the queue always stays in application order.
//! A pass takes the queue from `n` to `ceil(n / 2)` descriptors, until a single one is left.

use std::collections::VecDeque;

use tracing::trace;

use crate::{ComplexMatrix, GateDescriptor, SimulatorError, error::Result, qubits::reorder};

/// How two descriptors get merged, depending on how their qubits relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
	/// Both act on the same qubits, possibly in a different order: matrix product.
	Sequential,
	/// No qubit in common: kronecker product.
	Tensor,
	/// Some qubits in common: both get padded with identities to the union of the qubits, then multiplied.
	Overlap,
}

impl MergeKind {
	/// Classifies how 2 sets of distinct qubits relate.
	pub fn classify(left: &[usize], right: &[usize]) -> Self {
		let nb_shared = left.iter().filter(|q| right.contains(q)).count();
		if nb_shared == 0 {
			return MergeKind::Tensor;
		}
		if nb_shared == left.len() && nb_shared == right.len() {
			return MergeKind::Sequential;
		}
		return MergeKind::Overlap;
	}
}

/// Reduces items by merging neighbours, pass after pass, until at most one is left.
/// The odd item of a pass is moved to the end of the next one.
pub(crate) fn reduce_pairwise<T, F>(items: Vec<T>, mut merge: F) -> Result<Option<T>>
where
	F: FnMut(T, T) -> Result<T>,
{
	let mut to_merge: VecDeque<T> = items.into();
	while to_merge.len() > 1 {
		let mut merged = VecDeque::with_capacity(to_merge.len().div_ceil(2));
		while let Some(left) = to_merge.pop_front() {
			match to_merge.pop_front() {
				Some(right) => merged.push_back(merge(left, right)?),
				None => merged.push_back(left),
			}
		}
		to_merge = merged;
	}
	return Ok(to_merge.pop_front());
}

/// Merges 2 descriptors into one acting as applying `left` then `right`.
/// If `right` comes before `left` in the circuit, they are swapped first.
///
/// The composite acts on:
/// * [MergeKind::Sequential]: `left`'s qubits, in `left`'s order.
/// * [MergeKind::Tensor]: `left`'s qubits followed by `right`'s.
/// * [MergeKind::Overlap]: `left`-only qubits, then shared qubits in `left`'s order, then `right`-only qubits.
///
/// The composite's `order` is the earliest of both.
pub fn merge(left: GateDescriptor, right: GateDescriptor) -> Result<GateDescriptor> {
	let (left, right) = if right.order < left.order {
		(right, left)
	}
	else {
		(left, right)
	};
	let order = left.order;

	let kind = MergeKind::classify(&left.qubits, &right.qubits);
	trace!(?kind, left = ?left.qubits, right = ?right.qubits, "merging gates");

	match kind {
		MergeKind::Sequential => {
			let right_matrix = reorder(&right.matrix, &right.qubits, &left.qubits)?;
			let matrix = &right_matrix * &left.matrix;
			return Ok(GateDescriptor {
				qubits: left.qubits,
				matrix,
				order,
			});
		}
		MergeKind::Tensor => {
			let matrix = left.matrix.kronecker_product(&right.matrix);
			let mut qubits = left.qubits;
			qubits.extend_from_slice(&right.qubits);
			return Ok(GateDescriptor { qubits, matrix, order });
		}
		MergeKind::Overlap => {
			let shared: Vec<usize> = left.qubits.iter().copied().filter(|q| right.qubits.contains(q)).collect();
			let left_only: Vec<usize> = left.qubits.iter().copied().filter(|q| !shared.contains(q)).collect();
			let right_only: Vec<usize> = right.qubits.iter().copied().filter(|q| !shared.contains(q)).collect();

			// Left gate: shared qubits on its right side, identity on the qubits only the right gate has.
			let left_order: Vec<usize> = left_only.iter().chain(shared.iter()).copied().collect();
			let mut left_matrix = reorder(&left.matrix, &left.qubits, &left_order)?;
			if !right_only.is_empty() {
				left_matrix = left_matrix.kronecker_product(&ComplexMatrix::identity(1 << right_only.len()));
			}

			// Right gate: shared qubits on its left side, identity on the qubits only the left gate has.
			let right_order: Vec<usize> = shared.iter().chain(right_only.iter()).copied().collect();
			let mut right_matrix = reorder(&right.matrix, &right.qubits, &right_order)?;
			if !left_only.is_empty() {
				right_matrix = ComplexMatrix::identity(1 << left_only.len()).kronecker_product(&right_matrix);
			}

			let qubits: Vec<usize> = left_order.into_iter().chain(right_only).collect();
			let matrix = &right_matrix * &left_matrix;
			return Ok(GateDescriptor { qubits, matrix, order });
		}
	}
}

/// Combines a sequence of gates, in application order, into a single descriptor acting on the union of their qubits.
///
/// # Errors
///
/// Fails with [SimulatorError::Circuit] if the sequence is empty or a descriptor is malformed.
pub fn combine(gates: &[GateDescriptor]) -> Result<GateDescriptor> {
	if gates.is_empty() {
		return Err(SimulatorError::circuit("cannot combine an empty sequence of gates"));
	}
	for gate in gates {
		gate.validate()?;
	}

	let composite = reduce_pairwise(gates.to_vec(), merge)?;
	return composite.ok_or_else(|| SimulatorError::circuit("cannot combine an empty sequence of gates"));
}

/// Number of distinct qubits touched by a sequence of gates.
pub fn nb_distinct_qubits(gates: &[GateDescriptor]) -> usize {
	let mut qubits: Vec<usize> = gates.iter().flat_map(|gate| gate.qubits.iter().copied()).collect();
	qubits.sort_unstable();
	qubits.dedup();
	return qubits.len();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Gate;

	#[test]
	fn test_classify() {
		assert_eq!(MergeKind::classify(&[0, 1], &[1, 0]), MergeKind::Sequential);
		assert_eq!(MergeKind::classify(&[0, 1], &[2]), MergeKind::Tensor);
		assert_eq!(MergeKind::classify(&[0, 1], &[1, 2]), MergeKind::Overlap);
		assert_eq!(MergeKind::classify(&[0], &[0, 1]), MergeKind::Overlap);
	}

	#[test]
	fn test_reduce_pairwise_keeps_order() {
		let items: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
		let reduced = reduce_pairwise(items, |l, r| Ok(format!("({}{})", l, r))).unwrap();
		assert_eq!(reduced.as_deref(), Some("(((ab)(cd))e)"));

		let reduced = reduce_pairwise(Vec::<String>::new(), |l, r| Ok(l + &r)).unwrap();
		assert_eq!(reduced, None);
	}

	#[test]
	fn test_merge_swaps_out_of_order_gates() {
		// X then H on the same qubit is not H then X
		let x = Gate::x().on(0).with_order(0);
		let h = Gate::h().on(0).with_order(1);
		let forward = merge(x.clone(), h.clone()).unwrap();
		let backward = merge(h.clone(), x.clone()).unwrap();
		assert!(forward.matrix.approx_eq(&backward.matrix, 1e-12));

		let expected = Gate::h().as_matrix() * Gate::x().as_matrix();
		assert!(forward.matrix.approx_eq(&expected, 1e-12));
		assert_eq!(forward.order, 0);
	}

	#[test]
	fn test_tensor_merge_concatenates_qubits() {
		let merged = merge(Gate::x().on(3), Gate::h().on(1)).unwrap();
		assert_eq!(merged.qubits, vec![3, 1]);
		let expected = Gate::x().as_matrix().kronecker_product(Gate::h().as_matrix());
		assert!(merged.matrix.approx_eq(&expected, 1e-12));
	}

	#[test]
	fn test_overlap_merge_qubit_order() {
		let left = Gate::cx().on_qubits(vec![2, 0]).with_order(0);
		let right = Gate::cx().on_qubits(vec![0, 5]).with_order(1);
		let merged = merge(left, right).unwrap();
		assert_eq!(merged.qubits, vec![2, 0, 5]);
		assert!(merged.matrix.is_unitary(1e-9));
	}

	#[test]
	fn test_combine_rejects_bad_input() {
		assert!(matches!(combine(&[]), Err(SimulatorError::Circuit(_))));
		assert!(matches!(combine(&[Gate::swap().on(0)]), Err(SimulatorError::Circuit(_))));
	}

	#[test]
	fn test_nb_distinct_qubits() {
		let gates = vec![Gate::cx().on_qubits(vec![0, 3]), Gate::h().on(3), Gate::x().on(1)];
		assert_eq!(nb_distinct_qubits(&gates), 3);
	}
}
