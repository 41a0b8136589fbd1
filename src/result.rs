//! Histograms of measured outcomes.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
	SimulatorError,
	error::Result,
	qubits::{int_from_bit_string, int_to_bit_string},
};

/// Something an outcome can be looked up with: its index, or its bit string.
pub trait OutcomeKey {
	/// Resolves the key into an outcome index of a `sig_bits`-wide register.
	fn to_index(&self, sig_bits: usize) -> Result<usize>;
}

impl OutcomeKey for usize {
	fn to_index(&self, sig_bits: usize) -> Result<usize> {
		if sig_bits < usize::BITS as usize && *self >> sig_bits != 0 {
			return Err(SimulatorError::InvalidKey {
				key: self.to_string(),
				sig_bits,
			});
		}
		return Ok(*self);
	}
}

// Integer literals default to i32, so plain `result.get(7)` resolves here.
macro_rules! impl_outcome_key_for_integer {
	($($integer:ty),*) => {
		$(
			impl OutcomeKey for $integer {
				fn to_index(&self, sig_bits: usize) -> Result<usize> {
					let index = usize::try_from(*self).map_err(|_| SimulatorError::InvalidKey {
						key: self.to_string(),
						sig_bits,
					})?;
					return index.to_index(sig_bits);
				}
			}
		)*
	};
}

impl_outcome_key_for_integer!(u32, u64, i32, i64);

impl OutcomeKey for &str {
	fn to_index(&self, sig_bits: usize) -> Result<usize> {
		int_from_bit_string(self, sig_bits)
	}
}

impl OutcomeKey for String {
	fn to_index(&self, sig_bits: usize) -> Result<usize> {
		int_from_bit_string(self, sig_bits)
	}
}

/// Counts of each outcome measured over the shots of a simulation.
/// Outcomes are indices over the register, qubit 0 being the most significant of `sig_bits` bits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimulationResult {
	counts:   BTreeMap<usize, usize>,
	sig_bits: usize,
}

impl SimulationResult {
	/// Creates a result from a histogram.
	///
	/// # Errors
	///
	/// Fails with [SimulatorError::InvalidKey] if an outcome doesn't fit in `sig_bits` bits.
	pub fn new(counts: BTreeMap<usize, usize>, sig_bits: usize) -> Result<Self> {
		for outcome in counts.keys() {
			outcome.to_index(sig_bits)?;
		}
		return Ok(Self { counts, sig_bits });
	}

	pub fn counts(&self) -> &BTreeMap<usize, usize> {
		&self.counts
	}

	pub fn sig_bits(&self) -> usize {
		self.sig_bits
	}

	/// Number of times an outcome was measured, 0 if it never was.
	///
	/// # Examples
	/// ```
	/// use std::collections::BTreeMap;
	/// use qsampler::SimulationResult;
	/// let result = SimulationResult::new(BTreeMap::from([(0, 20), (7, 34)]), 5).unwrap();
	/// assert_eq!(result.get(7).unwrap(), 34);
	/// assert_eq!(result.get("00111").unwrap(), 34);
	/// assert_eq!(result.get("111").unwrap(), 34);
	/// assert_eq!(result.to_string(), "{'00000': 20, '00111': 34}");
	/// ```
	pub fn get<K: OutcomeKey>(&self, key: K) -> Result<usize> {
		let index = key.to_index(self.sig_bits)?;
		return Ok(self.counts.get(&index).copied().unwrap_or(0));
	}

	/// Total number of shots.
	pub fn total_shots(&self) -> usize {
		self.counts.values().sum()
	}

	/// Fraction of the shots that gave an outcome.
	pub fn probability<K: OutcomeKey>(&self, key: K) -> Result<f64> {
		let total = self.total_shots();
		if total == 0 {
			return Ok(0.0);
		}
		return Ok(self.get(key)? as f64 / total as f64);
	}

	/// The outcome measured the most, the lowest index on ties.
	pub fn most_frequent(&self) -> Option<usize> {
		let mut best: Option<(usize, usize)> = None;
		for (&outcome, &count) in &self.counts {
			match best {
				Some((_, best_count)) if best_count >= count => {}
				_ => best = Some((outcome, count)),
			}
		}
		return best.map(|(outcome, _)| outcome);
	}

	/// Measured outcomes as bit strings with their counts, in increasing outcome order.
	pub fn iter(&self) -> impl Iterator<Item = (String, usize)> + '_ {
		self.counts
			.iter()
			.map(|(&outcome, &count)| (int_to_bit_string(outcome, self.sig_bits), count))
	}
}

impl std::fmt::Display for SimulationResult {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{{")?;
		for (i, (bits, count)) in self.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "'{}': {}", bits, count)?;
		}
		write!(f, "}}")?;
		return Ok(());
	}
}

impl Serialize for SimulationResult {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.counts.len()))?;
		for (bits, count) in self.iter() {
			map.serialize_entry(&bits, &count)?;
		}
		return map.end();
	}
}
