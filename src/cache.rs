//! Bounded memo of composed gate sequences.
//!
//! Entries are pure functions of their key, so eviction only ever costs a recomputation.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use crate::{GateDescriptor, error::Result};

/// Default number of gate sequences kept by a [CompositionCache].
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Exact identity of a gate sequence: qubits, order and the bit patterns of every matrix element, in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositionKey(Vec<(Vec<usize>, usize, Vec<(u64, u64)>)>);

impl CompositionKey {
	pub fn new(gates: &[GateDescriptor]) -> Self {
		Self(
			gates
				.iter()
				.map(|gate| (gate.qubits.clone(), gate.order, gate.matrix.bit_pattern()))
				.collect(),
		)
	}
}

/// Hit/miss counters of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
	pub hits:      u64,
	pub misses:    u64,
	pub evictions: u64,
}

/// Least-recently-used map from gate sequences to their composite.
#[derive(Debug, Clone)]
pub struct CompositionCache {
	capacity: usize,
	entries:  HashMap<CompositionKey, GateDescriptor>,
	/// Least recently used first.
	lru:      VecDeque<CompositionKey>,
	stats:    CacheStats,
}

impl Default for CompositionCache {
	fn default() -> Self {
		Self::new(DEFAULT_CACHE_CAPACITY)
	}
}

impl CompositionCache {
	/// Creates a cache holding up to `capacity` sequences. A capacity of 0 disables caching.
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			entries: HashMap::with_capacity(capacity),
			lru: VecDeque::with_capacity(capacity),
			stats: CacheStats::default(),
		}
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn stats(&self) -> CacheStats {
		self.stats
	}

	/// Looks up a sequence, marking it as the most recently used.
	pub fn get(&mut self, key: &CompositionKey) -> Option<GateDescriptor> {
		let composite = self.entries.get(key).cloned();
		match composite {
			Some(composite) => {
				self.stats.hits += 1;
				self.touch(key);
				trace!(len = self.entries.len(), "composition cache hit");
				Some(composite)
			}
			None => {
				self.stats.misses += 1;
				None
			}
		}
	}

	/// Stores the composite of a sequence, evicting the least recently used one if full.
	pub fn insert(&mut self, key: CompositionKey, composite: GateDescriptor) {
		if self.capacity == 0 {
			return;
		}
		if self.entries.insert(key.clone(), composite).is_some() {
			self.touch(&key);
			return;
		}
		self.lru.push_back(key);
		while self.entries.len() > self.capacity {
			match self.lru.pop_front() {
				Some(oldest) => {
					self.entries.remove(&oldest);
					self.stats.evictions += 1;
					debug!(capacity = self.capacity, "evicted composition from cache");
				}
				None => break,
			}
		}
	}

	/// Returns the cached composite of `gates`, or computes and stores it.
	pub fn get_or_try_insert_with<F>(&mut self, gates: &[GateDescriptor], compute: F) -> Result<GateDescriptor>
	where
		F: FnOnce() -> Result<GateDescriptor>,
	{
		let key = CompositionKey::new(gates);
		if let Some(composite) = self.get(&key) {
			return Ok(composite);
		}
		let composite = compute()?;
		self.insert(key, composite.clone());
		return Ok(composite);
	}

	pub fn clear(&mut self) {
		self.entries.clear();
		self.lru.clear();
	}

	fn touch(&mut self, key: &CompositionKey) {
		if let Some(position) = self.lru.iter().position(|k| k == key) {
			if let Some(key) = self.lru.remove(position) {
				self.lru.push_back(key);
			}
		}
	}
}
