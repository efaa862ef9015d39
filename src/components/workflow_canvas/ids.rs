use super::types::{EdgeId, NodeId};

/// Produces `node-<millis>-<suffix>` / `edge-<millis>-<suffix>` identifiers.
///
/// The suffix comes from a splitmix64 stream seeded from the platform's
/// entropy, so two generators created in the same millisecond still diverge.
/// Callers pass a `taken` predicate; a colliding candidate is skipped.
#[derive(Clone, Debug)]
pub struct IdGenerator {
	state: u64,
}

const SUFFIX_LEN: usize = 9;

impl IdGenerator {
	pub fn new() -> Self {
		Self::with_seed(entropy())
	}

	pub fn with_seed(seed: u64) -> Self {
		Self { state: seed }
	}

	pub fn node_id(&mut self, taken: impl Fn(&NodeId) -> bool) -> NodeId {
		loop {
			let id = NodeId::new(self.candidate("node"));
			if !taken(&id) {
				return id;
			}
		}
	}

	pub fn edge_id(&mut self, taken: impl Fn(&EdgeId) -> bool) -> EdgeId {
		loop {
			let id = EdgeId::new(self.candidate("edge"));
			if !taken(&id) {
				return id;
			}
		}
	}

	fn candidate(&mut self, prefix: &str) -> String {
		format!("{prefix}-{}-{}", now_millis(), self.suffix())
	}

	fn suffix(&mut self) -> String {
		const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
		let mut bits = self.next_u64();
		(0..SUFFIX_LEN)
			.map(|_| {
				let c = ALPHABET[(bits % 36) as usize] as char;
				bits /= 36;
				c
			})
			.collect()
	}

	fn next_u64(&mut self) -> u64 {
		self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
		let mut z = self.state;
		z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
		z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
		z ^ (z >> 31)
	}
}

impl Default for IdGenerator {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(target_arch = "wasm32")]
fn now_millis() -> u64 {
	js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> u64 {
	use std::time::{SystemTime, UNIX_EPOCH};
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_millis() as u64)
		.unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn entropy() -> u64 {
	let random = (js_sys::Math::random() * u32::MAX as f64) as u64;
	(random << 32) ^ now_millis()
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy() -> u64 {
	use std::collections::hash_map::RandomState;
	use std::hash::{BuildHasher, Hasher};
	let mut hasher = RandomState::new().build_hasher();
	hasher.write_u64(now_millis());
	hasher.finish()
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn ids_carry_prefix_timestamp_and_suffix() {
		let mut ids = IdGenerator::with_seed(7);
		let id = ids.node_id(|_| false);
		let parts: Vec<&str> = id.as_str().split('-').collect();
		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0], "node");
		assert!(parts[1].parse::<u64>().is_ok());
		assert_eq!(parts[2].len(), SUFFIX_LEN);
		assert!(ids.edge_id(|_| false).as_str().starts_with("edge-"));
	}

	#[test]
	fn taken_ids_are_skipped() {
		let mut ids = IdGenerator::with_seed(1);
		let rejected = std::cell::RefCell::new(Vec::new());
		let id = ids.node_id(|candidate| {
			let mut rejected = rejected.borrow_mut();
			if rejected.len() < 3 {
				rejected.push(candidate.clone());
				true
			} else {
				false
			}
		});
		let rejected = rejected.into_inner();
		assert_eq!(rejected.len(), 3);
		assert!(!rejected.contains(&id));
	}

	#[test]
	fn a_thousand_ids_in_one_millisecond_do_not_collide() {
		let mut ids = IdGenerator::with_seed(42);
		let seen: HashSet<NodeId> = (0..1000).map(|_| ids.node_id(|_| false)).collect();
		assert_eq!(seen.len(), 1000);
	}
}
