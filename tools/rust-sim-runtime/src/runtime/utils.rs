use rand::{rngs::StdRng, SeedableRng};

pub fn cyclize(cycle: usize) -> String {
  format!("Cycle @{}", cycle)
}

/// Derive an independent random stream for the `index`-th draw under `seed`.
///
/// The stream depends on nothing but its two arguments, so the same
/// `(seed, index)` pair always reproduces the same values, regardless of how
/// many other streams were drawn before or in which order.
pub fn case_rng(seed: u64, index: usize) -> StdRng {
  StdRng::seed_from_u64(splitmix(seed ^ splitmix(index as u64)))
}

fn splitmix(x: u64) -> u64 {
  let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
  z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
  z ^ (z >> 31)
}
