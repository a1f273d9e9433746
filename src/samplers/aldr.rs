// MIT License

// Copyright (c) 2023 Ryan Andersen

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::entropy::EntropySource;
use crate::pool::Pool;
use crate::util::{build_tree, ceil_log2, low_mask64};

/// The Amplified Loaded Dice Roller: amplifies each weight by `c = floor(2^(2k) / m)` so the
/// tree covers `2^(2k) - r` of the `2^(2k)` total leaves, and rejects (with entropy recycling of
/// the rejected slice) the shortfall `r = 2^(2k) mod m`.
#[derive(Clone)]
pub struct AldrRecycleTable {
    breadths: Vec<u32>,
    leaves_flat: Vec<u32>,
    weights: Vec<u64>,
    reject_weight: u32,
}

impl AldrRecycleTable {
    /// Preprocess a list of nonnegative integer weights into an ALDR table.
    /// # Panics
    /// Panics if `weights` is empty, sums to zero, or the sum is not less than `2^31`.
    #[must_use]
    pub fn preprocess(weights: &[u32]) -> Self {
        assert!(!weights.is_empty(), "weights must be nonempty");
        let m: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        assert!(m > 0, "the sum of weights must be positive");
        assert!(m < (1u64 << 31), "ALDR requires the sum of weights < 2^31");
        let m = m as u32;
        let k = ceil_log2(m);
        let big_k = k * 2;

        let c = (1u64 << big_k) / u64::from(m);
        let reject_weight = ((1u64 << big_k) % u64::from(m)) as u32;
        let amplified: Vec<u64> = weights.iter().map(|&w| c * u64::from(w)).collect();

        let (breadths, leaves_flat) = build_tree(&amplified, big_k + 1);

        Self {
            breadths,
            leaves_flat,
            weights: amplified,
            reject_weight,
        }
    }

    /// Draw a sample, recycling the residual entropy back into `pool`, including the entropy of
    /// a rejected draw.
    pub fn sample<E: EntropySource>(&self, pool: &mut Pool<E>) -> u32 {
        let num_flips = self.breadths.len() as u32 - 1;
        let total = 1u64 << num_flips;
        let accept_bound = total - u64::from(self.reject_weight);
        loop {
            let flips = pool.flip_n_from_unif(num_flips);
            if flips >= accept_bound {
                pool.merge_state(flips - accept_bound, u64::from(self.reject_weight));
                continue;
            }

            let mut depth = 0usize;
            let mut location = 0u32;
            let mut val = 0u32;
            let mut pos = num_flips;
            loop {
                if val < self.breadths[depth] {
                    let ans = self.leaves_flat[(location + val) as usize];
                    let mask = low_mask64(pos);
                    let recycle_bound = self.weights[ans as usize];
                    let recycle_state = (mask & flips) + (recycle_bound & mask);
                    pool.merge_state(recycle_state, recycle_bound);
                    return ans;
                }
                location += self.breadths[depth];
                pos -= 1;
                val = ((val - self.breadths[depth]) << 1) | ((flips >> pos) & 1) as u32;
                depth += 1;
            }
        }
    }

    /// The exact heap footprint of this table, in bytes.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.breadths.len() * std::mem::size_of::<u32>()
            + self.leaves_flat.len() * std::mem::size_of::<u32>()
            + self.weights.len() * std::mem::size_of::<u64>()
            + 4 * std::mem::size_of::<u32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedEntropySource;

    #[test]
    fn tree_shape_matches_leaf_count() {
        let table = AldrRecycleTable::preprocess(&[1, 1, 2, 3, 2]);
        let total_leaves: u32 = table.breadths.iter().sum();
        assert_eq!(total_leaves as usize, table.leaves_flat.len());
    }

    #[test]
    #[should_panic(expected = "weights must be nonempty")]
    fn rejects_empty() {
        let _ = AldrRecycleTable::preprocess(&[]);
    }

    #[test]
    #[should_panic(expected = "sum of weights must be positive")]
    fn rejects_zero_sum() {
        let _ = AldrRecycleTable::preprocess(&[0, 0]);
    }

    #[test]
    #[should_panic(expected = "ALDR requires the sum of weights < 2^31")]
    fn rejects_m_too_large() {
        let _ = AldrRecycleTable::preprocess(&[1u32 << 30, 1u32 << 30, 1u32 << 30]);
    }

    #[test]
    fn single_outcome_never_consumes_bits() {
        let table = AldrRecycleTable::preprocess(&[1]);
        let mut pool = Pool::new(ScriptedEntropySource::alternating());
        for _ in 0..10 {
            assert_eq!(table.sample(&mut pool), 0);
        }
    }

    #[test]
    fn sample_stays_in_range() {
        let table = AldrRecycleTable::preprocess(&[1, 3]);
        let mut pool = Pool::new(ScriptedEntropySource::alternating());
        for _ in 0..200 {
            assert!(table.sample(&mut pool) < 2);
        }
    }
}
