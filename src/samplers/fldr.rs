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
use crate::pool::{Pool, UniformPreprocessed};
use crate::util::{build_tree, ceil_log2};

/// The Fast Loaded Dice Roller, packed left so the tree has no rejection level: every leaf of
/// the binary tree over the weights' bit expansions corresponds to a real outcome.
#[derive(Clone)]
pub struct FldrEoTable {
    breadths: Vec<u32>,
    leaves_flat: Vec<u32>,
    weights: Vec<u32>,
    // `None` iff the weight sum is 1, i.e. the distribution is a single certain outcome.
    // `uniform_preprocess` is only valid for moduli greater than 1 (see its own doc comment), and
    // a certain outcome needs no entropy at all, so sampling special-cases this instead.
    uniform_preprocessed: Option<UniformPreprocessed>,
}

impl FldrEoTable {
    /// Preprocess a list of nonnegative integer weights into an FLDR table.
    /// # Panics
    /// Panics if `weights` is empty, sums to zero, or `ceil(log2(sum)) > 31`.
    #[must_use]
    pub fn preprocess(weights: &[u32]) -> Self {
        assert!(!weights.is_empty(), "weights must be nonempty");
        let m: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        assert!(m > 0, "the sum of weights must be positive");
        assert!(m <= u64::from(u32::MAX), "sum of weights overflows u32");
        let m = m as u32;
        let k = ceil_log2(m);
        assert!(k <= 31, "FLDR assumes ceil(log2(sum)) <= 31");

        let weight_words: Vec<u64> = weights.iter().map(|&w| u64::from(w)).collect();
        let (breadths, leaves_flat) = build_tree(&weight_words, k + 1);

        Self {
            breadths,
            leaves_flat,
            weights: weights.to_vec(),
            uniform_preprocessed: (m > 1).then(|| UniformPreprocessed::new(m)),
        }
    }

    /// Draw a sample, recycling the residual entropy back into `pool`.
    pub fn sample<E: EntropySource>(&self, pool: &mut Pool<E>) -> u32 {
        let num_flips = self.breadths.len() as u32 - 1;
        let flips = match &self.uniform_preprocessed {
            Some(x) => pool.uniform_prediv(x),
            // A certain outcome: the tree is a single leaf at depth 0 and no flip bits are ever
            // consulted (num_flips == 0), so any value works; 0 costs no entropy to produce.
            None => 0,
        };

        let mut depth = 0usize;
        let mut location = 0u32;
        let mut val = 0u32;
        let mut pos = num_flips;
        loop {
            if val < self.breadths[depth] {
                let ans = self.leaves_flat[(location + val) as usize];
                let mask = low_mask32(pos);
                let recycle_bound = self.weights[ans as usize];
                let recycle_state = (mask & flips) + (recycle_bound & mask);
                pool.merge_state(u64::from(recycle_state), u64::from(recycle_bound));
                return ans;
            }
            location += self.breadths[depth];
            pos -= 1;
            val = ((val - self.breadths[depth]) << 1) | ((flips >> pos) & 1);
            depth += 1;
        }
    }

    /// The exact heap footprint of this table, in bytes.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.breadths.len() * std::mem::size_of::<u32>()
            + self.leaves_flat.len() * std::mem::size_of::<u32>()
            + self.weights.len() * std::mem::size_of::<u32>()
            + std::mem::size_of::<Option<UniformPreprocessed>>()
            + 3 * std::mem::size_of::<u32>()
    }
}

fn low_mask32(bits: u32) -> u32 {
    if bits >= 32 {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}
