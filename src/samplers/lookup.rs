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
use crate::samplers::cdf::build_cdf;

/// A flat `O(1)`-sample table: a uniform over the weight sum is drawn and looked up directly,
/// rather than located by binary search. Costs `O(sum(weights))` memory to build.
#[derive(Clone)]
pub struct LookupTable {
    cdf: Vec<u64>,
    lookup: Vec<u32>,
}

impl LookupTable {
    /// Preprocess a list of nonnegative integer weights into a lookup table.
    /// # Panics
    /// Panics if `weights` is empty or its sum is zero.
    #[must_use]
    pub fn preprocess(weights: &[u32]) -> Self {
        assert!(!weights.is_empty(), "weights must be nonempty");
        let cdf = build_cdf(weights);
        let m = *cdf.last().unwrap();
        assert!(m > 0, "the sum of weights must be positive");

        let mut lookup = vec![0u32; m as usize];
        for (i, window) in cdf.windows(2).enumerate() {
            let (lo, hi) = (window[0], window[1]);
            for slot in &mut lookup[lo as usize..hi as usize] {
                *slot = i as u32;
            }
        }
        Self { cdf, lookup }
    }

    /// Draw a sample, recycling the residual entropy back into `pool`.
    pub fn sample<E: EntropySource>(&self, pool: &mut Pool<E>) -> u32 {
        let uniform_index = pool.uniform_eo(self.lookup.len() as u64);
        let result = self.lookup[uniform_index as usize];
        let lo = self.cdf[result as usize];
        let hi = self.cdf[result as usize + 1];
        pool.merge_state(uniform_index - lo, hi - lo);
        result
    }

    /// The exact heap footprint of this table, in bytes.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.cdf.len() * std::mem::size_of::<u64>() + self.lookup.len() * std::mem::size_of::<u32>()
    }
}
