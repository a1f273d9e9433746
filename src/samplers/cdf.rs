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

/// Build the prefix-sum CDF of `weights`: `cdf[0] = 0`, `cdf[n] = sum(weights)`,
/// `cdf[i + 1] = cdf[i] + weights[i]`.
pub(crate) fn build_cdf(weights: &[u32]) -> Vec<u64> {
    let mut cdf = Vec::with_capacity(weights.len() + 1);
    cdf.push(0u64);
    for &w in weights {
        cdf.push(cdf.last().copied().unwrap() + u64::from(w));
    }
    cdf
}

/// A sampler that draws a uniform over the weight sum and locates the outcome by binary search
/// over the cumulative distribution.
#[derive(Clone)]
pub struct CdfTable {
    cdf: Vec<u64>,
}

impl CdfTable {
    /// Preprocess a list of nonnegative integer weights into a CDF table.
    /// # Panics
    /// Panics if `weights` is empty or its sum is zero.
    #[must_use]
    pub fn preprocess(weights: &[u32]) -> Self {
        assert!(!weights.is_empty(), "weights must be nonempty");
        let cdf = build_cdf(weights);
        assert!(
            *cdf.last().unwrap() > 0,
            "the sum of weights must be positive"
        );
        Self { cdf }
    }

    /// Draw a sample, recycling the residual entropy back into `pool`.
    pub fn sample<E: EntropySource>(&self, pool: &mut Pool<E>) -> u32 {
        let m = *self.cdf.last().unwrap();
        let uniform_index = pool.uniform_eo(m);

        // Canonical upper-bound search: smallest `low` in [1, n] with cdf[low] > uniform_index.
        let mut low = 1usize;
        let mut high = self.cdf.len() - 1;
        while low < high {
            let mid = (low + high) / 2;
            if self.cdf[mid] <= uniform_index {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        pool.merge_state(
            uniform_index - self.cdf[low - 1],
            self.cdf[low] - self.cdf[low - 1],
        );
        (low - 1) as u32
    }

    /// The exact heap footprint of this table, in bytes.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.cdf.len() * std::mem::size_of::<u64>()
    }
}
