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

struct AliasBuild {
    n: u32,
    weight_sum: u32,
    aliases: Vec<u32>,
    no_alias_odds: Vec<u32>,
}

/// Walker's alias method, integer form: builds `aliases`/`no_alias_odds` by threading two
/// intrusive singly linked lists ("smalls", "bigs") through the same `Vec` that ends up holding
/// the final alias map. A single index is only ever a member of one of the three data
/// structures (smalls list, bigs list, finished map) at a time, so the reuse never aliases two
/// live views of the same slot.
fn build_alias(weights: &[u32]) -> AliasBuild {
    assert!(!weights.is_empty(), "weights must be nonempty");
    assert!(
        (weights.len() as u64) < u64::from(u32::MAX),
        "too many weights"
    );
    let n = weights.len() as u32;
    let max_weight = u32::MAX / n;
    for &w in weights {
        assert!(
            w <= max_weight,
            "weight {w} exceeds u32::MAX / n ({max_weight})"
        );
    }

    // The sum of weights represents 100% of "no alias" odds.
    let weight_sum: u32 = weights.iter().map(|&w| u64::from(w)).sum::<u64>() as u32;
    assert!(weight_sum > 0, "the sum of weights must be positive");

    let mut no_alias_odds: Vec<u32> = weights.iter().map(|&w| w * n).collect();
    let mut aliases = vec![u32::MAX; weights.len()];
    let mut smalls_head = u32::MAX;
    let mut bigs_head = u32::MAX;

    for i in 0..n {
        if no_alias_odds[i as usize] < weight_sum {
            aliases[i as usize] = smalls_head;
            smalls_head = i;
        } else {
            aliases[i as usize] = bigs_head;
            bigs_head = i;
        }
    }

    // Build the alias map by finding a big-weight alias for each small-weight index.
    while smalls_head != u32::MAX && bigs_head != u32::MAX {
        let small = smalls_head;
        smalls_head = aliases[small as usize];
        let big = bigs_head;
        bigs_head = aliases[big as usize];

        aliases[small as usize] = big;
        no_alias_odds[big as usize] -= weight_sum - no_alias_odds[small as usize];

        if no_alias_odds[big as usize] < weight_sum {
            aliases[big as usize] = smalls_head;
            smalls_head = big;
        } else {
            aliases[big as usize] = bigs_head;
            bigs_head = big;
        }
    }

    // Remaining indices should have no-alias odds of (about) 100%, up to rounding stragglers.
    while smalls_head != u32::MAX {
        let idx = smalls_head;
        smalls_head = aliases[idx as usize];
        no_alias_odds[idx as usize] = weight_sum;
    }
    while bigs_head != u32::MAX {
        let idx = bigs_head;
        bigs_head = aliases[idx as usize];
        no_alias_odds[idx as usize] = weight_sum;
    }

    AliasBuild {
        n,
        weight_sum,
        aliases,
        no_alias_odds,
    }
}

/// Walker's alias method: one uniform draw plus one Bernoulli draw per sample, `O(1)` time and
/// `O(n)` memory. Does not recycle the Bernoulli draw's residual; see [`AliasEoTable`] for the
/// fully entropy-optimal variant.
#[derive(Clone)]
pub struct AliasTable {
    weight_sum: u32,
    aliases: Vec<u32>,
    no_alias_odds: Vec<u32>,
}

impl AliasTable {
    /// Preprocess a list of nonnegative integer weights into an alias table.
    /// # Panics
    /// Panics if `weights` is empty, contains more than `u32::MAX` entries, any weight exceeds
    /// `u32::MAX / weights.len()`, or the weights sum to zero.
    #[must_use]
    pub fn preprocess(weights: &[u32]) -> Self {
        let build = build_alias(weights);
        Self {
            weight_sum: build.weight_sum,
            aliases: build.aliases,
            no_alias_odds: build.no_alias_odds,
        }
    }

    /// Draw a sample. The Bernoulli residual is not recycled by this sampler.
    pub fn sample<E: EntropySource>(&self, pool: &mut Pool<E>) -> u32 {
        let uniform_index = pool.uniform_eo(self.aliases.len() as u64) as u32;
        if pool.bernoulli_eo(self.no_alias_odds[uniform_index as usize], self.weight_sum) {
            uniform_index
        } else {
            self.aliases[uniform_index as usize]
        }
    }

    /// The exact heap footprint of this table, in bytes.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.aliases.len() * std::mem::size_of::<u32>()
            + self.no_alias_odds.len() * std::mem::size_of::<u32>()
            + std::mem::size_of::<u32>()
            + std::mem::size_of::<u32>()
    }
}

/// Walker's alias method with full entropy recycling: the residual after both the weight draw
/// and the alias/no-alias branch decision is folded back into the pool, by precomputing an
/// `offsets` table that maps every bucket's residual contiguously into its destination outcome's
/// interval.
#[derive(Clone)]
pub struct AliasEoTable {
    weight_sum: u32,
    weights: Vec<u32>,
    aliases: Vec<u32>,
    no_alias_odds: Vec<u32>,
    offsets: Vec<u64>,
}

impl AliasEoTable {
    /// Preprocess a list of nonnegative integer weights into an entropy-optimal alias table.
    /// # Panics
    /// Same conditions as [`AliasTable::preprocess`].
    #[must_use]
    pub fn preprocess(weights: &[u32]) -> Self {
        let build = build_alias(weights);
        let n = build.n as usize;

        // cumulative_sums[j] tracks, while scanning i, the running total of residual mass that
        // will land in outcome j's interval: its own no_alias_odds, plus the "weight_sum minus
        // no_alias_odds" contributed by every earlier i whose alias is j.
        let mut cumulative_sums: Vec<u64> =
            build.no_alias_odds.iter().map(|&x| u64::from(x)).collect();
        let mut offsets = vec![0u64; n];
        for i in 0..n {
            let alias = build.aliases[i];
            if alias != u32::MAX {
                let j = alias as usize;
                // This subtraction might underflow (u64 wraps); that's intentional modular
                // arithmetic. It only ever matters for i whose no_alias_odds[i] < weight_sum, in
                // which case the wraparound cancels exactly when the sampler later adds
                // uniform_weight (itself < no_alias_odds[i]'s complement range) back on top. For
                // i with no_alias_odds[i] == weight_sum (rounding stragglers), the sampler never
                // reads offsets[i] at all, so a "wrong" wrapped value here is inert.
                offsets[i] = cumulative_sums[j].wrapping_sub(u64::from(build.no_alias_odds[i]));
                cumulative_sums[j] += u64::from(build.weight_sum - build.no_alias_odds[i]);
            }
        }

        Self {
            weight_sum: build.weight_sum,
            weights: weights.to_vec(),
            aliases: build.aliases,
            no_alias_odds: build.no_alias_odds,
            offsets,
        }
    }

    /// Draw a sample, recycling all residual entropy back into `pool`.
    pub fn sample<E: EntropySource>(&self, pool: &mut Pool<E>) -> u32 {
        let n = self.aliases.len() as u64;
        let uniform = pool.uniform_eo(n * u64::from(self.weight_sum));
        let uniform_weight = uniform / n;
        let i = (uniform % n) as u32;
        let no_alias_odds = u64::from(self.no_alias_odds[i as usize]);
        if uniform_weight < no_alias_odds {
            pool.merge_state(uniform_weight, u64::from(self.weights[i as usize]) * n);
            i
        } else {
            let alias = self.aliases[i as usize];
            pool.merge_state(
                uniform_weight.wrapping_add(self.offsets[i as usize]),
                u64::from(self.weights[alias as usize]) * n,
            );
            alias
        }
    }

    /// The exact heap footprint of this table, in bytes.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.aliases.len() * std::mem::size_of::<u32>()
            + self.no_alias_odds.len() * std::mem::size_of::<u32>()
            + self.weights.len() * std::mem::size_of::<u32>()
            + self.offsets.len() * std::mem::size_of::<u64>()
            + std::mem::size_of::<u32>()
            + std::mem::size_of::<u32>()
    }

    /// The weight sum (denominator of every outcome's probability).
    #[must_use]
    pub fn weight_sum(&self) -> u32 {
        self.weight_sum
    }

    /// The `no_alias_odds` table, exposed for the alias-completeness testable property.
    #[must_use]
    pub fn no_alias_odds(&self) -> &[u32] {
        &self.no_alias_odds
    }
}
