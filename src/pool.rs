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
use crate::util::low_mask64;

/// The shared entropy pool that backs every sampler in this crate.
///
/// `Pool` carries a bit buffer (`flip_word`/`flip_pos`, refilled from an [`EntropySource`]) and
/// the recycling state (`unif_state`/`unif_bound`). The pool invariant is: conditional on every
/// observable output so far, `unif_state` is uniformly distributed on `[0, unif_bound)`. Every
/// public method preserves this invariant; that is the entire contract a sampler built on top of
/// `Pool` must honor when it folds its own residual entropy back in via [`Pool::merge_state`].
///
/// A `Pool` is not `Sync`/`Send`-safe to share across threads without external synchronization —
/// give each thread its own `Pool` instead.
pub struct Pool<E: EntropySource> {
    entropy: E,
    flip_word: u64,
    flip_pos: u32,
    unif_state: u64,
    unif_bound: u64,
}

impl<E: EntropySource> Pool<E> {
    /// Create a fresh pool wrapping the given entropy source. `unif_state = 0`, `unif_bound = 1`
    /// trivially satisfies the pool invariant.
    pub fn new(entropy: E) -> Self {
        Self {
            entropy,
            flip_word: 0,
            flip_pos: 0,
            unif_state: 0,
            unif_bound: 1,
        }
    }

    /// Borrow the wrapped entropy source, e.g. to inspect a counting wrapper's tally in tests.
    pub fn entropy_source(&self) -> &E {
        &self.entropy
    }

    /// The raw `(unif_state, unif_bound)` pair. Exposed for instrumentation of the pool
    /// invariant (P) — `unif_state` is uniform on `[0, unif_bound)` conditional on every
    /// observable output so far — not needed for ordinary sampling.
    pub fn raw_state(&self) -> (u64, u64) {
        (self.unif_state, self.unif_bound)
    }

    fn refill_bits(&mut self) {
        self.flip_word = self.entropy.next_u64();
        self.flip_pos = 64;
    }

    /// Return `n` (`n <= 64`) fresh, independent, fair random bits.
    pub fn flip_n(&mut self, n: u32) -> u64 {
        if self.flip_pos == 0 {
            self.refill_bits();
        }
        let mut num_bits_extract = n.min(self.flip_pos);
        self.flip_pos -= num_bits_extract;
        let mut b = (self.flip_word >> self.flip_pos) & low_mask64(num_bits_extract);
        if num_bits_extract != n {
            self.refill_bits();
            num_bits_extract = n - num_bits_extract;
            b <<= num_bits_extract;
            self.flip_pos -= num_bits_extract;
            b |= (self.flip_word >> self.flip_pos) & low_mask64(num_bits_extract);
        }
        b
    }

    /// Top up `unif_state`/`unif_bound` so that `unif_bound >= 1 << 56`, drawing fresh bits from
    /// the bit buffer into the low bits of `unif_state`. Preserves the pool invariant.
    fn refill_pool(&mut self) {
        let num_bits_extract = self.unif_bound.leading_zeros();
        if num_bits_extract >= 8 {
            self.unif_bound <<= num_bits_extract;
            self.unif_state <<= num_bits_extract;
            self.unif_state |= self.flip_n(num_bits_extract);
        }
    }

    /// Fold a uniform variate `state ~ Uniform[0, bound)`, independent of the current pool, back
    /// into the pool. Preserves the pool invariant.
    pub fn merge_state(&mut self, state: u64, bound: u64) {
        self.unif_bound *= bound;
        self.unif_state = self.unif_state * bound + state;
    }

    /// Specializes [`Pool::merge_state`] for a `state` that is `n` independent uniform bits.
    pub fn merge_state_bits(&mut self, state: u64, n: u32) {
        self.unif_bound <<= n;
        self.unif_state = (self.unif_state << n) | state;
    }

    /// Draw `X ~ Uniform[0, n)`. `unif_state` remains independent of `X` and retains the pool
    /// invariant. `n` should be (much) smaller than `1 << 63`.
    pub fn uniform_eo(&mut self, n: u64) -> u64 {
        loop {
            self.refill_pool();
            let q_state = self.unif_state / n;
            let r_state = self.unif_state % n;
            let q_bound = self.unif_bound / n;
            let r_bound = self.unif_bound % n;
            // Discard the information of bernoulli(r_bound, unif_bound) to split into branches.
            if q_state < q_bound {
                // q_state ~ Uniform[0, q_bound), r_state ~ Uniform[0, n), independently.
                self.unif_state = q_state;
                self.unif_bound = q_bound;
                return r_state;
            }
            // q_state == q_bound, r_state ~ Uniform[0, r_bound). Retry with the shrunk pool.
            self.unif_state = r_state;
            self.unif_bound = r_bound;
        }
    }

    /// Specializes [`Pool::uniform_eo`] to use shifts and masks for `n = 1 << n_bits`. Prefer
    /// this over drawing bits directly from the bit buffer whenever the residual is going to be
    /// recycled, to avoid overflow in the subsequent `merge_state`.
    pub fn flip_n_from_unif(&mut self, n_bits: u32) -> u64 {
        loop {
            self.refill_pool();
            let q_state = self.unif_state >> n_bits;
            let r_state = self.unif_state & low_mask64(n_bits);
            let q_bound = self.unif_bound >> n_bits;
            let r_bound = self.unif_bound & low_mask64(n_bits);
            if q_state < q_bound {
                self.unif_state = q_state;
                self.unif_bound = q_bound;
                return r_state;
            }
            self.unif_state = r_state;
            self.unif_bound = r_bound;
        }
    }

    /// Specializes [`Pool::uniform_eo`] for `n = 1 << 32`, again avoiding overflow on recycling.
    pub fn uniform_u32_from_unif(&mut self) -> u32 {
        loop {
            self.refill_pool();
            let q_state = (self.unif_state >> 32) as u32;
            let r_state = self.unif_state as u32;
            let q_bound = (self.unif_bound >> 32) as u32;
            let r_bound = self.unif_bound as u32;
            if q_state < q_bound {
                self.unif_state = u64::from(q_state);
                self.unif_bound = u64::from(q_bound);
                return r_state;
            }
            self.unif_state = u64::from(r_state);
            self.unif_bound = u64::from(r_bound);
        }
    }

    /// Return `true` with probability `numer / denom` and recycle the residual.
    pub fn bernoulli_eo(&mut self, numer: u32, denom: u32) -> bool {
        loop {
            self.refill_pool();
            let denom64 = u64::from(denom);
            let q_bound = self.unif_bound / denom64;
            let r_bound = self.unif_bound % denom64;
            let true_bound = q_bound * u64::from(numer);
            if self.unif_state < true_bound {
                self.unif_bound = true_bound;
                return true;
            }
            let full_bound = q_bound * denom64;
            if self.unif_state < full_bound {
                self.unif_state -= true_bound;
                self.unif_bound = full_bound - true_bound;
                return false;
            }
            self.unif_state -= full_bound;
            self.unif_bound = r_bound;
        }
    }

    /// Draw a recycled 32-bit uniform on `[0, x.num_outcomes)` using precomputed divisions from
    /// [`UniformPreprocessed`].
    pub fn uniform_prediv(&mut self, x: &UniformPreprocessed) -> u32 {
        loop {
            let u = self.uniform_u32_from_unif();
            let unifm_rem = u64::from(u) * u64::from(x.num_outcomes);
            let unifm = (unifm_rem >> 32) as u32;
            let rem = unifm_rem as u32;
            if rem > x.not_remainder {
                // Don't bother trying to recycle the remainder.
                continue;
            }
            // Ceiling of (1<<32) * (unifm / m): u - lower_bound ~ Uniform[0, x.quotient),
            // unifm ~ Uniform[0, m), and the two are independent.
            let lower_bound = ((x.inverse * u64::from(unifm)) >> 32) as u32;
            self.merge_state(u64::from(u.wrapping_sub(lower_bound)), u64::from(x.quotient));
            return unifm;
        }
    }
}

impl<E: EntropySource + Default> Default for Pool<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

/// Precomputed divisions for drawing a recycled uniform modulo a fixed `m`, shared by any
/// sampler that needs repeated draws against the same modulus (currently [`crate::FldrEoTable`]).
#[derive(Clone, Copy, Debug)]
pub struct UniformPreprocessed {
    num_outcomes: u32,
    quotient: u32,
    not_remainder: u32,
    inverse: u64,
}

impl UniformPreprocessed {
    /// Precompute division constants for drawing uniforms on `[0, m)`.
    /// # Panics
    /// Panics if `m == 0`.
    #[must_use]
    pub fn new(m: u32) -> Self {
        assert!(m > 0, "uniform_preprocess requires a positive modulus");
        let numerator: u64 = 1u64 << 32;
        let quotient = (numerator / u64::from(m)) as u32;
        let remainder = (numerator % u64::from(m)) as u32;
        let not_remainder = !remainder;
        let mut inverse = u64::MAX / u64::from(m);
        let inverse_remainder = u64::MAX % u64::from(m);
        if inverse_remainder == u64::from(m - 1) {
            inverse += 1;
        }
        Self {
            num_outcomes: m,
            quotient,
            not_remainder,
            inverse,
        }
    }
}
