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

//! Checks the pool invariant (P): `unif_state` is always strictly less than `unif_bound`, for
//! every sampler, across a long mixed sequence of draws fed by a non-trivial bit stream.

use randomness_recycling::{
    AldrRecycleTable, AliasEoTable, AliasTable, CdfTable, EntropySource, FldrEoTable, LookupTable,
    Pool,
};

/// A small xorshift generator: deterministic, but not the degenerate all-zero/alternating
/// patterns the exactness tests already cover.
struct XorShift64(u64);

impl EntropySource for XorShift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

fn assert_invariant_holds<E: EntropySource>(pool: &Pool<E>) {
    let (state, bound) = pool.raw_state();
    assert!(bound >= 1, "unif_bound degenerated to 0");
    assert!(
        state < bound,
        "pool invariant violated: unif_state {state} >= unif_bound {bound}"
    );
}

#[test]
fn cdf_preserves_pool_invariant() {
    let table = CdfTable::preprocess(&[3, 1, 4, 1, 5]);
    let mut pool = Pool::new(XorShift64(0x9E37_79B9_7F4A_7C15));
    for _ in 0..5_000 {
        let x = table.sample(&mut pool);
        assert!(x < 5);
        assert_invariant_holds(&pool);
    }
}

#[test]
fn lookup_preserves_pool_invariant() {
    let table = LookupTable::preprocess(&[3, 1, 4, 1, 5]);
    let mut pool = Pool::new(XorShift64(0x1234_5678_9ABC_DEF0));
    for _ in 0..5_000 {
        let x = table.sample(&mut pool);
        assert!(x < 5);
        assert_invariant_holds(&pool);
    }
}

#[test]
fn alias_preserves_pool_invariant() {
    let table = AliasTable::preprocess(&[7, 11, 13]);
    let mut pool = Pool::new(XorShift64(0x0DDB_A11_F00D_BEEF));
    for _ in 0..5_000 {
        let x = table.sample(&mut pool);
        assert!(x < 3);
        assert_invariant_holds(&pool);
    }
}

#[test]
fn alias_eo_preserves_pool_invariant() {
    let table = AliasEoTable::preprocess(&[7, 11, 13]);
    let mut pool = Pool::new(XorShift64(0xF00D_CAFE_BABE_1234));
    for _ in 0..5_000 {
        let x = table.sample(&mut pool);
        assert!(x < 3);
        assert_invariant_holds(&pool);
    }
}

#[test]
fn fldr_preserves_pool_invariant() {
    let table = FldrEoTable::preprocess(&[3, 1, 4, 1, 5]);
    let mut pool = Pool::new(XorShift64(0xABCD_EF01_2345_6789));
    for _ in 0..5_000 {
        let x = table.sample(&mut pool);
        assert!(x < 5);
        assert_invariant_holds(&pool);
    }
}

#[test]
fn aldr_preserves_pool_invariant() {
    let table = AldrRecycleTable::preprocess(&[1, 3]);
    let mut pool = Pool::new(XorShift64(0x5555_AAAA_5555_AAAA));
    for _ in 0..5_000 {
        let x = table.sample(&mut pool);
        assert!(x < 2);
        assert_invariant_holds(&pool);
    }
}

#[test]
fn uniform_eo_preserves_pool_invariant_across_varying_moduli() {
    // Interleave draws against several different moduli on one pool, the way samplers that share
    // a pool across multiple distributions would, and check the invariant after every draw.
    let mut pool = Pool::new(XorShift64(0x0BAD_F00D_DEAD_BEEF));
    let moduli = [2u64, 3, 5, 7, 100, 1_000_003];
    for i in 0..5_000u64 {
        let n = moduli[(i as usize) % moduli.len()];
        let x = pool.uniform_eo(n);
        assert!(x < n);
        assert_invariant_holds(&pool);
    }
}

#[test]
fn bernoulli_eo_preserves_pool_invariant() {
    let mut pool = Pool::new(XorShift64(0x1357_9BDF_2468_ACE0));
    for _ in 0..5_000 {
        let _ = pool.bernoulli_eo(3, 10);
        assert_invariant_holds(&pool);
    }
}
