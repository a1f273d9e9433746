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

//! # Randomness Recycling
//! A library of exact discrete samplers with entropy-optimal randomness recycling. Given a
//! finite categorical distribution specified by nonnegative integer weights `a[0..n)` summing to
//! `m`, each sampler here draws independent samples `X` such that `Pr[X = i] = a[i] / m`
//! exactly — no floating-point approximation anywhere — while consuming, in the amortized limit,
//! the information-theoretic minimum number of fair random bits per sample.
//!
//! The trick making this possible is *randomness recycling*: whenever a sampler draws more
//! entropy than the strict minimum needed to make its decision, the leftover entropy is not
//! discarded but folded back into a shared [`Pool`](pool::Pool) for the next draw to spend. The
//! recycling discipline itself lives in [`pool`]; the five samplers below are relatively thin
//! front ends that each compute an outcome and hand their residual back to the pool via
//! [`Pool::merge_state`](pool::Pool::merge_state).
//!
//! Five samplers are provided, all drawing from the same kind of [`Pool`](pool::Pool):
//! - [`CdfTable`] — cumulative-distribution binary search.
//! - [`LookupTable`] — flat table lookup, `O(1)` time, `O(sum(weights))` memory.
//! - [`AliasTable`] / [`AliasEoTable`] — Walker's alias method, exact integer form, with and
//!   without full entropy recycling.
//! - [`FldrEoTable`] — the Fast Loaded Dice Roller, packed left so there is no rejection.
//! - [`AldrRecycleTable`] — the Amplified Loaded Dice Roller, FLDR over weights scaled up by
//!   `floor(2^2k / m)`, recycling even the rejected slice's entropy.
//!
//! ### Citation
//! This crate implements published algorithms; it originates neither the alias method, FLDR, nor
//! the randomness-recycling construction around them.
//! ```text
//! @inproceedings{saad2020fldr,
//!   title     = {The Fast Loaded Dice Roller: A Near-optimal Exact Sampler for Discrete
//!                Probability Distributions},
//!   author    = {Saad, Feras A. and Freer, Cameron E. and Rinard, Martin C. and
//!                Mansinghka, Vikash K.},
//!   booktitle = {AISTATS 2020},
//!   year      = 2020,
//! }
//! ```

pub mod entropy;
pub mod pool;
mod samplers;
mod util;

#[cfg(test)]
mod test_support;

pub use entropy::EntropySource;
pub use pool::Pool;
pub use samplers::{AldrRecycleTable, AliasEoTable, AliasTable, CdfTable, FldrEoTable, LookupTable};
