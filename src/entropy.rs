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

/// Sampling requires a source of fresh, independent, uniformly distributed random bits. This
/// trait describes the interface for such a source, fetched a 64-bit word at a time, but lets
/// the user choose the specifics of how the words are generated.
///
/// NOTE: `next_u64` is taken with a mutable receiver because implementations will likely need to
/// update internal state (a PRNG, a byte buffer from a syscall, ...) to produce new words.
pub trait EntropySource {
    /// Return 64 fresh, independent, uniformly distributed random bits.
    fn next_u64(&mut self) -> u64;
}

#[cfg(feature = "rand")]
pub mod rand {
    use rand::{rngs::OsRng, RngCore};

    /// An [`EntropySource`](super::EntropySource) backed by the operating system's random byte
    /// source. This is the default entropy source used when no other is specified.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct OsEntropySource;

    impl super::EntropySource for OsEntropySource {
        fn next_u64(&mut self) -> u64 {
            OsRng.next_u64()
        }
    }

    /// Adapts any `rand` crate `RngCore` into an [`EntropySource`](super::EntropySource). Useful
    /// for deterministic testing with a seeded generator, or for reusing an RNG the caller
    /// already has on hand.
    pub struct RandEntropySource<R: RngCore>(pub R);

    impl<R: RngCore> RandEntropySource<R> {
        /// Wrap an existing `RngCore` as an entropy source.
        #[must_use]
        pub fn new(rng: R) -> Self {
            Self(rng)
        }
    }

    impl<R: RngCore> super::EntropySource for RandEntropySource<R> {
        fn next_u64(&mut self) -> u64 {
            self.0.next_u64()
        }
    }
}
