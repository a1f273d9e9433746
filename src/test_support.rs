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

//! Deterministic entropy sources used only by this crate's own test suite, so that sampler
//! exactness and the pool invariant can be checked against a scripted bit stream instead of the
//! OS entropy source.

use crate::entropy::EntropySource;

/// Replays a fixed, repeating sequence of 64-bit words.
pub(crate) struct ScriptedEntropySource {
    words: Vec<u64>,
    pos: usize,
}

impl ScriptedEntropySource {
    pub(crate) fn new(words: Vec<u64>) -> Self {
        assert!(!words.is_empty(), "script must be nonempty");
        Self { words, pos: 0 }
    }

    /// A source that repeats the infinite bit pattern `1010...` (alternating bits, high bit
    /// first), i.e. every word is `0xAAAA_AAAA_AAAA_AAAA`.
    pub(crate) fn alternating() -> Self {
        Self::new(vec![0xAAAA_AAAA_AAAA_AAAAu64])
    }
}

impl EntropySource for ScriptedEntropySource {
    fn next_u64(&mut self) -> u64 {
        let w = self.words[self.pos];
        self.pos = (self.pos + 1) % self.words.len();
        w
    }
}
