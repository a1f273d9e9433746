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

/// Mask of the low `bits` bits of a `u64`, saturating at `u64::MAX` for `bits >= 64`.
pub(crate) fn low_mask64(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// `ceil(log2(m))` for `m > 0`, matching the reference's `32 - clz(m) - is_pow2(m)`.
pub(crate) fn ceil_log2(m: u32) -> u32 {
    assert!(m > 0);
    32 - m.leading_zeros() - u32::from(m.is_power_of_two())
}

/// Shared shape of the FLDR/ALDR binary tree: flatten the bit-expansions of `weight_words`
/// (most-significant bit of `num_levels - 1` first) into `breadths` (leaf count per level) and
/// `leaves_flat` (leaf -> outcome index, in level-major, weight-index-minor order).
pub(crate) fn build_tree(weight_words: &[u64], num_levels: u32) -> (Vec<u32>, Vec<u32>) {
    let num_leaves: u32 = weight_words.iter().map(|w| w.count_ones()).sum();
    let mut breadths = vec![0u32; num_levels as usize];
    let mut leaves_flat = vec![0u32; num_leaves as usize];

    let mut location = 0usize;
    let top_level = num_levels - 1;
    for j in 0..num_levels {
        let bit = 1u64 << (top_level - j);
        for (i, &w) in weight_words.iter().enumerate() {
            if w & bit != 0 {
                leaves_flat[location] = i as u32;
                location += 1;
                breadths[j as usize] += 1;
            }
        }
    }
    (breadths, leaves_flat)
}
