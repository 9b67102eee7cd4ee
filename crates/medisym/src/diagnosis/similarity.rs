//! Ratcliff/Obershelp similarity over Unicode characters.
//!
//! The ratio is `2 * M / T`, where `T` is the combined length of both inputs
//! and `M` the number of characters covered by the recursively selected
//! longest matching blocks. Block selection prefers the earliest block in the
//! first sequence, then the earliest in the second, so results are stable for
//! a fixed pair of inputs.

use std::collections::HashMap;

/// Sequences at least this long have their over-represented characters
/// ignored while seeding candidate blocks.
const POPULAR_ELEMENT_MIN_LEN: usize = 200;

/// Similarity of `a` and `b` in `[0, 1]`. Two empty strings are identical.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matches = SequenceIndex::new(&b).matching_characters(&a);
    2.0 * matches as f64 / total as f64
}

struct SequenceIndex<'b> {
    b: &'b [char],
    positions: HashMap<char, Vec<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    a_start: usize,
    b_start: usize,
    size: usize,
}

impl<'b> SequenceIndex<'b> {
    fn new(b: &'b [char]) -> Self {
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (index, ch) in b.iter().enumerate() {
            positions.entry(*ch).or_default().push(index);
        }

        if b.len() >= POPULAR_ELEMENT_MIN_LEN {
            let limit = b.len() / 100 + 1;
            positions.retain(|_, indices| indices.len() <= limit);
        }

        Self { b, positions }
    }

    fn matching_characters(&self, a: &[char]) -> usize {
        let mut pending = vec![(0, a.len(), 0, self.b.len())];
        let mut matched = 0;

        while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
            let block = self.longest_match(a, a_lo, a_hi, b_lo, b_hi);
            if block.size == 0 {
                continue;
            }

            matched += block.size;
            if a_lo < block.a_start && b_lo < block.b_start {
                pending.push((a_lo, block.a_start, b_lo, block.b_start));
            }
            let a_end = block.a_start + block.size;
            let b_end = block.b_start + block.size;
            if a_end < a_hi && b_end < b_hi {
                pending.push((a_end, a_hi, b_end, b_hi));
            }
        }

        matched
    }

    fn longest_match(
        &self,
        a: &[char],
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> Block {
        let mut best = Block {
            a_start: a_lo,
            b_start: b_lo,
            size: 0,
        };

        // run_ending_at[j]: length of the common run ending at a[i - 1], b[j].
        let mut run_ending_at: HashMap<usize, usize> = HashMap::new();
        for (i, ch) in a.iter().enumerate().take(a_hi).skip(a_lo) {
            let mut next_runs = HashMap::new();
            if let Some(indices) = self.positions.get(ch) {
                for &j in indices {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        break;
                    }
                    let previous = if j > 0 {
                        run_ending_at.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let run = previous + 1;
                    next_runs.insert(j, run);
                    if run > best.size {
                        best = Block {
                            a_start: i + 1 - run,
                            b_start: j + 1 - run,
                            size: run,
                        };
                    }
                }
            }
            run_ending_at = next_runs;
        }

        // Grow the block over characters skipped by the popular-element filter.
        while best.a_start > a_lo
            && best.b_start > b_lo
            && a[best.a_start - 1] == self.b[best.b_start - 1]
        {
            best.a_start -= 1;
            best.b_start -= 1;
            best.size += 1;
        }
        while best.a_start + best.size < a_hi
            && best.b_start + best.size < b_hi
            && a[best.a_start + best.size] == self.b[best.b_start + best.size]
        {
            best.size += 1;
        }

        best
    }
}
