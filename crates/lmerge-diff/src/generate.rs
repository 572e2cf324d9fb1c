//! Seeded, reproducible line generation for tests.
//!
//! Lines are lowercase words with occasional inner spaces or tabs and
//! optional surrounding padding, so whitespace-insensitive comparison is
//! exercised without producing blank lines.

use lmerge_types::Sequence;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PADDING: &[char] = &[' ', '\t'];

/// Deterministic generator of random text lines.
pub struct LineGenerator {
    rng: StdRng,
}

impl LineGenerator {
    /// Create a generator; equal seeds yield equal output.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// One random line with at least eight letters.
    pub fn line(&mut self) -> String {
        let letters = self.rng.gen_range(8..40);
        let mut text = String::with_capacity(letters + 8);
        for _ in 0..self.rng.gen_range(0..3) {
            text.push(PADDING[self.rng.gen_range(0..PADDING.len())]);
        }
        for i in 0..letters {
            if i > 0 && self.rng.gen_bool(0.15) {
                text.push(PADDING[self.rng.gen_range(0..PADDING.len())]);
            }
            text.push(self.rng.gen_range(b'a'..=b'z') as char);
        }
        for _ in 0..self.rng.gen_range(0..3) {
            text.push(PADDING[self.rng.gen_range(0..PADDING.len())]);
        }
        text
    }

    /// `count` random lines.
    pub fn lines(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.line()).collect()
    }

    /// A sequence of `count` random lines.
    pub fn sequence(&mut self, count: usize) -> Sequence {
        Sequence::from_lines(self.lines(count))
    }

    /// A copy of `original` where each line is, with probability `rate`,
    /// replaced, deleted, or preceded by a fresh line.
    pub fn mutate(&mut self, original: &Sequence, rate: f64) -> Sequence {
        let mut out = Vec::with_capacity(original.len());
        for line in original {
            if !self.rng.gen_bool(rate) {
                out.push(line.text().to_string());
                continue;
            }
            match self.rng.gen_range(0..3) {
                0 => out.push(self.line()),
                1 => {}
                _ => {
                    out.push(self.line());
                    out.push(line.text().to_string());
                }
            }
        }
        if self.rng.gen_bool(rate) {
            out.push(self.line());
        }
        Sequence::from_lines(out)
    }
}
