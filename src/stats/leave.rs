// Monte Carlo leave evaluation. A leave is completed to a full rack with
// random draws from a fresh bag, then the distinct lexicon words formable
// from the completed rack are counted and averaged over the trials.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::rules::BLANK;

use super::word_set::WordSet;

/// Letter histogram of a (partial) rack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    /// Count of each letter A-Z
    pub letters: [u8; 26],
    pub n_blanks: u8,
    /// Letters plus blanks
    pub n_total: usize,
}

impl Tally {
    pub fn empty() -> Self {
        Self {
            letters: [0; 26],
            n_blanks: 0,
            n_total: 0,
        }
    }

    /// Reads rack text such as `"AEI?"`. Whitespace is ignored. Characters that
    /// are neither a letter nor the blank marker, or more than 255 copies of one
    /// tile, are rejected.
    pub fn parse(rack: &str) -> Option<Self> {
        let mut tally = Self::empty();
        for c in rack.chars().filter(|c| !c.is_whitespace()) {
            let c = c.to_ascii_uppercase();
            if c != BLANK && !c.is_ascii_uppercase() {
                return None;
            }
            if !tally.add_inplace(c) {
                return None;
            }
        }
        Some(tally)
    }

    /// Adds one tile. Returns false, leaving the tally unchanged, for letters
    /// outside A-Z or when the letter's counter is full.
    pub fn add_inplace(&mut self, letter: char) -> bool {
        let slot = if letter == BLANK {
            &mut self.n_blanks
        } else if letter.is_ascii_uppercase() {
            &mut self.letters[(letter as u8 - b'A') as usize]
        } else {
            return false;
        };
        match slot.checked_add(1) {
            Some(count) => *slot = count,
            None => return false,
        }
        self.n_total += 1;
        true
    }

    /// Removes one tile, false if the tally does not hold it
    pub fn remove_inplace(&mut self, letter: char) -> bool {
        let slot = if letter == BLANK {
            &mut self.n_blanks
        } else if letter.is_ascii_uppercase() {
            &mut self.letters[(letter as u8 - b'A') as usize]
        } else {
            return false;
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        self.n_total -= 1;
        true
    }

    /// Tiles of `pool` left over once this tally has been taken out of it,
    /// None when the pool cannot supply the tally
    pub fn remaining(&self, pool: &[char]) -> Option<Vec<char>> {
        let mut owed = self.clone();
        let rest: Vec<char> = pool
            .iter()
            .copied()
            .filter(|&c| !owed.remove_inplace(c))
            .collect();
        (owed.n_total == 0).then_some(rest)
    }

    /// Alphagrams of every distinct sub-multiset of the letters, blanks excluded
    pub fn sub_alphagrams(&self) -> Vec<String> {
        let mut subsets = vec![String::new()];
        for (i, &n) in self.letters.iter().enumerate() {
            if n == 0 {
                continue;
            }
            let letter = (b'A' + i as u8) as char;
            let mut next = Vec::with_capacity(subsets.len() * (n as usize + 1));
            for prefix in subsets.iter() {
                for k in 0..=n as usize {
                    let mut s = prefix.clone();
                    s.extend(std::iter::repeat(letter).take(k));
                    next.push(s);
                }
            }
            subsets = next;
        }
        subsets
    }
}

impl std::iter::FromIterator<char> for Tally {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let mut tally = Self::empty();
        iter.into_iter().for_each(|c| {
            tally.add_inplace(c);
        });
        tally
    }
}

/// Outcome of a rack evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeaveEstimate {
    /// Average distinct words formable from the completed rack
    pub mean_words: f64,
    /// The same average for an empty leave
    pub baseline: f64,
    /// `mean_words / baseline`, 0 when the baseline is 0
    pub relative: f64,
}

impl WordSet {
    /// Evaluates a leave with a fresh random seed
    pub fn evaluate_rack(&self, rack: &str) -> LeaveEstimate {
        self.evaluate_rack_with_seed(rack, rand::thread_rng().gen())
    }

    /// Evaluates a leave. Trial `i` draws from `StdRng::seed_from_u64(seed + i)`,
    /// so a given seed always produces the same estimate. A rack that cannot
    /// come out of the bag, or that is longer than a rack, scores 0.
    pub fn evaluate_rack_with_seed(&self, rack: &str, seed: u64) -> LeaveEstimate {
        let baseline = *self
            .baseline
            .get_or_init(|| self.mean_words(&Tally::empty(), seed));
        let mean_words = match Tally::parse(rack) {
            Some(leave) => self.mean_words(&leave, seed),
            None => {
                debug!("Unreadable rack {:?}", rack);
                0.0
            }
        };
        let relative = if baseline > 0.0 {
            mean_words / baseline
        } else {
            0.0
        };
        LeaveEstimate {
            mean_words,
            baseline,
            relative,
        }
    }

    /// Average words formable from an empty leave, computed once
    pub fn baseline(&self) -> f64 {
        *self
            .baseline
            .get_or_init(|| self.mean_words(&Tally::empty(), rand::thread_rng().gen()))
    }

    fn mean_words(&self, leave: &Tally, seed: u64) -> f64 {
        if self.trials == 0 || leave.n_total > self.rack_size {
            return 0.0;
        }
        let Some(bag) = leave.remaining(&self.pool) else {
            debug!("Leave {:?} cannot be drawn from a full bag", leave);
            return 0.0;
        };
        let draws = (self.rack_size - leave.n_total).min(bag.len());

        let total: usize = (0..self.trials)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                let mut rack = leave.clone();
                for idx in index::sample(&mut rng, bag.len(), draws).into_iter() {
                    rack.add_inplace(bag[idx]);
                }
                self.words_formable(&rack)
            })
            .sum();
        total as f64 / self.trials as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::rules::RuleSet;

    fn word_set(trials: usize) -> WordSet {
        let lexicon = Lexicon::parse("CAT\nACT\nAT\nTA\nEAT\nZZZ\nQI").unwrap();
        WordSet::new(&lexicon, &RuleSet::classic()).with_trials(trials)
    }

    #[test]
    fn test_tally_parse() {
        let tally = Tally::parse("ca t?").unwrap();
        assert_eq!(tally.n_total, 4);
        assert_eq!(tally.n_blanks, 1);
        assert_eq!(tally.letters[2], 1);
        assert!(Tally::parse("CA1").is_none());
        assert_eq!("AAB".chars().collect::<Tally>().letters[0], 2);
    }

    #[test]
    fn test_sub_alphagrams() {
        let subs = Tally::parse("AAB").unwrap().sub_alphagrams();
        assert_eq!(subs, vec!["", "B", "A", "AB", "AA", "AAB"]);
        assert_eq!(Tally::empty().sub_alphagrams(), vec![""]);
    }

    #[test]
    fn test_remaining() {
        let pool: Vec<char> = "AABZ".chars().collect();
        let rest = Tally::parse("AZ").unwrap().remaining(&pool).unwrap();
        assert_eq!(rest, vec!['A', 'B']);
        assert!(Tally::parse("ZZ").unwrap().remaining(&pool).is_none());
    }

    #[test]
    fn test_full_rack_needs_no_draws() {
        let ws = word_set(16);
        let estimate = ws.evaluate_rack_with_seed("CATEEII", 1);
        assert_eq!(estimate.mean_words, 5.0);
    }

    #[test]
    fn test_seeded_evaluation_is_repeatable() {
        let ws = word_set(200);
        let a = ws.evaluate_rack_with_seed("QI", 42);
        let b = ws.evaluate_rack_with_seed("QI", 42);
        assert_eq!(a, b);
        // QI is always formable
        assert!(a.mean_words >= 1.0);
        assert!(a.baseline > 0.0);
        assert_eq!(a.relative, a.mean_words / a.baseline);
    }

    #[test]
    fn test_impossible_racks_score_zero() {
        let ws = word_set(50);
        // one Q in the bag
        assert_eq!(ws.evaluate_rack_with_seed("QQ", 3).mean_words, 0.0);
        // longer than a rack
        assert_eq!(ws.evaluate_rack_with_seed("AAAAAAAA", 3).mean_words, 0.0);
        assert_eq!(ws.evaluate_rack_with_seed("A#", 3).mean_words, 0.0);
    }

    #[test]
    fn test_oversized_rack_text() {
        assert!(Tally::parse(&"A".repeat(255)).is_some());
        assert!(Tally::parse(&"A".repeat(256)).is_none());
        assert!(Tally::parse(&"?".repeat(300)).is_none());

        let mut tally = Tally::parse(&"Z".repeat(255)).unwrap();
        assert!(!tally.add_inplace('Z'));
        assert_eq!(tally.n_total, 255);

        let ws = word_set(10);
        assert_eq!(ws.evaluate_rack_with_seed(&"A".repeat(256), 1).mean_words, 0.0);
        assert_eq!(ws.evaluate_rack_with_seed(&"AB".repeat(200), 1).mean_words, 0.0);
    }

    #[test]
    fn test_baseline_is_cached() {
        let ws = word_set(50);
        let first = ws.baseline();
        assert_eq!(ws.baseline(), first);
        assert_eq!(ws.evaluate_rack_with_seed("", 9).baseline, first);
    }
}
