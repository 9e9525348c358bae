use std::collections::{HashMap, HashSet};

use once_cell::sync::OnceCell;
use rayon::prelude::*;
use tracing::info;

use crate::lexicon::{alphagram, Lexicon};
use crate::rules::{RuleSet, BLANK};

use super::leave::Tally;
use super::{DEFAULT_TRIALS, MAX_EXPANDED_BLANKS};

fn choose(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Letter counts of a full bag
#[derive(Debug, Clone)]
struct Distribution {
    counts: HashMap<char, usize>,
    blanks: usize,
    total: usize,
}

impl Distribution {
    /// Chance that `word.len()` tiles drawn from a full bag spell the word in
    /// some order. Blanks cover any letter the bag runs short of. Draw order and
    /// the rest of the rack are ignored, so this is only an estimate.
    fn probability(&self, word: &str) -> f64 {
        let len = word.chars().count();
        if len == 0 || len > self.total {
            return 0.0;
        }
        let mut needed: HashMap<char, usize> = HashMap::new();
        for c in word.chars() {
            *needed.entry(c).or_insert(0) += 1;
        }

        let mut ways = 1.0;
        let mut short = 0;
        for (letter, &k) in needed.iter() {
            let n = self.counts.get(letter).copied().unwrap_or(0);
            if k > n {
                short += k - n;
            } else {
                ways *= choose(n, k);
            }
        }
        if short > self.blanks {
            return 0.0;
        }
        ways * choose(self.blanks, short) / choose(self.total, len)
    }
}

/// Alphagram with the letters at `skip` replaced by trailing blank markers
fn wildcard_key(letters: &[char], skip: &[usize]) -> String {
    let mut key: String = letters
        .iter()
        .enumerate()
        .filter(|(i, _)| !skip.contains(i))
        .map(|(_, &c)| c)
        .collect();
    key.extend(std::iter::repeat(BLANK).take(skip.len()));
    key
}

/// Statistics derived once from a lexicon and a rule set: per-word draw
/// probability, a length-ranked relative probability and the leave evaluator.
pub struct WordSet {
    /// Monte Carlo trials per rack evaluation
    pub trials: usize,
    pub(super) rack_size: usize,
    /// Every tile of a full bag
    pub(super) pool: Vec<char>,
    distribution: Distribution,
    estimates: HashMap<String, f64>,
    // lexicon estimates grouped by word length, ascending
    by_length: HashMap<usize, Vec<f64>>,
    // keyed by alphagram with up to MAX_EXPANDED_BLANKS letters swapped for blanks
    wildcards: HashMap<String, Vec<u32>>,
    pub(super) baseline: OnceCell<f64>,
}

impl WordSet {
    pub fn new(lexicon: &Lexicon, rules: &RuleSet) -> Self {
        let mut counts = HashMap::new();
        let mut pool = Vec::with_capacity(rules.total_tiles());
        for (letter, spec) in rules.tiles() {
            if letter != BLANK {
                counts.insert(letter, spec.count);
            }
            pool.extend(std::iter::repeat(letter).take(spec.count));
        }
        let distribution = Distribution {
            counts,
            blanks: rules.count(BLANK),
            total: pool.len(),
        };

        let words = lexicon.words();
        let estimates: HashMap<String, f64> = words
            .par_iter()
            .map(|w| (w.clone(), distribution.probability(w)))
            .collect();

        let mut by_length: HashMap<usize, Vec<f64>> = HashMap::new();
        for (word, &p) in estimates.iter() {
            by_length.entry(word.chars().count()).or_default().push(p);
        }
        for group in by_length.values_mut() {
            group.sort_by(|a, b| a.total_cmp(b));
        }

        let wildcards = Self::build_wildcards(&words, rules.rack_size);
        info!(
            "Built word statistics for {} words ({} rack keys)",
            estimates.len(),
            wildcards.len()
        );

        Self {
            trials: DEFAULT_TRIALS,
            rack_size: rules.rack_size,
            pool,
            distribution,
            estimates,
            by_length,
            wildcards,
            baseline: OnceCell::new(),
        }
    }

    /// Sets the trial count used by the leave evaluator
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    fn build_wildcards(words: &[String], rack_size: usize) -> HashMap<String, Vec<u32>> {
        let mut wildcards: HashMap<String, Vec<u32>> = HashMap::new();
        for (id, word) in words.iter().enumerate() {
            let len = word.len();
            if len == 0 || len > rack_size || !word.bytes().all(|b| b.is_ascii_uppercase()) {
                continue;
            }
            let letters: Vec<char> = alphagram(word).chars().collect();
            let mut keys = HashSet::new();
            keys.insert(wildcard_key(&letters, &[]));
            for i in 0..len {
                keys.insert(wildcard_key(&letters, &[i]));
                for j in i + 1..len {
                    keys.insert(wildcard_key(&letters, &[i, j]));
                }
            }
            for key in keys {
                wildcards.entry(key).or_default().push(id as u32);
            }
        }
        wildcards
    }

    pub fn estimated_probability(&self, word: &str) -> f64 {
        let word = word.to_uppercase();
        match self.estimates.get(&word) {
            Some(&p) => p,
            None => self.distribution.probability(&word),
        }
    }

    /// Position of the word's estimate among lexicon words of the same length,
    /// from 0 (rarest) to 1 (commonest). Tied words, anagrams included, all take
    /// the highest rank of their tie, so the commonest family and a word alone
    /// in its length score 1. Words that cannot be drawn at all are 0. Words
    /// outside the lexicon score the share of lexicon words they match or beat.
    pub fn relative_probability(&self, word: &str) -> f64 {
        let word = word.to_uppercase();
        let (estimate, known) = match self.estimates.get(&word) {
            Some(&p) => (p, true),
            None => (self.distribution.probability(&word), false),
        };
        if estimate <= 0.0 {
            return 0.0;
        }
        let Some(group) = self.by_length.get(&word.chars().count()) else {
            return 0.0;
        };
        // lexicon words at or below the estimate
        let reached = group.partition_point(|&p| p <= estimate);
        if !known {
            return reached as f64 / group.len() as f64;
        }
        if group.len() <= 1 {
            return 1.0;
        }
        (reached - 1) as f64 / (group.len() - 1) as f64
    }

    /// Number of distinct lexicon words that can be spelled from the tally,
    /// with each of up to two blanks standing for any letter
    pub fn words_formable(&self, tally: &Tally) -> usize {
        let blanks = tally.n_blanks.min(MAX_EXPANDED_BLANKS) as usize;
        let mut found = HashSet::new();
        for sub in tally.sub_alphagrams() {
            for j in 0..=blanks {
                if sub.is_empty() && j == 0 {
                    continue;
                }
                let mut key = sub.clone();
                key.extend(std::iter::repeat(BLANK).take(j));
                if let Some(ids) = self.wildcards.get(&key) {
                    found.extend(ids.iter().copied());
                }
            }
        }
        found.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_set() -> WordSet {
        let lexicon = Lexicon::parse("CAT\nACT\nAT\nTA\nEAT\nZZZ").unwrap();
        WordSet::new(&lexicon, &RuleSet::classic())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_estimated_probability() {
        let ws = word_set();
        // 9 A and 6 T out of 100 tiles
        assert!(close(ws.estimated_probability("at"), 54.0 / 4950.0));
        // one Z, two blanks cover the rest
        assert!(close(ws.estimated_probability("ZZZ"), 1.0 / 161_700.0));
        assert_eq!(ws.estimated_probability("ZZZZ"), 0.0);
        assert_eq!(ws.estimated_probability(""), 0.0);
    }

    #[test]
    fn test_relative_probability_by_length() {
        let ws = word_set();
        // EAT 648 ways, CAT and ACT 108, ZZZ 1
        assert_eq!(ws.relative_probability("EAT"), 1.0);
        assert!(close(ws.relative_probability("CAT"), 2.0 / 3.0));
        assert_eq!(ws.relative_probability("ACT"), ws.relative_probability("CAT"));
        assert_eq!(ws.relative_probability("ZZZ"), 0.0);
        // AT and TA tie as the only 2 letter words
        assert_eq!(ws.relative_probability("AT"), 1.0);
        assert_eq!(ws.relative_probability("ta"), 1.0);
    }

    #[test]
    fn test_commonest_anagram_family_ranks_top() {
        let lexicon = Lexicon::parse("EAT\nTEA\nATE\nCAT\nZZZ\nQI").unwrap();
        let ws = WordSet::new(&lexicon, &RuleSet::classic());
        for word in ["EAT", "TEA", "ATE"] {
            assert_eq!(ws.relative_probability(word), 1.0, "{}", word);
        }
        // ZZZ, CAT, then the three anagrams
        assert_eq!(ws.relative_probability("CAT"), 0.25);
        assert_eq!(ws.relative_probability("ZZZ"), 0.0);
        // alone in its length
        assert_eq!(ws.relative_probability("QI"), 1.0);
    }

    #[test]
    fn test_relative_probability_outside_lexicon() {
        let ws = word_set();
        // TEE has 396 ways, at or above three of the four 3 letter words
        assert_eq!(ws.relative_probability("TEE"), 0.75);
        // ties with CAT and ACT
        assert_eq!(ws.relative_probability("TAC"), 0.75);
        assert_eq!(ws.relative_probability("QQQQ"), 0.0);
        // no 5 letter words to rank against
        assert_eq!(ws.relative_probability("TEETH"), 0.0);
    }

    #[test]
    fn test_words_formable() {
        let ws = word_set();
        let count = |rack: &str| ws.words_formable(&Tally::parse(rack).unwrap());
        assert_eq!(count("CAT"), 4);
        assert_eq!(count("CA?"), 4);
        // ZZZ plus any two letter word
        assert_eq!(count("Z??"), 3);
        assert_eq!(count("CATEEII"), 5);
        assert_eq!(count(""), 0);
    }
}
