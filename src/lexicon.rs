use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fst::{Automaton, IntoStreamer, Set, Streamer};
use thiserror::Error;

/// Lines starting with this marker are ignored by the loader
const COMMENT_MARKER: &str = "//";

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to build lexicon word set: {0}")]
    Fst(#[from] fst::Error),
}

/// Returns the canonical sorted-letter form of a word
pub fn alphagram(word: &str) -> String {
    let mut chars = word.to_uppercase().chars().collect::<Vec<_>>();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Word list with per-word score adjustments and an anagram index.
///
/// The word set is an ordered `fst::Set`, the anagram index is built once
/// when the lexicon is constructed and never changes afterwards.
pub struct Lexicon {
    words: Set<Vec<u8>>,
    adjustments: HashMap<String, i32>,
    // Words grouped by their alphagram
    anagrams: HashMap<String, BTreeSet<String>>,
}

impl Lexicon {
    /// Builds a lexicon from already-normalized words and their adjustments
    fn build(words: BTreeSet<String>, adjustments: HashMap<String, i32>) -> Result<Self, LexiconError> {
        let mut anagrams: HashMap<String, BTreeSet<String>> = HashMap::new();
        for word in words.iter() {
            anagrams
                .entry(alphagram(word))
                .or_default()
                .insert(word.clone());
        }
        let words = Set::from_iter(words)?;

        Ok(Self {
            words,
            adjustments,
            anagrams,
        })
    }

    /// Parses a line-oriented word list. Each line holds one word with an optional
    /// `,<integer>` score adjustment. Blank lines and `//` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, LexiconError> {
        Self::from_lines(text.lines().map(|l| Ok(l.to_string())))
    }

    /// Load a lexicon from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let lexicon = Self::from_lines(reader.lines())?;
        tracing::info!(
            "Loaded {} words from {}",
            lexicon.len(),
            path.as_ref().display()
        );
        Ok(lexicon)
    }

    fn from_lines<I>(lines: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = std::io::Result<String>>,
    {
        let mut words = BTreeSet::new();
        let mut adjustments = HashMap::new();

        for (line_no, line) in lines.into_iter().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_MARKER) {
                continue;
            }

            let (word, adjustment) = match line.split_once(',') {
                Some((word, adj)) => match adj.trim().parse::<i32>() {
                    Ok(adj) => (word.trim(), adj),
                    Err(e) => {
                        tracing::warn!("Skipping lexicon line {}: bad adjustment {:?} ({})", line_no + 1, adj, e);
                        continue;
                    }
                },
                None => (line, 0),
            };

            let word = word.to_uppercase();
            if word.is_empty() || !word.chars().all(char::is_alphabetic) {
                tracing::warn!("Skipping lexicon line {}: {:?} is not a word", line_no + 1, line);
                continue;
            }

            if adjustment != 0 {
                *adjustments.entry(word.clone()).or_insert(0) += adjustment;
            }
            words.insert(word);
        }

        Self::build(words, adjustments)
    }

    /// Union of several lexicons. Adjustments for words present in more than
    /// one input are summed.
    pub fn combine(lexicons: &[&Lexicon]) -> Result<Self, LexiconError> {
        let mut words = BTreeSet::new();
        let mut adjustments: HashMap<String, i32> = HashMap::new();
        for lexicon in lexicons {
            words.extend(lexicon.words());
            for (word, adj) in lexicon.adjustments.iter() {
                *adjustments.entry(word.clone()).or_insert(0) += adj;
            }
        }
        Self::build(words, adjustments)
    }

    /// Check if a word exists in the lexicon
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word.to_uppercase())
    }

    /// Words whose sorted letters are exactly the given alphagram
    pub fn anagrams(&self, letters: &str) -> Option<&BTreeSet<String>> {
        self.anagrams.get(&alphagram(letters))
    }

    /// Score delta attached to a word, 0 when there is none
    pub fn adjustment(&self, word: &str) -> i32 {
        self.adjustments
            .get(&word.to_uppercase())
            .copied()
            .unwrap_or(0)
    }

    /// All words in lexicographic order
    pub fn words(&self) -> Vec<String> {
        let mut stream = self.words.stream();
        let mut words = Vec::with_capacity(self.len());
        while let Some(key) = stream.next() {
            words.push(String::from_utf8_lossy(key).into_owned());
        }
        words
    }

    /// Words starting with the given prefix, in order
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_uppercase();
        let matcher = fst::automaton::Str::new(&prefix).starts_with();
        let mut stream = self.words.search(matcher).into_stream();
        let mut words = Vec::new();
        while let Some(key) = stream.next() {
            words.push(String::from_utf8_lossy(key).into_owned());
        }
        words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
