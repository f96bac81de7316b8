//! Word list for the typing game

use crate::config::TypingConstants;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Words shorter or longer than this (exclusive) are dropped
const MIN_LEN: usize = 3;
const MAX_LEN: usize = 15;

#[derive(Error, Debug)]
pub enum WordListError {
    #[error("Failed to read word list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Word list has no words longer than 3 and shorter than 15 letters")]
    Empty,
}

/// Lowercased words usable as typing targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn load(path: &Path) -> Result<Self, WordListError> {
        let content = fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let list = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), words = list.len(), "word list loaded");
        Ok(list)
    }

    /// Split newline-delimited text, keeping words with 3 < len < 15
    pub fn parse(content: &str) -> Result<Self, WordListError> {
        let words: Vec<String> = content
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|word| {
                let len = word.chars().count();
                len > MIN_LEN && len < MAX_LEN
            })
            .collect();

        if words.is_empty() {
            return Err(WordListError::Empty);
        }
        Ok(WordList { words })
    }

    /// The list shipped with the crate
    pub fn builtin() -> Result<Self, WordListError> {
        Self::parse(include_str!("../../config/words.txt"))
    }

    /// Load from `path` when given, otherwise use the built-in list
    pub fn resolve(path: Option<&Path>) -> Result<Self, WordListError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Draw a session's targets, mixing in confusing words
    pub fn generate_pool(&self, constants: &TypingConstants, rng: &mut impl Rng) -> Vec<String> {
        (0..constants.pool_size)
            .filter_map(|_| {
                let confusing = rng.gen_bool(constants.confusing_chance);
                if confusing {
                    constants.confusing_words.choose(rng).cloned()
                } else {
                    self.words.choose(rng).cloned()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_filters_and_lowercases() {
        let list = WordList::parse("Dojo\ntea\n  Lantern \nextraordinarily\nmonastery\n\n").unwrap();
        assert_eq!(list.words(), ["dojo", "lantern", "monastery"]);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(WordList::parse("a\nab\nabc\n"), Err(WordListError::Empty)));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = WordList::load(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, WordListError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_builtin_list() {
        let list = WordList::builtin().unwrap();
        assert!(list.len() > 50);
        assert!(list.words().iter().all(|w| w.len() > 3 && w.len() < 15));
        assert!(list.words().iter().all(|w| *w == w.to_lowercase()));
    }

    #[test]
    fn test_pool_size_and_sources() {
        let list = WordList::parse("panda\nnoodle\n").unwrap();
        let constants = TypingConstants::default();
        let mut rng = StdRng::seed_from_u64(5);

        let pool = list.generate_pool(&constants, &mut rng);

        assert_eq!(pool.len(), 15);
        for word in &pool {
            assert!(
                list.words().contains(word) || constants.confusing_words.contains(word),
                "unexpected word {}",
                word
            );
        }
    }

    #[test]
    fn test_pool_without_confusion() {
        let list = WordList::parse("panda\n").unwrap();
        let constants = TypingConstants {
            confusing_chance: 0.0,
            pool_size: 4,
            ..TypingConstants::default()
        };
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(list.generate_pool(&constants, &mut rng), vec!["panda"; 4]);
    }
}
