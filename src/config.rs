use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tilecraft::rules::RuleSet;

/// Which rule set the session plays with
#[derive(Debug, Clone, PartialEq)]
pub enum RuleChoice {
    Classic,
    Super,
    File(PathBuf),
}

impl RuleChoice {
    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "classic" => RuleChoice::Classic,
            "super" => RuleChoice::Super,
            _ => RuleChoice::File(PathBuf::from(name)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub lexicon_path: String,
    pub rules: RuleChoice,
    pub leave_trials: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            lexicon_path: env::var("LEXICON_PATH").unwrap_or_else(|_| "./words.txt".to_string()),
            rules: RuleChoice::from_name(
                &env::var("RULESET").unwrap_or_else(|_| "classic".to_string()),
            ),
            leave_trials: env::var("LEAVE_TRIALS")
                .unwrap_or_else(|_| "200000".to_string())
                .parse()
                .context("LEAVE_TRIALS must be a number")?,
        })
    }

    pub fn load_rules(&self) -> Result<RuleSet> {
        match &self.rules {
            RuleChoice::Classic => Ok(RuleSet::classic()),
            RuleChoice::Super => Ok(RuleSet::super_board()),
            RuleChoice::File(path) => RuleSet::load(path)
                .with_context(|| format!("failed to load rule set {}", path.display())),
        }
    }
}
