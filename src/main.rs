use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[macro_use]
extern crate text_io;

use tilecraft::lexicon::{alphagram, Lexicon};
use tilecraft::prime::{prime_arrangements, MAX_ARRANGED_DIGITS};
use tilecraft::rules::RuleSet;
use tilecraft::stats::WordSet;

use crate::config::Config;

mod config;

/// Prints the leave estimate and the anagrams of a rack
fn report_rack(lexicon: &Lexicon, rules: &RuleSet, word_set: &WordSet, rack: &str) {
    let estimate = word_set.evaluate_rack(rack);
    println!(
        "Leave: {:.1} words on average ({:.2}x an empty leave of {:.1})",
        estimate.mean_words, estimate.relative, estimate.baseline
    );

    if !rules.is_word_playable(rack) {
        println!("{} cannot be drawn from this bag", rack.to_uppercase());
        return;
    }
    match lexicon.anagrams(&alphagram(rack)) {
        Some(words) => {
            for word in words {
                println!(
                    "  {:<15} p={:.3e} rank={:.2}",
                    word,
                    word_set.estimated_probability(word),
                    word_set.relative_probability(word)
                );
            }
        }
        None => println!("  no anagrams"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let lexicon = Lexicon::load(&config.lexicon_path)
        .with_context(|| format!("failed to load lexicon {}", config.lexicon_path))?;
    let rules = config.load_rules()?;
    let word_set = WordSet::new(&lexicon, &rules).with_trials(config.leave_trials);
    tracing::info!("Ready with {} words, rules {:?}", lexicon.len(), rules.description);

    loop {
        println!("Enter Rack (digits for primes, empty line to quit):");
        let line: String = read!("{}\n");
        let rack = line.trim();
        if rack.is_empty() {
            break;
        }
        if rack.chars().all(|c| c.is_ascii_digit()) {
            if rack.len() > MAX_ARRANGED_DIGITS {
                println!("At most {} digits can be rearranged", MAX_ARRANGED_DIGITS);
            } else {
                println!("Primes: {:?}", prime_arrangements(rack));
            }
        } else {
            report_rack(&lexicon, &rules, &word_set, rack);
        }
    }
    Ok(())
}
