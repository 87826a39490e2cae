// tests/keyphrases.rs
use std::collections::HashSet;

use social_tagger::{extract_keyphrases, normalize, TaggerConfig};

fn no_stopwords() -> HashSet<String> {
    HashSet::new()
}

#[test]
fn tie_break_law_alpha_before_beta() {
    let text = normalize("alpha beta alpha gamma beta");
    let got = extract_keyphrases(&text, &no_stopwords(), 4);
    assert_eq!(got.len(), 4);
    assert_eq!(&got[..3], &["alpha", "beta", "gamma"]);
    // bigrams all have count 1 and come after gamma; first one seen wins
    assert_eq!(got[3], "alpha beta");
}

#[test]
fn deterministic_across_calls() {
    let cfg = TaggerConfig::default();
    let text = normalize(
        "Wind assisted ships save fuel. Rotor sails and wing sails save fuel on long routes; \
         wing sails need crew training and port clearance.",
    );
    let first = extract_keyphrases(&text, &cfg.stopwords, 8);
    for _ in 0..20 {
        assert_eq!(extract_keyphrases(&text, &cfg.stopwords, 8), first);
    }
    assert_eq!(first[0], "sails");
}

#[test]
fn default_stopwords_are_dropped() {
    let cfg = TaggerConfig::default();
    let text = normalize("The ship and the crew were there with their captain");
    let got = extract_keyphrases(&text, &cfg.stopwords, 10);
    for sw in ["the", "and", "were", "there", "with", "their"] {
        assert!(!got.iter().any(|k| k.split(' ').any(|w| w == sw)), "{sw} leaked: {got:?}");
    }
    assert_eq!(&got[..3], &["ship", "crew", "captain"]);
}

#[test]
fn empty_input_gives_empty_list() {
    assert!(extract_keyphrases(&normalize(""), &no_stopwords(), 5).is_empty());
}

#[test]
fn default_stopwords_filter_profanity() {
    let cfg = TaggerConfig::default();
    let text = normalize("Fucking wanker, balls PUNCH cunts!");
    assert!(extract_keyphrases(&text, &cfg.stopwords, 8).is_empty());

    let text = normalize("fuck this crew");
    assert_eq!(extract_keyphrases(&text, &cfg.stopwords, 8), vec!["crew"]);
}
