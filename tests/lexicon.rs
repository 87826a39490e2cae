// tests/lexicon.rs
use std::collections::{BTreeMap, BTreeSet};

use social_tagger::{match_barriers, match_topics, normalize, TaggerConfig};

fn lexicon() -> BTreeMap<String, Vec<String>> {
    let mut m = BTreeMap::new();
    m.insert("economic".to_string(), vec!["subsidy".to_string(), "capex".to_string()]);
    m.insert("regulatory".to_string(), vec!["imo".to_string(), "permit".to_string()]);
    m
}

#[test]
fn barrier_example() {
    let text = normalize("the subsidy covers capex but imo permits are required");
    let got = match_barriers(&text, &lexicon());
    let want: BTreeSet<String> = ["economic", "regulatory"].into_iter().map(String::from).collect();
    assert_eq!(got, want);
}

#[test]
fn topic_example() {
    let text = normalize("wind propulsion cuts imo cost");
    assert_eq!(match_topics(&text, &["policy", "imo", "cost"]), vec!["imo", "cost"]);
}

#[test]
fn empty_text_matches_nothing() {
    let text = normalize("");
    assert!(match_topics(&text, &["policy", "imo"]).is_empty());
    assert!(match_barriers(&text, &lexicon()).is_empty());
}

#[test]
fn matching_ignores_markup_and_case() {
    let cfg = TaggerConfig::default();
    let text = normalize("<h2>New IMO <em>Regulation</em></h2> on CAPEX");
    assert_eq!(match_topics(&text, &cfg.topics), vec!["imo", "regulation"]);
    let tags = match_barriers(&text, &cfg.barriers);
    assert!(tags.contains("regulatory"));
    assert!(tags.contains("economic"));
    assert!(!tags.contains("operational"));
}

#[test]
fn default_topic_stems_match_inflections() {
    let cfg = TaggerConfig::default();
    let text = normalize("Subsidies for ports");
    assert_eq!(match_topics(&text, &cfg.topics), vec!["port", "subsid"]);
}
