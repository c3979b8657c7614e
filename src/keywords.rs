//! Keyword lookup of blink links.
//!
//! Analysis records carry their dominant words either as `top_words`
//! (`[[word, count], ...]`, most frequent first) or as a single
//! `most_common_word`. A record maps to a blink when one of those words is a
//! known keyword.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::SourceRecord;

const KEYWORD_PORTS: &[(&str, u16)] = &[
    ("superteam", 3001),
    ("superteamtr", 3001),
    ("earn", 3001),
    ("zk-lokomotive", 3000),
    ("zk", 3000),
    ("lokomotive", 3000),
    ("solana", 3002),
    ("ethereum", 3003),
    ("bitcoin", 3004),
    ("polkadot", 3005),
    ("cardano", 3006),
    ("defi", 3007),
    ("nft", 3008),
    ("dao", 3009),
];

/// Dialect developer link for a local action server
pub fn action_link(port: u16) -> String {
    format!(
        "https://dial.to/developer?url=http://localhost:{}/api/action&cluster=mainnet",
        port
    )
}

/// Keyword that resolved to a blink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlinkHit {
    pub keyword: String,
    pub link: String,
}

/// Keyword -> blink link table, keys lower-case
#[derive(Debug, Clone)]
pub struct BlinkLinkTable {
    links: BTreeMap<String, String>,
}

impl BlinkLinkTable {
    pub fn new(links: BTreeMap<String, String>) -> Self {
        let links = links
            .into_iter()
            .map(|(keyword, link)| (keyword.to_lowercase(), link))
            .collect();
        Self { links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.links.get(&keyword.to_lowercase()).map(String::as_str)
    }

    /// First `top_words` entry with a link, else `most_common_word`
    pub fn find(&self, record: &SourceRecord) -> Option<BlinkHit> {
        let from_top_words = top_words(record)
            .into_iter()
            .find_map(|(word, _)| self.hit(&word));

        from_top_words.or_else(|| {
            record
                .get("most_common_word")
                .and_then(Value::as_str)
                .and_then(|word| self.hit(word))
        })
    }

    /// Share of `top_words` occurrences that are known keywords (0.0 - 1.0)
    pub fn relevance(&self, record: &SourceRecord) -> f64 {
        let words = top_words(record);
        let total: f64 = words.iter().map(|(_, count)| count).sum();
        if total <= 0.0 {
            return 0.0;
        }

        let relevant: f64 = words
            .iter()
            .filter(|(word, _)| self.get(word).is_some())
            .map(|(_, count)| count)
            .sum();

        relevant / total
    }

    fn hit(&self, word: &str) -> Option<BlinkHit> {
        let keyword = word.to_lowercase();
        self.links.get(&keyword).map(|link| BlinkHit {
            link: link.clone(),
            keyword,
        })
    }
}

impl Default for BlinkLinkTable {
    fn default() -> Self {
        Self::new(
            KEYWORD_PORTS
                .iter()
                .map(|(keyword, port)| (keyword.to_string(), action_link(*port)))
                .collect(),
        )
    }
}

/// `[[word, count], ...]` pairs; malformed entries are skipped.
/// Counts may be any JSON number.
fn top_words(record: &SourceRecord) -> Vec<(String, f64)> {
    let Some(entries) = record.get("top_words").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let pair = entry.as_array()?;
            let word = pair.first()?.as_str()?;
            let count = pair.get(1).and_then(Value::as_f64).unwrap_or(0.0);
            Some((word.to_string(), count))
        })
        .collect()
}
