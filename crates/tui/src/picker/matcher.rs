//! Query scoring for picker items.
//!
//! Higher is better; `None` excludes the item. Label hits always outrank
//! meta/search-text hits, and any substring hit outranks a fuzzy one. All
//! fuzzy hits share one score so their order stays the source order.

use nucleo_matcher::{
    Config, Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

use super::PickerItem;

/// How the query is matched against item text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    Substring,
    /// Substring hits, plus fuzzy hits at the lowest score.
    Fuzzy,
}

impl From<tally_config::MatchModeSetting> for MatchMode {
    fn from(setting: tally_config::MatchModeSetting) -> Self {
        match setting {
            tally_config::MatchModeSetting::Substring => Self::Substring,
            tally_config::MatchModeSetting::Fuzzy => Self::Fuzzy,
        }
    }
}

const LABEL_PREFIX: u8 = 6;
const LABEL_WORD: u8 = 5;
const LABEL_SUBSTRING: u8 = 4;
const OTHER_PREFIX: u8 = 3;
const OTHER_WORD: u8 = 2;
const OTHER_SUBSTRING: u8 = 1;
const FUZZY: u8 = 0;

/// Scores items against one query. Build once per refilter.
pub struct QueryScorer {
    query: String,
    fuzzy: Option<(Pattern, Matcher)>,
    buf: Vec<char>,
}

impl QueryScorer {
    pub fn new(query: &str, mode: MatchMode) -> Self {
        let query = query.trim().to_lowercase();
        let fuzzy = (mode == MatchMode::Fuzzy && !query.is_empty()).then(|| {
            (
                Pattern::parse(&query, CaseMatching::Ignore, Normalization::Smart),
                Matcher::new(Config::DEFAULT),
            )
        });
        Self {
            query,
            fuzzy,
            buf: Vec::new(),
        }
    }

    pub fn score(&mut self, item: &PickerItem) -> Option<u8> {
        if self.query.is_empty() {
            return Some(FUZZY);
        }

        let label = item.label.to_lowercase();
        if let Some(s) =
            substring_score(&label, &self.query, [LABEL_PREFIX, LABEL_WORD, LABEL_SUBSTRING])
        {
            return Some(s);
        }

        let others: Vec<String> = item
            .meta
            .iter()
            .chain(item.search.iter())
            .map(|text| text.to_lowercase())
            .collect();
        let best = others
            .iter()
            .filter_map(|text| {
                substring_score(text, &self.query, [OTHER_PREFIX, OTHER_WORD, OTHER_SUBSTRING])
            })
            .max();
        if best.is_some() {
            return best;
        }

        let (pattern, matcher) = self.fuzzy.as_mut()?;
        let buf = &mut self.buf;
        std::iter::once(&label)
            .chain(others.iter())
            .any(|text| pattern.score(Utf32Str::new(text, &mut *buf), &mut *matcher).is_some())
            .then_some(FUZZY)
    }
}

fn substring_score(text: &str, query: &str, [prefix, word, substring]: [u8; 3]) -> Option<u8> {
    if text.starts_with(query) {
        Some(prefix)
    } else if words(text).any(|w| w.starts_with(query)) {
        Some(word)
    } else if text.contains(query) {
        Some(substring)
    } else {
        None
    }
}

/// Words split on anything that is not alphanumeric.
pub(crate) fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}
