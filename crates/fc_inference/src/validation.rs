//! Post-hoc checks on model output.
//!
//! The prompts ask for a fixed shape (sentence count, number of fallacies)
//! but nothing forces a model to comply. These checks measure what came
//! back so the pipeline can log or reject it.

use std::fmt;
use std::str::FromStr;

use fc_core::FallacyCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPolicy {
    Off,
    #[default]
    Warn,
    Enforce,
}

impl FromStr for FormatPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(FormatPolicy::Off),
            "warn" => Ok(FormatPolicy::Warn),
            "enforce" => Ok(FormatPolicy::Enforce),
            other => Err(format!(
                "Unknown format policy '{}'. Expected off, warn or enforce",
                other
            )),
        }
    }
}

impl fmt::Display for FormatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormatPolicy::Off => "off",
            FormatPolicy::Warn => "warn",
            FormatPolicy::Enforce => "enforce",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCheck {
    pub stage: &'static str,
    pub expected: usize,
    pub found: usize,
    pub ok: bool,
}

impl fmt::Display for FormatCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} expected {} but found {}",
            self.stage, self.expected, self.found
        )
    }
}

/// Titles and short forms that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "st", "jr", "sr", "prof", "gen", "gov", "sen", "rep", "vs",
];

/// Counts sentences ending in `.`, `!` or `?`. A terminator closes a
/// sentence when it is followed by the end of text, or by whitespace and a
/// character that is not lowercase. A period after an abbreviation ("Mr.")
/// or initials ("U.S.", "J.") never does. A trailing fragment without a
/// terminator counts as one.
pub fn count_sentences(text: &str) -> usize {
    let chars: Vec<char> = text.trim().chars().collect();
    let mut count = 0;
    let mut in_sentence = false;
    let mut word_start = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            word_start = i + 1;
        } else if matches!(c, '.' | '!' | '?') {
            let terminator = i;
            while i + 1 < chars.len() && matches!(chars[i + 1], '.' | '!' | '?' | '"' | '\'' | ')') {
                i += 1;
            }
            if in_sentence && ends_sentence(&chars, word_start, terminator, i + 1) {
                count += 1;
                in_sentence = false;
            }
        } else {
            in_sentence = true;
        }
        i += 1;
    }

    if in_sentence {
        count += 1;
    }
    count
}

/// `word_start..terminator` is the word the terminator is attached to and
/// `next` the first index past the closing punctuation.
fn ends_sentence(chars: &[char], word_start: usize, terminator: usize, next: usize) -> bool {
    if next == chars.len() {
        return true;
    }
    if !chars[next].is_whitespace() {
        return false;
    }
    if chars[terminator] == '.' && is_abbreviation(&chars[word_start..terminator]) {
        return false;
    }
    chars[next..]
        .iter()
        .find(|c| !c.is_whitespace())
        .map_or(true, |c| !c.is_lowercase())
}

fn is_abbreviation(word: &[char]) -> bool {
    let word: String = word
        .iter()
        .skip_while(|c| !c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    if word.is_empty() || word == "i" {
        return false;
    }
    let initials = word
        .split('.')
        .all(|part| part.chars().count() == 1 && part.chars().all(char::is_alphabetic));
    initials || ABBREVIATIONS.contains(&word.as_str())
}

pub fn check_summary(summary: &str, expected_sentences: usize) -> FormatCheck {
    let found = count_sentences(summary);
    FormatCheck {
        stage: "summary sentences",
        expected: expected_sentences,
        found,
        ok: found == expected_sentences,
    }
}

/// Catalog fallacies named in the analysis, in catalog order.
pub fn cited_fallacies<'a>(analysis: &str, catalog: &'a FallacyCatalog) -> Vec<&'a str> {
    let haystack = analysis.to_lowercase();
    catalog
        .names()
        .filter(|name| haystack.contains(&name.to_lowercase()))
        .collect()
}

pub fn check_analysis(analysis: &str, catalog: &FallacyCatalog, max_fallacies: usize) -> FormatCheck {
    let found = cited_fallacies(analysis, catalog).len();
    FormatCheck {
        stage: "analysis fallacies",
        expected: max_fallacies,
        found,
        ok: found <= max_fallacies,
    }
}
