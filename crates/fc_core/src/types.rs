use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// The `sources` line shown to readers: `title - url`.
    pub fn source_line(&self) -> String {
        format!("{} - {}", self.title, self.url)
    }
}

/// Normalized, length-capped article body handed to the summarizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleText(String);

impl ArticleText {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ArticleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedArticle {
    pub hit: SearchHit,
    pub text: ArticleText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sources: String,
    pub summary: String,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub recency: Recency,
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecencyUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl RecencyUnit {
    fn code(self) -> char {
        match self {
            RecencyUnit::Hour => 'h',
            RecencyUnit::Day => 'd',
            RecencyUnit::Week => 'w',
            RecencyUnit::Month => 'm',
            RecencyUnit::Year => 'y',
        }
    }
}

/// How far back a news search may look, e.g. `1m` for the last month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recency {
    pub unit: RecencyUnit,
    pub amount: u32,
}

impl Recency {
    pub fn new(unit: RecencyUnit, amount: u32) -> Self {
        Self { unit, amount }
    }

    /// Google's `tbs` time filter, e.g. `qdr:m1`.
    pub fn as_tbs(&self) -> String {
        format!("qdr:{}{}", self.unit.code(), self.amount)
    }
}

impl Default for Recency {
    fn default() -> Self {
        Self::new(RecencyUnit::Month, 1)
    }
}

impl fmt::Display for Recency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.code())
    }
}

impl FromStr for Recency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let unit_char = s
            .chars()
            .last()
            .ok_or_else(|| "Recency must not be empty".to_string())?;
        let unit = match unit_char.to_ascii_lowercase() {
            'h' => RecencyUnit::Hour,
            'd' => RecencyUnit::Day,
            'w' => RecencyUnit::Week,
            'm' => RecencyUnit::Month,
            'y' => RecencyUnit::Year,
            c if c.is_ascii_digit() => {
                return Err("Recency must end with a unit (h, d, w, m, y)".to_string())
            }
            c => return Err(format!("Invalid recency unit: {}", c)),
        };

        let digits = &s[..s.len() - unit_char.len_utf8()];
        let amount = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<u32>()
                .map_err(|_| format!("Invalid number in recency: {}", digits))?
        };
        if amount == 0 {
            return Err("Recency amount must be at least 1".to_string());
        }

        Ok(Recency::new(unit, amount))
    }
}
