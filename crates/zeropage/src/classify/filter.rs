//! Placeholder page detection for scanned-book image folders.
//!
//! A placeholder ("page zero") is an image whose filename ends in an all-zero
//! numeric token, for example `book_001_00.tif` or `0000.jpg`. These are
//! calibration or target shots taken before the first real page.
//!
//! Detection works on names only:
//! - the extension is stripped at the last `.`
//! - the stem is split literally on the configured splitter
//! - only the last part is inspected
//! - the part must be two or more ASCII digits that are all zero
//!
//! A lone `0` is a legitimate page number and is never treated as a placeholder.

use crate::error::{Result, ZeroPageError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Splitter used when no configuration overrides it.
pub const DEFAULT_SPLITTER: &str = "_";

/// Literal, non-empty delimiter separating the parts of a filename stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamePartSplitter(String);

impl NamePartSplitter {
    pub fn new(splitter: impl Into<String>) -> Result<Self> {
        let splitter = splitter.into();
        if splitter.is_empty() {
            return Err(ZeroPageError::EmptySplitter);
        }
        Ok(Self(splitter))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NamePartSplitter {
    fn default() -> Self {
        Self(DEFAULT_SPLITTER.to_string())
    }
}

impl TryFrom<String> for NamePartSplitter {
    type Error = ZeroPageError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NamePartSplitter> for String {
    fn from(splitter: NamePartSplitter) -> Self {
        splitter.0
    }
}

impl fmt::Display for NamePartSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of inspecting a single filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Placeholder,
    Keep,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Placeholder => "placeholder",
            Verdict::Keep => "keep",
        }
    }
}

/// Result of classifying a batch of filenames.
///
/// All three sets are ordered, so the result is the same for any ordering of
/// the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Names whose trailing token marks page zero.
    pub placeholders: BTreeSet<String>,
    pub kept: BTreeSet<String>,
    /// Names without an extension separator. They are neither kept nor deleted.
    pub malformed: BTreeSet<String>,
}

impl Classification {
    pub fn total(&self) -> usize {
        self.placeholders.len() + self.kept.len() + self.malformed.len()
    }
}

/// Returns the filename without its extension (everything before the last `.`).
pub fn file_stem(filename: &str) -> Result<&str> {
    filename
        .rfind('.')
        .map(|idx| &filename[..idx])
        .ok_or_else(|| ZeroPageError::MalformedFilename(filename.to_string()))
}

/// Returns the part of `stem` after the last occurrence of `splitter`.
///
/// Consecutive or trailing splitters are not collapsed: `"book_"` yields `""`.
pub fn last_name_part<'a>(stem: &'a str, splitter: &NamePartSplitter) -> &'a str {
    stem.rsplit(splitter.as_str()).next().unwrap_or(stem)
}

fn is_placeholder_token(token: &str) -> bool {
    let numeric = !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit());
    // Value zero without parsing, so long digit runs cannot overflow.
    numeric && token.len() > 1 && token.bytes().all(|b| b == b'0')
}

/// Classifies filenames as placeholder pages or pages to keep.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderFilter {
    splitter: NamePartSplitter,
}

impl PlaceholderFilter {
    pub fn new(splitter: NamePartSplitter) -> Self {
        Self { splitter }
    }

    /// Builds a filter from a raw splitter string, rejecting an empty one.
    pub fn with_splitter(splitter: &str) -> Result<Self> {
        Ok(Self::new(NamePartSplitter::new(splitter)?))
    }

    pub fn splitter(&self) -> &NamePartSplitter {
        &self.splitter
    }

    /// Classify a single filename.
    ///
    /// Fails with [`ZeroPageError::MalformedFilename`] when the name has no
    /// extension.
    pub fn verdict(&self, filename: &str) -> Result<Verdict> {
        let stem = file_stem(filename)?;
        let token = last_name_part(stem, &self.splitter);

        if is_placeholder_token(token) {
            Ok(Verdict::Placeholder)
        } else {
            Ok(Verdict::Keep)
        }
    }

    /// Classify a batch of filenames.
    ///
    /// Malformed names are collected rather than aborting the batch.
    pub fn classify<I, S>(&self, filenames: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Classification::default();

        for name in filenames {
            let name = name.as_ref();
            match self.verdict(name) {
                Ok(Verdict::Placeholder) => {
                    result.placeholders.insert(name.to_string());
                }
                Ok(Verdict::Keep) => {
                    result.kept.insert(name.to_string());
                }
                Err(_) => {
                    result.malformed.insert(name.to_string());
                }
            }
        }

        result
    }
}

/// Classify `filenames` using `splitter`.
///
/// The call fails as a whole only when `splitter` is empty.
pub fn classify<I, S>(filenames: I, splitter: &str) -> Result<Classification>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(PlaceholderFilter::with_splitter(splitter)?.classify(filenames))
}
