//! Text: an owned string with case, inflection and word-splitting helpers.
//!
//! Every transformation returns a new `Text`; the receiver is never modified
//! except by [`Text::scan`].

use crate::error::{Error, Result};
use crate::ordered_map::OrderedMap;
use crate::ordered_set::OrderedSet;
use core::fmt;
use core::mem;
use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use inflector::string::pluralize::to_plural;
use inflector::string::singularize::to_singular;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Text {
    value: String,
}

/// A word produced by [`Text::split_words`] together with the separator that
/// directly followed it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitWord {
    pub word: String,
    pub separator_after: Option<char>,
}

impl SplitWord {
    pub fn new(word: impl Into<String>, separator_after: Option<char>) -> Self {
        Self {
            word: word.into(),
            separator_after,
        }
    }
}

/// A raw column value handed over by a database driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanValue<'a> {
    Null,
    Text(&'a str),
    Bytes(&'a [u8]),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ScanValue<'_> {
    pub fn type_name(&self) -> &'static str {
        match self {
            ScanValue::Null => "null",
            ScanValue::Text(_) => "text",
            ScanValue::Bytes(_) => "bytes",
            ScanValue::Int(_) => "int",
            ScanValue::Float(_) => "float",
            ScanValue::Bool(_) => "bool",
        }
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | ' ' | '.' | '/')
}

fn is_lower(c: char) -> bool {
    !c.is_uppercase()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            CharClass::Other
        }
    }
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Loads a database column value.
    ///
    /// Text and bytes are stored (bytes decoded lossily as UTF-8), `Null`
    /// clears the value. Any other kind fails with
    /// [`Error::UnexpectedType`] and leaves the value untouched.
    pub fn scan(&mut self, value: ScanValue<'_>) -> Result<()> {
        self.value = match value {
            ScanValue::Text(s) => s.to_owned(),
            ScanValue::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            ScanValue::Null => String::new(),
            other => {
                return Err(Error::UnexpectedType {
                    found: other.type_name(),
                })
            }
        };
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.value.is_empty()
    }

    pub fn replace(&self, from: &str, to: &str) -> String {
        self.value.replace(from, to)
    }

    pub fn pascal(&self) -> Text {
        Text::new(self.value.to_upper_camel_case())
    }

    pub fn camel(&self) -> Text {
        Text::new(self.value.to_lower_camel_case())
    }

    pub fn snake(&self) -> Text {
        Text::new(self.value.to_snake_case())
    }

    pub fn lower(&self) -> Text {
        Text::new(self.value.to_lowercase())
    }

    pub fn upper(&self) -> Text {
        Text::new(self.value.to_uppercase())
    }

    pub fn singular(&self) -> Text {
        Text::new(to_singular(&self.value))
    }

    pub fn plural(&self) -> Text {
        Text::new(to_plural(&self.value))
    }

    pub fn starts(&self, prefix: &str) -> bool {
        self.value.starts_with(prefix)
    }

    pub fn ends(&self, suffix: &str) -> bool {
        self.value.ends_with(suffix)
    }

    /// True if the value equals any of `candidates`.
    pub fn equals_any(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|c| self.value == *c)
    }

    pub fn first_line(&self) -> Text {
        Text::new(self.value.split('\n').next().unwrap_or_default())
    }

    pub fn trim_prefix(&self, prefix: &str) -> Text {
        Text::new(self.value.strip_prefix(prefix).unwrap_or(&self.value))
    }

    /// Trims ASCII spaces only; tabs and newlines are kept.
    pub fn trim_spaces(&self) -> Text {
        Text::new(self.value.trim_matches(' '))
    }

    pub fn prepend(&self, prefix: &str) -> Text {
        Text::new(format!("{prefix}{}", self.value))
    }

    pub fn append(&self, suffix: &str) -> Text {
        Text::new(format!("{}{suffix}", self.value))
    }

    pub fn wrap(&self, wrapper: &str) -> Text {
        Text::new(format!("{wrapper}{}{wrapper}", self.value))
    }

    /// Splits on character-class boundaries (lower, upper, digit, other).
    ///
    /// An uppercase run followed by lowercase hands its last letter to the
    /// next word, so acronyms stay whole: `"PDFLoader"` becomes
    /// `["PDF", "Loader"]` and `"GL11Version"` becomes `["GL", "11", "Version"]`.
    pub fn split_camel(&self) -> Vec<String> {
        let mut runs: Vec<Vec<char>> = Vec::new();
        let mut last = None;
        for c in self.value.chars() {
            let class = CharClass::of(c);
            match runs.last_mut() {
                Some(run) if last == Some(class) => run.push(c),
                _ => runs.push(vec![c]),
            }
            last = Some(class);
        }

        for i in 1..runs.len() {
            let upper_then_lower = runs[i - 1][0].is_uppercase() && runs[i][0].is_lowercase();
            if upper_then_lower {
                if let Some(moved) = runs[i - 1].pop() {
                    runs[i].insert(0, moved);
                }
            }
        }

        runs.into_iter()
            .filter(|run| !run.is_empty())
            .map(|run| run.into_iter().collect())
            .collect()
    }

    /// Splits into words, recording the separator (`_ - space . /`) that
    /// follows each word.
    ///
    /// A change between lower and upper case starts a new word once the
    /// current word holds at least two characters, so `"GooseDbVersion"`
    /// yields `Goose`, `Db`, `Version` while `"Id"` stays one word.
    pub fn split_words(&self) -> Vec<SplitWord> {
        let Some(first) = self.value.chars().next() else {
            return Vec::new();
        };

        let mut words = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;
        let mut prev_lower = is_lower(first);

        for c in self.value.chars() {
            let lower = is_lower(c);
            if is_separator(c) {
                words.push(SplitWord::new(mem::take(&mut current), Some(c)));
                current_len = 0;
            } else if prev_lower != lower && current_len > 1 {
                words.push(SplitWord::new(mem::take(&mut current), None));
                current.push(c);
                current_len = 1;
            } else {
                current.push(c);
                current_len += 1;
            }
            prev_lower = lower;
        }

        if !current.is_empty() {
            words.push(SplitWord::new(current, None));
        }
        words
    }

    /// Uppercases every word whose lowercase form is listed in
    /// `abbreviations`, keeping separators.
    pub fn fix_abbreviations(&self, abbreviations: &OrderedSet<String>) -> Text {
        let mut out = String::with_capacity(self.value.len());
        for SplitWord {
            word,
            separator_after,
        } in self.split_words()
        {
            let lower = word.to_lowercase();
            if abbreviations.has(lower.as_str()) {
                out.push_str(&lower.to_uppercase());
            } else {
                out.push_str(&word);
            }
            out.extend(separator_after);
        }
        Text::new(out)
    }

    /// Like [`fix_abbreviations`](Self::fix_abbreviations), but pluralizes the
    /// last word.
    ///
    /// `abbreviations` maps a lowercase abbreviation to its plural form. An
    /// abbreviation in the last position is replaced by that plural; any other
    /// last word goes through the regular pluralization rules.
    pub fn plural_fix_abbreviations(&self, abbreviations: &OrderedMap<String, String>) -> Text {
        let words = self.split_words();
        let last = words.len().saturating_sub(1);
        let mut out = String::with_capacity(self.value.len() + 2);

        for (i, SplitWord { word, separator_after }) in words.into_iter().enumerate() {
            let lower = word.to_lowercase();
            let replaced = match abbreviations.get(lower.as_str()) {
                Some(plural) if i == last => plural.clone(),
                Some(_) => lower.to_uppercase(),
                None if i == last && !word.is_empty() => to_plural(&word),
                None => word,
            };
            out.push_str(&replaced);
            out.extend(separator_after);
        }
        Text::new(out)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::new(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::new(value)
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl TryFrom<ScanValue<'_>> for Text {
    type Error = Error;

    fn try_from(value: ScanValue<'_>) -> Result<Self> {
        let mut text = Text::empty();
        text.scan(value)?;
        Ok(text)
    }
}
