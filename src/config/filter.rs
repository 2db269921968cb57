//! Predicate helpers shared by the list filters
//!
//! Every filter criterion is optional and absent criteria match everything.
//! Filters evaluate their predicate once per element and split the list into
//! matched and unmatched halves; the caller's `inverse` flag picks the half.

use std::str::FromStr;

use regex::Regex;

use crate::error::{Result, SeretoError};

/// Filter value accepting a single item or a set of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    /// Exactly this value
    One(T),
    /// Any of these values
    Many(Vec<T>),
}

impl<T: PartialEq> OneOrMany<T> {
    /// Check if a value is accepted
    pub fn contains(&self, value: &T) -> bool {
        match self {
            Self::One(v) => v == value,
            Self::Many(values) => values.contains(value),
        }
    }
}

impl<T> OneOrMany<T>
where
    T: FromStr<Err = SeretoError>,
{
    /// Parse every string into a value; a single string yields `One`
    pub fn parse<S: AsRef<str>>(items: &[S]) -> Result<Self> {
        let mut parsed = items.iter().map(|s| s.as_ref().parse()).collect::<Result<Vec<T>>>()?;
        if parsed.len() == 1 {
            if let Some(one) = parsed.pop() {
                return Ok(Self::One(one));
            }
        }
        Ok(Self::Many(parsed))
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        Self::One(value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<&[&str]> for OneOrMany<String> {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Compile an optional regular expression
pub fn compile(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| Regex::new(p).map_err(|e| SeretoError::parse("pattern", e.to_string())))
        .transpose()
}

/// Unanchored regex search on an optional field.
///
/// An absent pattern matches anything; a present pattern never matches an
/// unset field.
pub fn search(pattern: Option<&Regex>, field: Option<&str>) -> bool {
    pattern.is_none_or(|re| field.is_some_and(|value| re.is_match(value)))
}

/// Split `items` by `predicate`, keeping order within each half
pub fn partition<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> Partition<'_, T> {
    let (matched, unmatched) = items.iter().partition(|item| predicate(item));
    Partition { matched, unmatched }
}

/// Result of a single filtering pass
#[derive(Debug)]
pub struct Partition<'a, T> {
    /// Elements satisfying the predicate
    pub matched: Vec<&'a T>,
    /// All other elements
    pub unmatched: Vec<&'a T>,
}

impl<'a, T> Partition<'a, T> {
    /// Matched elements, or the complement when `inverse` is set
    #[must_use]
    pub fn pick(self, inverse: bool) -> Vec<&'a T> {
        if inverse { self.unmatched } else { self.matched }
    }
}
