//! Bounded numeric sequences and word tokenization.

use std::collections::VecDeque;
use std::io::{self, BufRead};

use crate::domain::error::{DomainError, DomainResult};

/// Largest term count whose last term still fits into a `u64`.
pub const MAX_FIBONACCI_TERMS: i64 = 93;

/// Delimiters separating words: comma, space, period, tab, newline.
pub const DEFAULT_DELIMITERS: [char; 5] = [',', ' ', '.', '\t', '\n'];

/// The first `count` Fibonacci numbers, f(1) = f(2) = 1.
///
/// # Errors
/// `InvalidArgument` when `count` is negative or exceeds [`MAX_FIBONACCI_TERMS`].
///
/// # Example
/// ```
/// use seqtree::domain::fibonacci;
///
/// let terms: Vec<u64> = fibonacci(6).unwrap().collect();
/// assert_eq!(terms, vec![1, 1, 2, 3, 5, 8]);
/// ```
pub fn fibonacci(count: i64) -> DomainResult<Fibonacci> {
    if count < 0 {
        return Err(DomainError::invalid_argument(format!(
            "count can't be less than 0, got {count}"
        )));
    }
    if count > MAX_FIBONACCI_TERMS {
        return Err(DomainError::invalid_argument(format!(
            "count can't exceed {MAX_FIBONACCI_TERMS}, got {count}"
        )));
    }
    Ok(Fibonacci {
        previous: 0,
        current: 1,
        // bounded by MAX_FIBONACCI_TERMS above
        remaining: count as usize,
    })
}

#[derive(Debug, Clone)]
pub struct Fibonacci {
    previous: u64,
    current: u64,
    remaining: usize,
}

impl Iterator for Fibonacci {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let term = self.current;
        if self.remaining > 0 {
            let next = self.previous + self.current;
            self.previous = self.current;
            self.current = next;
        }
        Some(term)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Fibonacci {}

/// Splits character streams into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    delimiters: Vec<char>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }
}

impl Tokenizer {
    pub fn with_delimiters(delimiters: impl IntoIterator<Item = char>) -> Self {
        Self {
            delimiters: delimiters.into_iter().collect(),
        }
    }

    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    /// Lazily read `reader` line by line and yield its words in order.
    ///
    /// # Errors
    /// `InvalidArgument` when `reader` is `None`. Read failures surface as
    /// `Err` items of the returned iterator.
    pub fn tokens<R: BufRead>(&self, reader: Option<R>) -> DomainResult<Tokens<R>> {
        let reader = reader.ok_or_else(|| DomainError::invalid_argument("reader is absent"))?;
        Ok(Tokens {
            lines: reader.lines(),
            pending: VecDeque::new(),
            delimiters: self.delimiters.clone(),
        })
    }

    /// Split a single string, without going through a reader.
    pub fn split<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        text.split(move |c: char| self.delimiters.contains(&c))
            .filter(|token| !token.is_empty())
    }
}

/// Tokenize `reader` with the [`DEFAULT_DELIMITERS`].
///
/// # Example
/// ```
/// use std::io::Cursor;
/// use seqtree::domain::tokenize;
///
/// let words: Vec<String> = tokenize(Some(Cursor::new("a, b.c")))
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(words, vec!["a", "b", "c"]);
/// ```
pub fn tokenize<R: BufRead>(reader: Option<R>) -> DomainResult<Tokens<R>> {
    Tokenizer::default().tokens(reader)
}

/// Lazy word iterator, see [`Tokenizer::tokens`].
#[derive(Debug)]
pub struct Tokens<R> {
    lines: io::Lines<R>,
    pending: VecDeque<String>,
    delimiters: Vec<char>,
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            let delimiters = &self.delimiters;
            self.pending.extend(
                line.split(|c: char| delimiters.contains(&c))
                    .filter(|token| !token.is_empty())
                    .map(str::to_string),
            );
        }
    }
}
