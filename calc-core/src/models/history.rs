use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::Regex;

/// Matches the result part of a trace such as `2 + 2 = 4` or `pi = 3.141593`.
static TRACE_RESULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=\s*([^=]+)$").expect("trace result pattern is valid"));

/// Completed calculation traces, oldest first, bounded by a fixed limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
}

impl History {
    /// Creates an empty history keeping at most `limit` entries.
    ///
    /// A limit of zero is raised to one; [`crate::EngineConfig::validate`]
    /// rejects it before it gets here.
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Appends an entry, evicting and returning the oldest one when full.
    pub fn push(
        &mut self,
        entry: String,
    ) -> Option<String> {
        let evicted = if self.entries.len() == self.limit {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entry at `index`, where 0 is the oldest.
    pub fn get(
        &self,
        index: usize,
    ) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The result text of the entry at `index` (everything after the `=`).
    pub fn result_of(
        &self,
        index: usize,
    ) -> Option<&str> {
        let entry = self.get(index)?;
        TRACE_RESULT
            .captures(entry)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
