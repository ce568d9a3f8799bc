//! Default section names.
//!
//! Suggested names look like `Section1`, `Section2`, ... The counter only ever
//! grows, so a numeric suffix that has been seen once is never suggested
//! again, even after that section is deleted.
use log::trace;

use crate::Section;

/// Prefix of every suggested section name.
pub const SECTION_NAME_PREFIX: &str = "Section";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingPolicy {
    counter: u64,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self { counter: 1 }
    }
}

impl NamingPolicy {
    pub fn starting_at(counter: u64) -> Self {
        Self { counter }
    }

    /// Lower bound for the next suggested suffix.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// First `Section{n}` with `n >= counter` that no existing section uses.
    pub fn suggest(&self, sections: &[Section]) -> String {
        // Widened so a counter at u64::MAX can still step past a taken name.
        let mut n = u128::from(self.counter);
        loop {
            let candidate = format!("{}{}", SECTION_NAME_PREFIX, n);
            if !sections.iter().any(|s| s.name == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Bumps the counter past the suffix of `name` when it has the
    /// `Section{digits}` shape.
    pub fn record(&mut self, name: &str) {
        if let Some(n) = parse_suffix(name) {
            self.counter = self.counter.max(n.saturating_add(1));
            trace!("Section name counter is now {}", self.counter);
        }
    }
}

fn parse_suffix(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(SECTION_NAME_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Overlong digit runs do not fit the counter and are ignored.
    digits.parse().ok()
}
