/// Hands out ids for sections and notes from a single counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    /// Resumes from a persisted counter value. The value is trusted as-is,
    /// except that ids start at 1.
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    /// Returns the current value and advances the counter, or `None` once
    /// the counter cannot advance any further.
    pub fn next_id(&mut self) -> Option<u64> {
        let id = self.next;
        self.next = id.checked_add(1)?;
        Some(id)
    }

    /// The value the next call to [`IdGenerator::next_id`] will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}
