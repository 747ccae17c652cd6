pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Most-recent-first list of searched cities.
///
/// Entries are unique under case-insensitive comparison and keep the casing
/// they were last recorded with. Length never exceeds the capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
    capacity: usize,
}

impl SearchHistory {
    /// A capacity of zero is raised to one so the latest search is always kept.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Move `city` to the front, dropping any case-insensitive duplicate and
    /// whatever falls off the end.
    pub fn record(&mut self, city: &str) {
        let needle = city.to_lowercase();
        self.entries.retain(|existing| existing.to_lowercase() != needle);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_puts_newest_first() {
        let mut history = SearchHistory::new(3);
        history.record("Paris");
        history.record("Tokyo");

        assert_eq!(history.entries(), ["Tokyo", "Paris"]);
    }

    #[test]
    fn case_insensitive_duplicate_is_replaced_with_new_casing() {
        let mut history = SearchHistory::new(3);
        history.record("Paris");
        history.record("Tokyo");
        history.record("paris");

        assert_eq!(history.entries(), ["paris", "Tokyo"]);
    }

    #[test]
    fn capacity_keeps_most_recent() {
        let mut history = SearchHistory::new(3);
        for city in ["Rome", "Oslo", "Lima", "Kyiv", "Doha"] {
            history.record(city);
        }

        assert_eq!(history.entries(), ["Doha", "Kyiv", "Lima"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn re_recording_existing_entry_does_not_evict_others() {
        let mut history = SearchHistory::new(3);
        for city in ["Rome", "Oslo", "Lima"] {
            history.record(city);
        }
        history.record("ROME");

        assert_eq!(history.entries(), ["ROME", "Lima", "Oslo"]);
    }

    #[test]
    fn zero_capacity_still_keeps_latest_search() {
        let mut history = SearchHistory::new(0);
        history.record("Paris");
        history.record("Tokyo");

        assert_eq!(history.capacity(), 1);
        assert_eq!(history.entries(), ["Tokyo"]);
    }

    #[test]
    fn clear_empties_history() {
        let mut history = SearchHistory::default();
        history.record("Berlin");
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
    }
}
