//! Debounced text input.

use std::time::{Duration, Instant};

/// Input buffer that releases its value once typing has paused.
///
/// Time is passed in explicitly so the caller's tick drives it.
#[derive(Debug, Clone)]
pub struct Debouncer {
    value: String,
    quiet: Duration,
    last_edit: Option<Instant>,
    /// Last value handed out by [`poll`](Self::poll).
    emitted: Option<String>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            value: String::new(),
            quiet,
            last_edit: None,
            emitted: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.value.push(c);
        self.last_edit = Some(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.value.pop().is_some() {
            self.last_edit = Some(now);
        }
    }

    pub fn set(&mut self, value: impl Into<String>, now: Instant) {
        self.value = value.into();
        self.last_edit = Some(now);
    }

    /// Whether an edit is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.last_edit.is_some()
    }

    /// Return the value if the quiet period has elapsed since the last edit
    /// and it differs from the last value returned.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let last = self.last_edit?;
        if now.saturating_duration_since(last) < self.quiet {
            return None;
        }
        self.last_edit = None;
        if self.emitted.as_deref() == Some(self.value.as_str()) {
            return None;
        }
        self.emitted = Some(self.value.clone());
        Some(self.value.clone())
    }

    /// Release the value immediately (Enter key).
    pub fn flush(&mut self) -> String {
        self.last_edit = None;
        self.emitted = Some(self.value.clone());
        self.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn test_waits_for_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::new(QUIET);
        d.push_char('s', start);
        d.push_char('o', start + Duration::from_millis(100));

        assert_eq!(d.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            d.poll(start + Duration::from_millis(400)).as_deref(),
            Some("so")
        );
        assert!(!d.is_pending());
    }

    #[test]
    fn test_unchanged_value_not_reemitted() {
        let start = Instant::now();
        let mut d = Debouncer::new(QUIET);
        d.push_char('a', start);
        assert!(d.poll(start + QUIET).is_some());

        d.push_char('b', start + QUIET);
        d.backspace(start + QUIET);
        assert_eq!(d.poll(start + QUIET * 3), None);
    }

    #[test]
    fn test_flush_is_immediate() {
        let start = Instant::now();
        let mut d = Debouncer::new(QUIET);
        d.set("jei", start);
        assert_eq!(d.flush(), "jei");
        assert_eq!(d.poll(start + QUIET * 2), None);
    }

    #[test]
    fn test_no_edit_no_emit() {
        let mut d = Debouncer::new(QUIET);
        assert_eq!(d.poll(Instant::now()), None);
    }
}
