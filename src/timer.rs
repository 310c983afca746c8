//! One-shot deadlines on the page clock.
//!
//! All delays on the page (loading splash, form cycle, gallery cooldown, resize
//! debounce) are entries in a [`Timers`] queue that is polled once per animation
//! frame. Keys identify what a deadline is for; scheduling the same key again
//! through [`Timers::debounce`] replaces the pending one.

use instant::Duration;

#[derive(Debug)]
pub struct Timers<K> {
    entries: Vec<(Duration, K)>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, key: K, at: Duration) {
        self.entries.push((at, key));
    }

    /// Cancel any pending deadline with this key, then schedule a new one.
    pub fn debounce(&mut self, key: K, at: Duration) {
        self.cancel(&key);
        self.schedule(key, at);
    }

    /// Returns whether something was cancelled.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(_, k)| k != key);
        before != self.entries.len()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.entries.iter().any(|(_, k)| k == key)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|(at, _)| *at).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every key whose deadline is at or before `now`, earliest first.
    pub fn due(&mut self, now: Duration) -> Vec<K> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|(at, _)| *at <= now);
        self.entries = pending;
        // stable, so equal deadlines keep scheduling order
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, key)| key).collect()
    }
}
