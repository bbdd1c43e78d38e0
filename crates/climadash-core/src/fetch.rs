//! Fetch state for one query, with last-request-wins ordering.
//!
//! A [`QuerySlot`] owns the state of one logical query (the current table
//! page, the selected month's readings). Every request started through
//! [`QuerySlot::begin`] gets a fresh generation number; a result only lands
//! if it carries the latest generation, so a slow response for an old page
//! can never overwrite a newer one.
//!
//! ```
//! use climadash_core::fetch::{FetchState, QuerySlot};
//!
//! let mut slot: QuerySlot<u32> = QuerySlot::default();
//! let first = slot.begin();
//! let second = slot.begin();
//!
//! // The older request finishes last and is ignored.
//! assert!(slot.resolve(second, Ok::<_, String>(2)));
//! assert!(!slot.resolve(first, Ok::<_, String>(1)));
//! assert_eq!(slot.data(), Some(&2));
//! # let _ = FetchState::<u32>::Idle;
//! ```

use std::mem;

/// Lifecycle of one query.
///
/// Loading and failure are distinct from an empty successful result.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight. `previous` holds the last good data, if any.
    Loading { previous: Option<T> },
    /// The latest request succeeded.
    Ready(T),
    /// The latest request failed.
    Failed { error: String, previous: Option<T> },
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    /// Last good data, whatever the current phase.
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Idle => None,
            FetchState::Loading { previous } | FetchState::Failed { previous, .. } => {
                previous.as_ref()
            }
            FetchState::Ready(data) => Some(data),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    fn take_data(&mut self) -> Option<T> {
        match mem::take(self) {
            FetchState::Idle => None,
            FetchState::Loading { previous } | FetchState::Failed { previous, .. } => previous,
            FetchState::Ready(data) => Some(data),
        }
    }
}

/// State plus generation counter for one query.
#[derive(Debug, Clone)]
pub struct QuerySlot<T> {
    generation: u64,
    state: FetchState<T>,
}

impl<T> Default for QuerySlot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            state: FetchState::Idle,
        }
    }
}

impl<T> QuerySlot<T> {
    /// Start a new request and return its generation.
    ///
    /// Existing data moves into `Loading::previous` so it can stay on screen.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        let previous = self.state.take_data();
        self.state = FetchState::Loading { previous };
        self.generation
    }

    /// Apply the result of request `generation`.
    ///
    /// Returns false, and changes nothing, when a newer request has started
    /// since.
    pub fn resolve<E: ToString>(&mut self, generation: u64, result: Result<T, E>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = match result {
            Ok(data) => FetchState::Ready(data),
            Err(e) => FetchState::Failed {
                error: e.to_string(),
                previous: self.state.take_data(),
            },
        };
        true
    }

    /// Generation of the most recent request; 0 before the first.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_moves_to_loading() {
        let mut slot: QuerySlot<Vec<u32>> = QuerySlot::default();
        assert_eq!(slot.generation(), 0);
        assert_eq!(slot.state(), &FetchState::Idle);

        let generation = slot.begin();
        assert_eq!(generation, 1);
        assert!(slot.is_loading());
        assert!(slot.data().is_none());
    }

    #[test]
    fn test_resolve_latest_applies() {
        let mut slot: QuerySlot<Vec<u32>> = QuerySlot::default();
        let generation = slot.begin();
        assert!(slot.resolve::<String>(generation, Ok(vec![1, 2])));
        assert_eq!(slot.state(), &FetchState::Ready(vec![1, 2]));
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut slot: QuerySlot<&str> = QuerySlot::default();
        let old = slot.begin();
        let new = slot.begin();

        assert!(!slot.resolve::<String>(old, Ok("old")));
        assert!(slot.is_loading());

        assert!(slot.resolve::<String>(new, Ok("new")));
        assert!(!slot.resolve::<String>(old, Ok("old")));
        assert_eq!(slot.data(), Some(&"new"));
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut slot: QuerySlot<u32> = QuerySlot::default();
        let old = slot.begin();
        let new = slot.begin();
        assert!(slot.resolve::<String>(new, Ok(7)));
        assert!(!slot.resolve(old, Err("boom")));
        assert_eq!(slot.error(), None);
    }

    #[test]
    fn test_loading_keeps_previous_data() {
        let mut slot: QuerySlot<u32> = QuerySlot::default();
        let first = slot.begin();
        slot.resolve::<String>(first, Ok(1));

        slot.begin();
        assert_eq!(slot.state(), &FetchState::Loading { previous: Some(1) });
        assert_eq!(slot.data(), Some(&1));
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut slot: QuerySlot<u32> = QuerySlot::default();
        let first = slot.begin();
        slot.resolve::<String>(first, Ok(1));

        let second = slot.begin();
        assert!(slot.resolve(second, Err("API error (500): boom")));
        assert_eq!(slot.error(), Some("API error (500): boom"));
        assert_eq!(slot.data(), Some(&1));
        assert!(!slot.is_loading());
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let mut slot: QuerySlot<Vec<u32>> = QuerySlot::default();
        let generation = slot.begin();
        slot.resolve::<String>(generation, Ok(Vec::new()));
        assert_eq!(slot.error(), None);
        assert_eq!(slot.data(), Some(&Vec::new()));
    }
}
