//! Compiled-program cache
//!
//! Keyed by expression text. Entries are immutable once inserted; at capacity
//! new programs are compiled but not retained.

use crate::error::Result;
use dashmap::DashMap;
use std::sync::Arc;

pub(super) struct ProgramCache<P> {
    programs: DashMap<String, Arc<P>>,
    capacity: usize,
}

impl<P> ProgramCache<P> {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            programs: DashMap::new(),
            capacity,
        }
    }

    /// Return the cached program for `expression`, compiling it on a miss.
    /// Compile failures are never cached.
    pub(super) fn get_or_compile<F>(&self, expression: &str, compile: F) -> Result<Arc<P>>
    where
        F: FnOnce() -> Result<P>,
    {
        if let Some(program) = self.programs.get(expression) {
            tracing::trace!(expression = %expression, "program cache hit");
            return Ok(Arc::clone(program.value()));
        }

        let program = Arc::new(compile()?);
        if self.programs.len() < self.capacity {
            self.programs
                .entry(expression.to_string())
                .or_insert_with(|| Arc::clone(&program));
        } else {
            tracing::debug!(capacity = self.capacity, "program cache full, not caching");
        }
        Ok(program)
    }

    pub(super) fn len(&self) -> usize {
        self.programs.len()
    }

    pub(super) fn clear(&self) {
        self.programs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluateError;
    use std::cell::Cell;

    #[test]
    fn test_compiles_once() {
        let cache = ProgramCache::new(4);
        let calls = Cell::new(0);

        for _ in 0..3 {
            let program = cache
                .get_or_compile("a", || {
                    calls.set(calls.get() + 1);
                    Ok(42)
                })
                .unwrap();
            assert_eq!(*program, 42);
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_errors_not_cached() {
        let cache: ProgramCache<i32> = ProgramCache::new(4);
        let result = cache.get_or_compile("bad", || Err(EvaluateError::Compile("x".to_string())));
        assert!(result.is_err());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_capacity_bound() {
        let cache = ProgramCache::new(2);
        for (i, expr) in ["a", "b", "c", "d"].iter().enumerate() {
            let program = cache.get_or_compile(expr, || Ok(i)).unwrap();
            assert_eq!(*program, i);
        }
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
