//! Thread-safe cache of compiled messages keyed by template source.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::compiler::{CompileOptions, compile};
use crate::interpreter::CompileError;
use crate::types::CompiledMessage;

/// Compiles each distinct template once and shares the result.
///
/// Lookups take a read lock. A miss compiles outside any lock and publishes
/// under the write lock; when two threads race on the same template both
/// compile, and the first published message wins.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use msgfmt::MessageCache;
///
/// let cache = MessageCache::default();
/// let first = cache.get_or_compile("Hello {name}").unwrap();
/// let second = cache.get_or_compile("Hello {name}").unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct MessageCache {
    options: CompileOptions,
    messages: RwLock<HashMap<String, Arc<CompiledMessage>>>,
}

impl Default for MessageCache {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

impl MessageCache {
    /// Create an empty cache compiling with `options`.
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            messages: RwLock::new(HashMap::new()),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Get the compiled form of `source`, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Returns the [`CompileError`] for invalid templates. Failures are not
    /// cached.
    pub fn get_or_compile(&self, source: &str) -> Result<Arc<CompiledMessage>, CompileError> {
        if let Some(message) = self.read().get(source) {
            return Ok(Arc::clone(message));
        }
        let compiled = Arc::new(compile(source, &self.options)?);
        let mut messages = self.write();
        let message = Arc::clone(messages.entry(source.to_string()).or_insert(compiled));
        debug!(cached = messages.len(), "cached compiled message");
        Ok(message)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every cached message.
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<CompiledMessage>>> {
        self.messages.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<CompiledMessage>>> {
        self.messages.write().unwrap_or_else(PoisonError::into_inner)
    }
}
