//! Function registry for formatting functions.

use std::collections::{BTreeMap, HashMap};

use crate::interpreter::ResolveError;
use crate::interpreter::functions;
use crate::types::Value;

/// Formatting function signature.
///
/// Takes:
/// - `locale`: the locale the message is resolved in
/// - `options`: literal options from the expression (the function style is
///   under `"style"`)
/// - `operand`: the value to format
///
/// Returns the formatted value or an error.
pub type FormatFn = fn(&str, &BTreeMap<String, String>, &Value) -> Result<Value, ResolveError>;

/// Name-keyed table of formatting functions.
///
/// [`FunctionRegistry::default`] includes the built-in functions; use
/// [`FunctionRegistry::new`] for an empty table.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, FormatFn>,
}

impl FunctionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Create a registry holding `number`, `upper`, `lower` and `string`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert("number", functions::number);
        registry.insert("upper", functions::upper);
        registry.insert("lower", functions::lower);
        registry.insert("string", functions::string);
        registry
    }

    /// Register a function, replacing any function with the same name.
    pub fn insert(&mut self, name: impl Into<String>, function: FormatFn) {
        self.functions.insert(name.into(), function);
    }

    /// Get a function by name.
    pub fn get(&self, name: &str) -> Option<FormatFn> {
        self.functions.get(name).copied()
    }

    /// Check if a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
