//! Message resolution and the services it depends on.
//!
//! This module holds the resolver, plural rules, formatting functions, the
//! compiled-message cache and static lints.

mod cache;
mod error;
mod functions;
mod lint;
mod plural;
mod registry;
mod resolver;

pub use cache::MessageCache;
pub use error::{CompileError, ResolveError, compute_suggestions};
pub use lint::{LintWarning, lint_tokens};
pub use plural::{PluralRuleFn, plural_categories, plural_category};
pub use registry::{FormatFn, FunctionRegistry};
pub use resolver::{ErrorHandler, Resolver, fallback_text, resolve, resolve_to_parts};
