//! CLI command implementations.

mod check;
mod compile;
mod eval;

pub use check::{run_check, CheckArgs};
pub use compile::{run_compile, CompileArgs};
pub use eval::{run_eval, EvalArgs};
