mod message;
mod part;
mod value;

pub use message::{
    CompiledMessage, Expression, Key, Operand, Pattern, PatternElement, STYLE_OPTION, Selector,
    SelectorRef, Variant,
};
pub use part::Part;
pub use value::{Args, Value};
