mod call;
mod kind;

pub use call::ToolCallEvent;
pub use kind::ToolPurpose;
