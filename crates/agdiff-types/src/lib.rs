pub mod analysis;
pub mod error;
pub mod execution;
pub mod reasoning;
pub mod tool;
mod util;

pub use analysis::*;
pub use error::{Error, Result};
pub use execution::*;
pub use reasoning::*;
pub use tool::*;
