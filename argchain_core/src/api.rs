mod capture;
mod command;
mod context;
mod core;
mod field;
mod parameter;

pub use self::core::*;
pub use capture::*;
pub use command::*;
pub use context::*;
pub use field::*;
pub use parameter::*;
