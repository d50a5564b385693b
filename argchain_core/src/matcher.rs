mod core;
mod state;

pub(crate) use self::core::*;
pub use state::*;
