mod base;
mod resolver;
mod validate;

pub use base::*;
pub(crate) use resolver::*;
pub(crate) use validate::*;
