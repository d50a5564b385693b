//! Core module for `argchain`.
//! See [documentation root](https://docs.rs/argchain/latest/argchain/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;
mod tokens;

pub use api::*;
pub use matcher::OptionState;
pub use model::Kind;
pub use parser::{ConfigError, Error, HandlerError, ParseError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
