use thiserror::Error;

/// Behaviour to capture an explicit generic type T from an input `&str`.
///
/// We use this at the bottom of the command tree object graph so the compiler can maintain each field's type.
#[doc(hidden)]
pub trait GenericCapturable<'a, T> {
    /// Declare that the option has been matched.
    fn matched(&mut self);

    /// Capture a value into the generic type T for this option.
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture>;

    /// Whether this field receives values (as opposed to reacting to the match alone).
    fn takes_value(&self) -> bool;
}

/// Behaviour to capture an implicit generic type T from an input `&str`.
///
/// We use this at the middle/top of the command tree object graph so that different types may all be 'captured' in a single option set.
pub(crate) trait AnonymousCapturable {
    fn matched(&mut self);

    fn capture(&mut self, value: &str) -> Result<(), InvalidCapture>;

    fn takes_value(&self) -> bool;
}

/// The reason a raw value could not be captured into its bound variable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCapture {
    /// The value does not parse into the bound type.
    #[error("cannot convert '{token}' to {type_name}")]
    InvalidConversion {
        /// The offending raw value.
        token: String,
        /// The name of the bound type.
        type_name: &'static str,
    },

    /// The value does not parse into a duration.
    #[error("cannot convert '{token}' to a duration: {reason}")]
    InvalidDuration {
        /// The offending raw value.
        token: String,
        /// Why the value was rejected.
        reason: String,
    },
}
