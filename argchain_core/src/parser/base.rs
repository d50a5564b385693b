use thiserror::Error;

use crate::api::InvalidCapture;

/// The error type returned by command handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A structural error in the declared command/option tree.
///
/// These are programming mistakes, detected before any token is consumed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A token prefix is configured as the empty string.
    #[error("Config error: the {0} prefix must not be empty.")]
    EmptyPrefix(&'static str),

    /// An option was declared with an empty long name.
    #[error("Config error: option names must not be empty (in '{0}').")]
    EmptyOptionName(String),

    /// Two options in the same set share a long name.
    #[error("Config error: cannot duplicate the option '{0}'.")]
    DuplicateOption(String),

    /// Two options in the same set share a short name.
    #[error("Config error: cannot duplicate the short option '{0}'.")]
    DuplicateShortOption(char),

    /// An option set declares more than one variadic option.
    #[error("Config error: cannot declare more than one variadic option (found '{first}' and '{second}').")]
    MultipleVariadic {
        /// The first variadic option.
        first: String,
        /// The second variadic option.
        second: String,
    },

    /// A command declares both a variadic option and sub-commands.
    #[error("Config error: command '{command}' cannot declare both the variadic option '{option}' and sub-commands.")]
    VariadicWithSubCommands {
        /// The offending command.
        command: String,
        /// The variadic option.
        option: String,
    },

    /// Two sibling commands share a name.
    #[error("Config error: cannot duplicate the command '{0}'.")]
    DuplicateCommand(String),

    /// A command was declared without a handler.
    #[error("Config error: command '{0}' has no handler.")]
    MissingHandler(String),

    /// A bound field does not fit the option kind (ex: a value field on a boolean option).
    #[error("Config error: option '{name}' of kind {kind} is bound to an incompatible field.")]
    IncompatibleBinding {
        /// The offending option.
        name: String,
        /// The option kind.
        kind: crate::Kind,
    },

    /// An exclusivity group names an option the command does not declare.
    #[error("Config error: command '{command}' declares an exclusive group with unknown option '{option}'.")]
    UnknownExclusiveOption {
        /// The offending command.
        command: String,
        /// The unknown option.
        option: String,
    },
}

/// A token stream that does not fit the declared command/option tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A long option that is not declared in the current option set.
    #[error("Parse error: option '{0}' does not exist.")]
    UnknownOption(String),

    /// A short option that is not declared in the current option set.
    #[error("Parse error: short option '{0}' does not exist.")]
    UnknownShortOption(char),

    /// A combined short option token names a non-boolean option, or carries a value.
    #[error("Parse error: cannot combine '{option}' in the short option token '{token}'.")]
    InvalidCombination {
        /// The raw token.
        token: String,
        /// The option which may not be combined.
        option: String,
    },

    /// A non-repeated option was specified more than once.
    #[error("Parse error: option '{0}' was specified more than once.")]
    DuplicateOption(String),

    /// A boolean option was given a value.
    #[error("Parse error: option '{0}' does not take a value.")]
    UnexpectedValue(String),

    /// An option that takes a value was given none.
    #[error("Parse error: option '{0}' requires a value.")]
    MissingValue(String),

    /// An option that takes a value was followed by another option instead of its value.
    #[error("Parse error: option '{name}' requires a value, but found the option '{token}'.")]
    ValueIsOption {
        /// The option missing its value.
        name: String,
        /// The option-shaped token that followed it.
        token: String,
    },

    /// A named option was given while indexed options are still unparsed.
    #[error("Parse error: indexed option '{name}' must be given before the option '{token}'.")]
    IndexedFirst {
        /// The first unparsed indexed option.
        name: String,
        /// The named option token.
        token: String,
    },

    /// A required or indexed option is absent at the end of its set.
    #[error("Parse error: option '{0}' is required.")]
    MissingOption(String),

    /// Two options from the same exclusivity group were both parsed.
    #[error("Parse error: options '{first}' and '{second}' cannot be used together.")]
    ExclusiveOptions {
        /// The first parsed option of the group.
        first: String,
        /// The second parsed option of the group.
        second: String,
    },

    /// An option token where a command name was expected.
    #[error("Parse error: expected a command name, but found the option '{0}'.")]
    ExpectedCommand(String),

    /// A token that names no command at this level.
    #[error("Parse error: unknown command '{0}'.")]
    UnknownCommand(String),

    /// A token left over after the command chain has been resolved.
    #[error("Parse error: unexpected token '{0}'.")]
    UnexpectedToken(String),

    /// A command that requires a sub-command was used without one.
    #[error("Parse error: command '{0}' requires a sub-command.")]
    SubCommandRequired(String),

    /// A value could not be converted into the type bound to its option.
    #[error("Parse error: invalid value '{value}' for option '{name}': {source}.")]
    InvalidValue {
        /// The option.
        name: String,
        /// The offending raw value.
        value: String,
        /// The conversion failure.
        source: InvalidCapture,
    },
}

/// The error type of a parse call.
#[derive(Debug, Error)]
pub enum Error {
    /// The declared command/option tree is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The tokens do not fit the declared command/option tree.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A command handler failed; the handler's error is returned unchanged.
    #[error("{0}")]
    Handler(HandlerError),

    /// No tokens were given at all.
    ///
    /// This is a signal rather than a failure: callers typically respond by showing usage.
    #[error("no arguments provided")]
    NoArguments,
}

impl Error {
    /// Whether this is the [`Error::NoArguments`] signal.
    pub fn is_no_arguments(&self) -> bool {
        matches!(self, Error::NoArguments)
    }
}
