use std::str::FromStr;

use crate::api::InvalidCapture;
use crate::matcher::OptionState;

/// The view of a parse pass handed to a command handler.
///
/// Lookups by name (ex: [`Context::value`]) address the executing command's own options.
/// Use [`Context::global`] for the options declared on the [`CommandLineParser`](crate::CommandLineParser).
pub struct Context<'p> {
    command: &'p str,
    depth: usize,
    chain: &'p [String],
    options: &'p OptionState,
    global: &'p OptionState,
}

impl<'p> Context<'p> {
    pub(crate) fn new(
        command: &'p str,
        depth: usize,
        chain: &'p [String],
        options: &'p OptionState,
        global: &'p OptionState,
    ) -> Self {
        Self {
            command,
            depth,
            chain,
            options,
            global,
        }
    }

    /// The name of the executing command.
    pub fn command(&self) -> &str {
        self.command
    }

    /// The position of the executing command in the chain (`0` for the root-most command).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The names of every command in the resolved chain, root to leaf.
    pub fn chain(&self) -> &[String] {
        self.chain
    }

    /// Whether the executing command is the last of the chain.
    pub fn is_leaf(&self) -> bool {
        self.depth + 1 == self.chain.len()
    }

    /// The option state of the executing command.
    pub fn options(&self) -> &OptionState {
        self.options
    }

    /// The option state of the global options.
    pub fn global(&self) -> &OptionState {
        self.global
    }

    /// Whether the option `name` of the executing command was parsed.
    pub fn is_parsed(&self, name: &str) -> bool {
        self.options.is_parsed(name)
    }

    /// The first raw value of the option `name` of the executing command.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.options.value(name)
    }

    /// All raw values of the option `name` of the executing command.
    pub fn values(&self, name: &str) -> &[String] {
        self.options.values(name)
    }

    /// Convert the first raw value of the option `name` of the executing command into `T`.
    pub fn get<T: FromStr>(&self, name: &str) -> Result<Option<T>, InvalidCapture> {
        self.options.get(name)
    }
}

impl<'p> std::fmt::Debug for Context<'p> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("command", &self.command)
            .field("depth", &self.depth)
            .field("chain", &self.chain)
            .finish()
    }
}
