use crate::api::{Context, Parameter};
use crate::parser::HandlerError;

pub(crate) type Handler<'a> = Box<dyn FnMut(&Context<'_>) -> Result<(), HandlerError> + 'a>;

/// A command: a name, an option set, sub-commands, and the handler to invoke when it is used.
///
/// A command with the empty name `""` stands for "options with no command word".
/// It is used whenever the next token cannot be resolved to any named sibling.
///
/// ### Example
/// ```
/// # use argchain_core as argchain;
/// use argchain::{Command, CommandLineParser, Parameter};
///
/// let mut added: Vec<String> = Vec::default();
/// let mut parser = CommandLineParser::new("program")
///     .command(
///         Command::new("items")
///             .about("Manage the items.")
///             .handler(|_| Ok(()))
///             .command(
///                 Command::new("add")
///                     .add(Parameter::indexed("item"))
///                     .handler(|context| {
///                         added.push(context.value("item").unwrap_or_default().to_string());
///                         Ok(())
///                     }),
///             ),
///     );
///
/// let parsed = parser.parse_tokens(vec!["items", "add", "apple"].as_slice()).unwrap();
/// assert_eq!(parsed.commands(), vec!["items", "add"]);
/// drop(parser);
///
/// assert_eq!(added, vec!["apple"]);
/// ```
pub struct Command<'a> {
    pub(crate) name: String,
    pub(crate) about: Option<String>,
    pub(crate) handler: Option<Handler<'a>>,
    pub(crate) parameters: Vec<Parameter<'a>>,
    pub(crate) commands: Vec<Command<'a>>,
    pub(crate) exclusive: Vec<Vec<String>>,
    pub(crate) require_sub_execution: bool,
}

impl<'a> Command<'a> {
    /// Create a command.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            handler: None,
            parameters: Vec::default(),
            commands: Vec::default(),
            exclusive: Vec::default(),
            require_sub_execution: false,
        }
    }

    /// Document the about message for this command.
    /// If repeated, only the final about message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Set the handler invoked when this command is executed.
    /// If repeated, only the final handler will apply.
    pub fn handler(
        mut self,
        handler: impl FnMut(&Context<'_>) -> Result<(), HandlerError> + 'a,
    ) -> Self {
        self.handler.replace(Box::new(handler));
        self
    }

    /// Add an option to this command's option set.
    ///
    /// The order of indexed options corresponds to their positional order during parsing.
    pub fn add(mut self, parameter: Parameter<'a>) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add a sub-command.
    pub fn command(mut self, command: Command<'a>) -> Self {
        self.commands.push(command);
        self
    }

    /// Declare a group of options (by long name) of which at most one may be parsed.
    ///
    /// ### Example
    /// ```
    /// # use argchain_core as argchain;
    /// use argchain::{Command, CommandLineParser, Error, Parameter, ParseError};
    ///
    /// let mut parser = CommandLineParser::new("program").command(
    ///     Command::new("show")
    ///         .add(Parameter::boolean("json"))
    ///         .add(Parameter::boolean("yaml"))
    ///         .exclusive(["json", "yaml"])
    ///         .handler(|_| Ok(())),
    /// );
    ///
    /// let error = parser.parse_tokens(vec!["show", "--json", "--yaml"].as_slice()).unwrap_err();
    /// assert!(matches!(error, Error::Parse(ParseError::ExclusiveOptions { .. })));
    /// ```
    pub fn exclusive<S: Into<String>>(mut self, group: impl IntoIterator<Item = S>) -> Self {
        self.exclusive
            .push(group.into_iter().map(Into::into).collect());
        self
    }

    /// Require that one of the sub-commands is used whenever this command is used.
    pub fn require_sub_execution(mut self, required: bool) -> Self {
        self.require_sub_execution = required;
        self
    }

    /// The name of this command.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The about message of this command, if any.
    pub fn about_text(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// The option set of this command, in declaration order.
    pub fn parameters(&self) -> &[Parameter<'a>] {
        &self.parameters
    }

    /// The sub-commands of this command, in declaration order.
    pub fn sub_commands(&self) -> &[Command<'a>] {
        &self.commands
    }

    /// The exclusivity groups of this command.
    pub fn exclusive_groups(&self) -> &[Vec<String>] {
        &self.exclusive
    }

    /// Whether this command requires one of its sub-commands to be used.
    pub fn requires_sub_execution(&self) -> bool {
        self.require_sub_execution
    }

    /// Whether a handler is set.
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }
}

impl<'a> std::fmt::Debug for Command<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("commands", &self.commands)
            .field("exclusive", &self.exclusive)
            .field("require_sub_execution", &self.require_sub_execution)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders() {
        let command = Command::new("items")
            .about("discarded")
            .about("Manage the items.")
            .add(Parameter::boolean("force"))
            .add(Parameter::optional("count"))
            .command(Command::new("add"))
            .command(Command::new("remove"))
            .exclusive(["force", "count"])
            .require_sub_execution(true);

        assert_eq!(command.name(), "items");
        assert_eq!(command.about_text(), Some("Manage the items."));
        assert_eq!(
            command
                .parameters()
                .iter()
                .map(|p| p.long_name())
                .collect::<Vec<_>>(),
            vec!["force", "count"]
        );
        assert_eq!(
            command
                .sub_commands()
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>(),
            vec!["add", "remove"]
        );
        assert_eq!(
            command.exclusive_groups(),
            &[vec!["force".to_string(), "count".to_string()]]
        );
        assert!(command.requires_sub_execution());
        assert!(!command.has_handler());
    }

    #[test]
    fn handler() {
        let mut called = 0;
        let mut command = Command::new("items").handler(|_| {
            called += 1;
            Ok(())
        });
        assert!(command.has_handler());
        let context_state = Default::default();
        let chain = ["items".to_string()];
        let context = Context::new("items", 0, &chain, &context_state, &context_state);
        (command.handler.as_mut().unwrap())(&context).unwrap();
        drop(command);
        assert_eq!(called, 1);
    }
}
