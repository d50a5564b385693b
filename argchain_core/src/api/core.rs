use std::env;

use crate::api::{Command, Parameter};
use crate::matcher::{OptionSetParser, OptionState};
use crate::model::ParseConfig;
use crate::parser::{execute, validate_tree, ConfigError, Error, Link, Resolver};
use crate::tokens::TokenStream;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The command line parser: global options, the command tree, and the parse configuration.
///
/// ### Example
/// ```
/// # use argchain_core as argchain;
/// use argchain::{Command, CommandLineParser, Parameter, Switch};
///
/// let mut verbose: bool = false;
/// let mut parser = CommandLineParser::new("program")
///     .add(Parameter::boolean("verbose").bind(Switch::new(&mut verbose, true)))
///     .command(Command::new("status").handler(|_| Ok(())));
///
/// let parsed = parser.parse_tokens(vec!["--verbose", "status"].as_slice()).unwrap();
/// drop(parser);
///
/// assert!(verbose);
/// assert_eq!(parsed.commands(), vec!["status"]);
/// ```
pub struct CommandLineParser<'a> {
    program: String,
    about: Option<String>,
    config: ParseConfig,
    parameters: Vec<Parameter<'a>>,
    commands: Vec<Command<'a>>,
}

impl<'a> CommandLineParser<'a> {
    /// Create a command line parser.
    ///
    /// ### Example
    /// ```
    /// # use argchain_core as argchain;
    /// use argchain::CommandLineParser;
    ///
    /// let mut parser = CommandLineParser::new("program");
    ///
    /// let error = parser.parse_tokens(empty::slice()).unwrap_err();
    /// assert!(error.is_no_arguments());
    /// ```
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            config: ParseConfig::default(),
            parameters: Vec::default(),
            commands: Vec::default(),
        }
    }

    /// Document the about message for this command line parser.
    /// If repeated, only the final about message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add a global option.
    ///
    /// Global options are parsed before the first command word.
    pub fn add(mut self, parameter: Parameter<'a>) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add a root-level command.
    pub fn command(mut self, command: Command<'a>) -> Self {
        self.commands.push(command);
        self
    }

    /// Set the prefix of long option tokens (default `--`).
    pub fn long_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.long_prefix = prefix.into();
        self
    }

    /// Set the prefix of short option tokens (default `-`).
    pub fn short_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.short_prefix = prefix.into();
        self
    }

    /// Whether option values are given as `name=value` (default), or as the following token.
    ///
    /// ### Example
    /// ```
    /// # use argchain_core as argchain;
    /// use argchain::{CommandLineParser, Parameter, Scalar};
    ///
    /// let mut name: String = String::default();
    /// let mut parser = CommandLineParser::new("program")
    ///     .use_assignment(false)
    ///     .add(Parameter::optional("name").short('n').bind(Scalar::new(&mut name)));
    ///
    /// parser.parse_tokens(vec!["-n", "apple"].as_slice()).unwrap();
    /// drop(parser);
    ///
    /// assert_eq!(name, "apple");
    /// ```
    pub fn use_assignment(mut self, use_assignment: bool) -> Self {
        self.config.use_assignment = use_assignment;
        self
    }

    /// Whether indexed options must be given before any named option of their set (default `false`).
    pub fn indexed_first(mut self, indexed_first: bool) -> Self {
        self.config.indexed_first = indexed_first;
        self
    }

    /// Whether every handler of the resolved chain is invoked, root to leaf (default `false`: only the last).
    pub fn exec_all_handlers(mut self, exec_all_handlers: bool) -> Self {
        self.config.exec_all_handlers = exec_all_handlers;
        self
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The about message, if any.
    pub fn about_text(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// The global options, in declaration order.
    pub fn parameters(&self) -> &[Parameter<'a>] {
        &self.parameters
    }

    /// The root-level commands, in declaration order.
    pub fn commands(&self) -> &[Command<'a>] {
        &self.commands
    }

    /// Check the command tree for structural errors (ex: a repeated option name).
    ///
    /// This is run at the start of every parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_tree(&self.config, &self.program, &self.parameters, &self.commands)
    }

    /// Parse the tokens, then execute the resolved command chain.
    ///
    /// Each call is an independent pass: previously parsed options never count as already parsed.
    ///
    /// ### Example
    /// ```
    /// # use argchain_core as argchain;
    /// use argchain::{Command, CommandLineParser, Parameter};
    ///
    /// let mut parser = CommandLineParser::new("program").command(
    ///     Command::new("items")
    ///         .add(Parameter::optional("count"))
    ///         .handler(|_| Ok(())),
    /// );
    ///
    /// let parsed = parser.parse_tokens(vec!["items", "--count=1"].as_slice()).unwrap();
    /// assert_eq!(parsed.command("items").unwrap().value("count"), Some("1"));
    ///
    /// let parsed = parser.parse_tokens(vec!["items", "--count=2"].as_slice()).unwrap();
    /// assert_eq!(parsed.command("items").unwrap().value("count"), Some("2"));
    /// ```
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<Parsed, Error> {
        self.validate()?;

        if tokens.is_empty() {
            return Err(Error::NoArguments);
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsing {} token(s) for '{}'.", tokens.len(), self.program);
        }

        let mut stream = TokenStream::new(&self.config, tokens);
        let mut global = OptionState::new(&self.parameters);
        // Unknown options before the first command word are left to the command resolver.
        OptionSetParser::new(&self.config, &mut self.parameters, &mut global)
            .yield_unknown(!self.commands.is_empty())
            .consume(&mut stream)?;

        let chain = Resolver::new(&self.config).resolve(&mut self.commands, &mut stream)?;
        execute(&self.config, &mut self.commands, &chain, &global)?;

        Ok(Parsed { global, chain })
    }

    /// Parse the process arguments (without the program name), then execute the resolved command chain.
    ///
    /// If an error is encountered, it is printed to stderr and exits with error code `1` (via [`std::process::exit`]).
    pub fn parse(mut self) -> Parsed {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

/// The outcome of a successful parse: the global option state, and the resolved command chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    global: OptionState,
    chain: Vec<Link>,
}

impl Parsed {
    /// The state of the global options.
    pub fn global(&self) -> &OptionState {
        &self.global
    }

    /// The names of the resolved commands, root to leaf.
    pub fn commands(&self) -> Vec<&str> {
        self.chain.iter().map(|link| link.name.as_str()).collect()
    }

    /// The option state of the resolved command `name`.
    ///
    /// When the same name appears at several depths, the root-most one is returned.
    pub fn command(&self, name: &str) -> Option<&OptionState> {
        self.chain
            .iter()
            .find(|link| link.name == name)
            .map(|link| &link.state)
    }

    /// The option state of the last resolved command.
    pub fn leaf(&self) -> Option<&OptionState> {
        self.chain.last().map(|link| &link.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Collection, Scalar, Switch};
    use crate::parser::{ConfigError, ParseError};
    use crate::test::assert_contains;
    use rstest::rstest;
    use std::cell::RefCell;

    #[test]
    fn end_to_end() {
        let mut verbose = false;
        let mut force = false;
        let mut count: u32 = 0;
        let executed = RefCell::new(Vec::default());
        let mut parser = CommandLineParser::new("program")
            .add(Parameter::boolean("verbose").bind(Switch::new(&mut verbose, true)))
            .command(
                Command::new("items")
                    .handler(|_| {
                        executed.borrow_mut().push("items");
                        Ok(())
                    })
                    .command(
                        Command::new("add")
                            .add(
                                Parameter::boolean("force")
                                    .short('f')
                                    .bind(Switch::new(&mut force, true)),
                            )
                            .add(
                                Parameter::optional("count")
                                    .short('c')
                                    .bind(Scalar::new(&mut count)),
                            )
                            .handler(|context| {
                                assert!(context.is_parsed("force"));
                                assert_eq!(context.value("count"), Some("9000"));
                                assert!(context.global().is_parsed("verbose"));
                                executed.borrow_mut().push("add");
                                Ok(())
                            }),
                    ),
            );

        let parsed = parser
            .parse_tokens(vec!["--verbose", "items", "add", "-f", "-c=9000"].as_slice())
            .unwrap();
        drop(parser);

        assert!(parsed.global().is_parsed("verbose"));
        assert_eq!(parsed.commands(), vec!["items", "add"]);
        assert_eq!(parsed.leaf().unwrap().value("count"), Some("9000"));
        assert!(verbose);
        assert!(force);
        assert_eq!(count, 9000);
        assert_eq!(executed.into_inner(), vec!["add"]);
    }

    #[test]
    fn no_arguments() {
        let mut parser = CommandLineParser::new("program");
        assert_matches!(parser.parse_tokens(&[]), Err(Error::NoArguments));
    }

    #[test]
    fn no_arguments_after_validation() {
        let mut parser = CommandLineParser::new("program").command(Command::new("items"));
        assert_matches!(
            parser.parse_tokens(&[]),
            Err(Error::Config(ConfigError::MissingHandler(name))) if name == "items"
        );
    }

    #[test]
    fn globals_only() {
        let mut values: Vec<String> = Vec::default();
        let mut parser = CommandLineParser::new("program")
            .add(Parameter::variadic("values").bind(Collection::new(&mut values)));

        let parsed = parser.parse_tokens(&["a", "--b", "c"]).unwrap();
        drop(parser);

        assert!(parsed.commands().is_empty());
        assert_eq!(parsed.leaf(), None);
        assert_eq!(values, vec!["a", "--b", "c"]);
    }

    #[rstest]
    #[case(vec!["--moot"], ParseError::UnknownOption("moot".to_string()))]
    #[case(vec!["extra"], ParseError::UnexpectedToken("extra".to_string()))]
    fn globals_errors(#[case] tokens: Vec<&str>, #[case] expected: ParseError) {
        let mut parser = CommandLineParser::new("program").add(Parameter::boolean("verbose"));
        assert_matches!(parser.parse_tokens(&tokens), Err(Error::Parse(error)) if error == expected);
    }

    #[test]
    fn globals_yield_to_unnamed() {
        let mut parser = CommandLineParser::new("program")
            .add(Parameter::boolean("verbose").short('v'))
            .command(Command::new("list").handler(|_| Ok(())))
            .command(
                Command::new("")
                    .add(Parameter::boolean("all").short('a'))
                    .handler(|_| Ok(())),
            );

        let parsed = parser.parse_tokens(&["-v", "-a"]).unwrap();
        assert!(parsed.global().is_parsed("verbose"));
        assert_eq!(parsed.commands(), vec![""]);
        assert!(parsed.command("").unwrap().is_parsed("all"));

        assert_matches!(
            parser.parse_tokens(&["--moot"]),
            Err(Error::Parse(ParseError::UnknownOption(name))) if name == "moot"
        );
    }

    #[test]
    fn globals_yield_to_resolver() {
        let mut parser = CommandLineParser::new("program")
            .add(Parameter::boolean("verbose"))
            .command(Command::new("list").handler(|_| Ok(())));

        assert_matches!(
            parser.parse_tokens(&["--verbose", "--moot", "list"]),
            Err(Error::Parse(ParseError::ExpectedCommand(token))) if token == "--moot"
        );
    }

    #[test]
    fn repeated_passes() {
        let mut parser = CommandLineParser::new("program")
            .add(Parameter::boolean("verbose"))
            .command(Command::new("status").handler(|_| Ok(())));

        for _ in 0..3 {
            let parsed = parser.parse_tokens(&["--verbose", "status"]).unwrap();
            assert!(parsed.global().is_parsed("verbose"));
        }

        let parsed = parser.parse_tokens(&["status"]).unwrap();
        assert!(!parsed.global().is_parsed("verbose"));
    }

    #[test]
    fn configuration() {
        let mut parser = CommandLineParser::new("program")
            .about("discarded")
            .about("A program.")
            .long_prefix("++")
            .short_prefix("+")
            .use_assignment(false)
            .add(Parameter::optional("name").short('n'))
            .add(Parameter::boolean("verbose").short('v'));

        assert_eq!(parser.program(), "program");
        assert_eq!(parser.about_text(), Some("A program."));
        assert_eq!(parser.parameters().len(), 2);
        assert!(parser.commands().is_empty());

        let parsed = parser.parse_tokens(&["++name", "apple", "+v"]).unwrap();
        assert_eq!(parsed.global().value("name"), Some("apple"));
        assert!(parsed.global().is_parsed_short('v'));
    }

    #[test]
    fn handler_error() {
        let mut parser = CommandLineParser::new("program")
            .command(Command::new("fail").handler(|_| Err("disk full".into())));

        let error = parser.parse_tokens(&["fail"]).unwrap_err();
        assert_matches!(error, Error::Handler(_));
        assert_contains!(error.to_string(), "disk full");
    }

    #[test]
    fn invalid_value() {
        let mut count: u32 = 0;
        let mut parser = CommandLineParser::new("program")
            .add(Parameter::optional("count").bind(Scalar::new(&mut count)));

        let error = parser.parse_tokens(&["--count=many"]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Parse error: invalid value 'many' for option 'count': cannot convert 'many' to u32."
        );
    }

    #[test]
    fn validate_prefix() {
        let parser = CommandLineParser::new("program").long_prefix("");
        assert_eq!(
            parser.validate().unwrap_err(),
            ConfigError::EmptyPrefix("long")
        );
    }
}
