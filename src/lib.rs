//! `argchain` is a command tree argument parser for Rust.
//!
//! A Cli program is described as a tree of *commands*, each owning an *option set* and a *handler*.
//! Parsing walks the tokens down the tree, building the *command chain* (ex: `items add`), and then invokes the chain's handlers.
//! `argchain` prioritizes the following design concerns:
//! * *Type safe option values*:
//! Bind a variable to an option, and the raw value is converted via [`std::str::FromStr`] the moment the option is matched.
//! * *Explicit option kinds*:
//! The cardinality and syntax of each option is fixed by its [`Kind`], so there are no implicit rules to remember.
//! * *Isolated parse passes*:
//! Every call to [`CommandLineParser::parse_tokens`] starts from a fresh state; a parser may be reused any number of times.
//! * *Errors as values*:
//! Every failure is reported through [`Error`]; nothing is printed unless you call [`CommandLineParser::parse`].
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/items.rs")]
//! ```
//!
//! ```console
//! $ inventory --verbose items add apple -f -c=3
//! Added 3 x apple (forced).
//! Commands: items add
//!
//! $ inventory items remove -i=apple -i=pear
//! Removed apple.
//! Removed pear.
//!
//! $ inventory items
//! Parse error: command 'items' requires a sub-command.
//!
//! $ inventory items add apple -c=many
//! cannot convert 'many' to u32
//! ```
//!
//! # Builder Api
//! Configure `argchain` by starting with a [`CommandLineParser`].
//! Global options are `add`ed directly to the parser, while commands are added with `command`.
//! A [`Command`] is configured in the same way, and may itself contain sub-commands.
//!
//! ### Option kinds
//! ```console
//! Kind      | Syntax                      | Cardinality
//! -------------------------------------------------------------------------------------
//! Boolean   | --NAME, -N                  | at most once; takes no value
//! Optional  | --NAME=VALUE                | at most once
//! Required  | --NAME=VALUE                | exactly once
//! Repeated  | --NAME=VALUE ..             | any number of times; values accumulate
//! Indexed   | VALUE                       | exactly once; matched by declaration order
//! Variadic  | VALUE ..                    | captures every remaining token
//! ```
//!
//! ### Fields
//! Any option may be bound to a variable through a *field*:
//! * [`Scalar`]: overwrites a `T: FromStr` with each value.
//! * [`Optional`]: writes `Some(T)`.
//! * [`Collection`]: adds each value to any [Collectable](./prelude/trait.Collectable.html) (ex: `Vec<T>`, `HashSet<T>`).
//! * [`TimeSpan`]: parses a duration such as `300ms` or `1h30m` into a [`std::time::Duration`].
//! * [`Switch`]: the no-value field of [`Kind::Boolean`] options; writes its target when matched.
//!
//! Options that aren't bound are still recorded: handlers read them through their [`Context`], and the caller through the [`Parsed`] outcome.
//!
//! ### Handlers
//! By default only the last command of the chain has its handler invoked.
//! With [`CommandLineParser::exec_all_handlers`], every handler runs from root to leaf.
//! The first handler error stops execution, and is returned as [`Error::Handler`].
//!
//! ```no_run
#![doc = include_str!("../demos/report.rs")]
//! ```
//!
//! # Cli Semantics
//! `argchain` parses the Cli tokens according to the following set of rules.
//!
//! * A token starting with the long prefix (`--`) is a long option; one starting with the short prefix (`-`) is a short option.
//! Anything else is text.
//! When the long prefix itself starts with the short prefix, the long classification wins.
//! * Global options are parsed first, then the first text token selects a root command.
//! Each matched command parses its own options before the next command word is looked up among its sub-commands.
//! * Option values are given as `--NAME=VALUE` (ex: `-c=9000`).
//! Only the first `=` separates the name from the value, and a double-quoted value is unescaped (ex: `--name="a \"b\""`).
//! With [`CommandLineParser::use_assignment`] disabled, the value is the following token instead (ex: `--name value`).
//! * Multiple boolean short options may be combined into a single token.
//! For example, `-abc` is equivalent to `--apple --banana --carrot`.
//! A combined token may not carry a value.
//! * Text tokens fill the indexed options in declaration order, then the variadic option.
//! A variadic option also captures any option token its set doesn't declare.
//! * A command named `""` stands in for "no command word": it is used whenever the next token is an option its parent doesn't declare, or text naming none of its siblings.
//! In the latter case the `""` command must be able to take the text (through an indexed or variadic option, or a sub-command); otherwise the token is an unknown command.
//! * Once every command is resolved, any token left over is an error.
//!
//! ```no_run
#![doc = include_str!("../demos/copy.rs")]
//! ```
//!
//! ```console
//! $ copy backup -n a.txt b.txt
//! Would copy a.txt -> backup
//! Would copy b.txt -> backup
//!
//! $ copy -n backup a.txt
//! Parse error: indexed option 'target' must be given before the option '-n'.
//!
//! $ copy
//! no arguments provided
//! ```
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events while parsing.
pub use argchain_core::*;
