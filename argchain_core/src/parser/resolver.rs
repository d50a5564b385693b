use crate::api::{Command, Context};
use crate::matcher::{OptionSetParser, OptionState};
use crate::model::{Kind, ParseConfig};
use crate::parser::{Error, ParseError};
use crate::tokens::{TokenKind, TokenStream};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// One resolved command in the chain: its position among its siblings, and its parse state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) state: OptionState,
}

/// Walks the command tree alongside the token stream, building the command chain.
pub(crate) struct Resolver<'p> {
    config: &'p ParseConfig,
}

impl<'p> Resolver<'p> {
    pub(crate) fn new(config: &'p ParseConfig) -> Self {
        Self { config }
    }

    pub(crate) fn resolve(
        &self,
        commands: &mut [Command<'_>],
        stream: &mut TokenStream<'_>,
    ) -> Result<Vec<Link>, ParseError> {
        let mut chain: Vec<Link> = Vec::default();
        self.resolve_level(commands, stream, &mut chain)?;
        Ok(chain)
    }

    fn resolve_level(
        &self,
        commands: &mut [Command<'_>],
        stream: &mut TokenStream<'_>,
        chain: &mut Vec<Link>,
    ) -> Result<(), ParseError> {
        if commands.is_empty() {
            return if stream.is_empty() {
                Ok(())
            } else {
                Err(ParseError::UnexpectedToken(
                    stream.raw().unwrap_or_default().to_string(),
                ))
            };
        }

        let unnamed = commands.iter().position(|c| c.name.is_empty());
        let index = match stream.kind() {
            TokenKind::None => return Ok(()),
            TokenKind::Long | TokenKind::Short => match unnamed {
                // The empty-name command absorbs the option without taking the command word position.
                Some(index) => index,
                None => {
                    return Err(ParseError::ExpectedCommand(
                        stream.raw().unwrap_or_default().to_string(),
                    ))
                }
            },
            TokenKind::Text => {
                let token = stream.raw().unwrap_or_default().to_string();

                match commands
                    .iter()
                    .position(|c| !c.name.is_empty() && c.name == token)
                {
                    Some(index) => {
                        stream.advance();
                        index
                    }
                    None => match unnamed {
                        Some(index) if takes_text(&commands[index]) => index,
                        _ => return Err(ParseError::UnknownCommand(token)),
                    },
                }
            }
        };

        let command = &mut commands[index];

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched command '{}' at depth {}.", command.name, chain.len());
        }

        let mut state = OptionState::new(&command.parameters);
        // Unknown options are left for an empty-name sub-command to absorb.
        let yield_unknown = command.commands.iter().any(|c| c.name.is_empty());
        OptionSetParser::new(self.config, &mut command.parameters, &mut state)
            .yield_unknown(yield_unknown)
            .consume(stream)?;
        check_exclusive(&command.exclusive, &state)?;

        chain.push(Link {
            index,
            name: command.name.clone(),
            state,
        });
        let depth = chain.len();

        self.resolve_level(&mut command.commands, stream, chain)?;

        if command.require_sub_execution && !command.commands.is_empty() && chain.len() == depth {
            return Err(ParseError::SubCommandRequired(command.name.clone()));
        }

        Ok(())
    }
}

/// Whether a command can consume a text token that names none of its siblings.
fn takes_text(command: &Command<'_>) -> bool {
    !command.commands.is_empty()
        || command
            .parameters
            .iter()
            .any(|p| matches!(p.kind(), Kind::Indexed | Kind::Variadic))
}

/// Reports the first pair of parsed options within any one group.
fn check_exclusive(groups: &[Vec<String>], state: &OptionState) -> Result<(), ParseError> {
    for group in groups {
        let mut parsed = group.iter().filter(|name| state.is_parsed(name));

        if let (Some(first), Some(second)) = (parsed.next(), parsed.next()) {
            return Err(ParseError::ExclusiveOptions {
                first: first.clone(),
                second: second.clone(),
            });
        }
    }

    Ok(())
}

/// Invoke the handlers of the resolved chain.
///
/// Only the last command runs, unless `exec_all_handlers` is set, in which case every command runs from root to leaf.
/// The first handler error stops execution and is returned unchanged.
pub(crate) fn execute(
    config: &ParseConfig,
    commands: &mut [Command<'_>],
    chain: &[Link],
    global: &OptionState,
) -> Result<(), Error> {
    let names: Vec<String> = chain.iter().map(|link| link.name.clone()).collect();
    let mut level: &mut [Command<'_>] = commands;

    for (depth, link) in chain.iter().enumerate() {
        let command = &mut level[link.index];

        if config.exec_all_handlers || depth + 1 == chain.len() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Executing command '{}'.", link.name);
            }

            let handler = match command.handler.as_mut() {
                Some(handler) => handler,
                None => unreachable!("internal error - validated commands always have a handler"),
            };
            let context = Context::new(&link.name, depth, &names, &link.state, global);
            handler(&context).map_err(Error::Handler)?;
        }

        level = command.commands.as_mut_slice();
    }

    Ok(())
}
