use std::collections::HashSet;

use crate::api::{Command, Parameter};
use crate::model::{Kind, ParseConfig};
use crate::parser::ConfigError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Check the whole command tree before any token is consumed.
///
/// Only the first violation is reported.
pub(crate) fn validate_tree(
    config: &ParseConfig,
    program: &str,
    parameters: &[Parameter<'_>],
    commands: &[Command<'_>],
) -> Result<(), ConfigError> {
    if config.long_prefix.is_empty() {
        return Err(ConfigError::EmptyPrefix("long"));
    }

    if config.short_prefix.is_empty() {
        return Err(ConfigError::EmptyPrefix("short"));
    }

    let variadic = validate_set(program, parameters)?;
    reject_unreachable(program, variadic, commands)?;
    validate_commands(commands)
}

fn validate_commands(commands: &[Command<'_>]) -> Result<(), ConfigError> {
    let mut names: HashSet<&str> = HashSet::default();

    for command in commands {
        if !names.insert(command.name()) {
            return Err(ConfigError::DuplicateCommand(command.name().to_string()));
        }

        if !command.has_handler() {
            return Err(ConfigError::MissingHandler(command.name().to_string()));
        }

        let variadic = validate_set(command.name(), command.parameters())?;
        reject_unreachable(command.name(), variadic, command.sub_commands())?;

        for group in command.exclusive_groups() {
            if let Some(unknown) = group
                .iter()
                .find(|name| !command.parameters().iter().any(|p| p.long_name() == name.as_str()))
            {
                return Err(ConfigError::UnknownExclusiveOption {
                    command: command.name().to_string(),
                    option: unknown.clone(),
                });
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Validated command '{}'.", command.name());
        }

        validate_commands(command.sub_commands())?;
    }

    Ok(())
}

/// Returns the name of the set's variadic option, if any.
fn validate_set<'p>(
    owner: &str,
    parameters: &'p [Parameter<'_>],
) -> Result<Option<&'p str>, ConfigError> {
    let mut names: HashSet<&str> = HashSet::default();
    let mut shorts: HashSet<char> = HashSet::default();
    let mut variadic: Option<&str> = None;

    for parameter in parameters {
        if parameter.long_name().is_empty() {
            return Err(ConfigError::EmptyOptionName(owner.to_string()));
        }

        if !names.insert(parameter.long_name()) {
            return Err(ConfigError::DuplicateOption(
                parameter.long_name().to_string(),
            ));
        }

        if let Some(short) = parameter.short_name() {
            if !shorts.insert(short) {
                return Err(ConfigError::DuplicateShortOption(short));
            }
        }

        if parameter.kind() == Kind::Variadic {
            if let Some(first) = variadic.replace(parameter.long_name()) {
                return Err(ConfigError::MultipleVariadic {
                    first: first.to_string(),
                    second: parameter.long_name().to_string(),
                });
            }
        }

        if !parameter.binding_compatible() {
            return Err(ConfigError::IncompatibleBinding {
                name: parameter.long_name().to_string(),
                kind: parameter.kind(),
            });
        }
    }

    Ok(variadic)
}

/// A variadic option consumes every remaining token, so nothing would be left for sub-commands.
fn reject_unreachable(
    owner: &str,
    variadic: Option<&str>,
    commands: &[Command<'_>],
) -> Result<(), ConfigError> {
    match variadic {
        Some(option) if !commands.is_empty() => Err(ConfigError::VariadicWithSubCommands {
            command: owner.to_string(),
            option: option.to_string(),
        }),
        _ => Ok(()),
    }
}
