use crate::api::Parameter;
use crate::constant::*;
use crate::matcher::state::OptionState;
use crate::model::{Kind, ParseConfig};
use crate::parser::ParseError;
use crate::tokens::{TokenKind, TokenStream};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

enum Step {
    Continue,
    Stop,
}

/// Consumes a token stream against a single option set.
///
/// Parsing stops at the end of the stream, once a variadic option captures the remainder, or at the first unprefixed token that no positional option accepts.
/// In the latter case the token is left on the stream (ex: for sub-command resolution).
pub(crate) struct OptionSetParser<'p, 'a> {
    config: &'p ParseConfig,
    parameters: &'p mut [Parameter<'a>],
    state: &'p mut OptionState,
    yield_unknown: bool,
}

impl<'p, 'a> OptionSetParser<'p, 'a> {
    pub(crate) fn new(
        config: &'p ParseConfig,
        parameters: &'p mut [Parameter<'a>],
        state: &'p mut OptionState,
    ) -> Self {
        Self {
            config,
            parameters,
            state,
            yield_unknown: false,
        }
    }

    /// Leave unknown option tokens on the stream instead of failing (ex: for an empty-name command to absorb).
    pub(crate) fn yield_unknown(mut self, yield_unknown: bool) -> Self {
        self.yield_unknown = yield_unknown;
        self
    }

    pub(crate) fn consume(mut self, stream: &mut TokenStream<'_>) -> Result<(), ParseError> {
        loop {
            match self.step(stream)? {
                Step::Continue => {}
                Step::Stop => break,
            }
        }

        self.verify()
    }

    fn step(&mut self, stream: &mut TokenStream<'_>) -> Result<Step, ParseError> {
        match stream.kind() {
            TokenKind::None => Ok(Step::Stop),
            TokenKind::Text => {
                if let Some(index) = self.next_indexed() {
                    let value = stream.raw().unwrap_or_default().to_string();
                    stream.advance();
                    self.resolve(index, value)?;
                    Ok(Step::Continue)
                } else if let Some(index) = self.variadic() {
                    self.capture_remaining(index, stream)?;
                    Ok(Step::Stop)
                } else {
                    // Not for this option set (ex: a sub-command name).
                    Ok(Step::Stop)
                }
            }
            kind @ (TokenKind::Long | TokenKind::Short) => {
                let raw = stream.raw().unwrap_or_default().to_string();

                if self.config.indexed_first {
                    if let Some(index) = self.next_indexed() {
                        return Err(ParseError::IndexedFirst {
                            name: self.parameters[index].long_name().to_string(),
                            token: raw,
                        });
                    }
                }

                let text = stream.text().unwrap_or_default().to_string();
                let (key, value) = if self.config.use_assignment {
                    split_assignment(&text)
                } else {
                    (text.as_str(), None)
                };

                if kind == TokenKind::Long {
                    return match self.find_long(key) {
                        Some(index) => self.consume_named(index, value, stream),
                        None => self.fallback(stream, ParseError::UnknownOption(key.to_string())),
                    };
                }

                let mut characters = key.chars();

                match (characters.next(), characters.next()) {
                    (Some(short), None) => match self.find_short(short) {
                        Some(index) => self.consume_named(index, value, stream),
                        None => self.fallback(stream, ParseError::UnknownShortOption(short)),
                    },
                    (Some(_), Some(_)) => {
                        match key.chars().find(|c| self.find_short(*c).is_none()) {
                            Some(unknown) => {
                                self.fallback(stream, ParseError::UnknownShortOption(unknown))
                            }
                            None => {
                                self.consume_combined(key, value.is_some(), &raw)?;
                                stream.advance();
                                Ok(Step::Continue)
                            }
                        }
                    }
                    (None, _) => self.fallback(stream, ParseError::UnknownOption(raw)),
                }
            }
        }
    }

    /// An unmatched option token goes to the variadic option, if one is declared.
    fn fallback(
        &mut self,
        stream: &mut TokenStream<'_>,
        error: ParseError,
    ) -> Result<Step, ParseError> {
        match self.variadic() {
            Some(index) => {
                self.capture_remaining(index, stream)?;
                Ok(Step::Stop)
            }
            None if self.yield_unknown => Ok(Step::Stop),
            None => Err(error),
        }
    }

    fn consume_named(
        &mut self,
        index: usize,
        value: Option<String>,
        stream: &mut TokenStream<'_>,
    ) -> Result<Step, ParseError> {
        let kind = self.parameters[index].kind();
        let name = self.parameters[index].long_name().to_string();

        if kind != Kind::Repeated && self.state.is_parsed_at(index) {
            return Err(ParseError::DuplicateOption(name));
        }

        // Move past the option name.
        stream.advance();

        match kind {
            Kind::Boolean => {
                if value.is_some() {
                    return Err(ParseError::UnexpectedValue(name));
                }

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Matched boolean option '{name}'.");
                }

                self.state.mark(index);
                self.parameters[index].matched();
            }
            Kind::Optional | Kind::Required | Kind::Repeated => {
                let value = if self.config.use_assignment {
                    match value {
                        Some(value) if !value.is_empty() => value,
                        _ => return Err(ParseError::MissingValue(name)),
                    }
                } else {
                    match stream.kind() {
                        TokenKind::None => return Err(ParseError::MissingValue(name)),
                        TokenKind::Long | TokenKind::Short => {
                            return Err(ParseError::ValueIsOption {
                                name,
                                token: stream.raw().unwrap_or_default().to_string(),
                            });
                        }
                        TokenKind::Text => {
                            let value = stream.raw().unwrap_or_default().to_string();
                            stream.advance();
                            value
                        }
                    }
                };

                self.resolve(index, value)?;
            }
            Kind::Indexed | Kind::Variadic => {
                unreachable!("internal error - positional options are never addressed by name")
            }
        }

        Ok(Step::Continue)
    }

    fn consume_combined(
        &mut self,
        key: &str,
        has_value: bool,
        raw: &str,
    ) -> Result<(), ParseError> {
        let mut indices: Vec<usize> = Vec::default();

        for short in key.chars() {
            let index = match self.find_short(short) {
                Some(index) => index,
                None => return Err(ParseError::UnknownShortOption(short)),
            };
            let parameter = &self.parameters[index];

            if parameter.kind() != Kind::Boolean || has_value {
                return Err(ParseError::InvalidCombination {
                    token: raw.to_string(),
                    option: parameter.long_name().to_string(),
                });
            }

            if self.state.is_parsed_at(index) || indices.contains(&index) {
                return Err(ParseError::DuplicateOption(
                    parameter.long_name().to_string(),
                ));
            }

            indices.push(index);
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched combined short options '{key}'.");
        }

        for index in indices {
            self.state.mark(index);
            self.parameters[index].matched();
        }

        Ok(())
    }

    fn capture_remaining(
        &mut self,
        index: usize,
        stream: &mut TokenStream<'_>,
    ) -> Result<(), ParseError> {
        let values = stream.remaining().to_vec();
        stream.truncate();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Variadic option '{}' captures {} token(s).",
                self.parameters[index].long_name(),
                values.len()
            );
        }

        self.state.mark(index);
        self.parameters[index].matched();

        for value in values {
            self.capture(index, value)?;
        }

        Ok(())
    }

    fn resolve(&mut self, index: usize, value: String) -> Result<(), ParseError> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Matched option '{}' with value '{value}'.",
                self.parameters[index].long_name()
            );
        }

        self.state.mark(index);
        self.parameters[index].matched();
        self.capture(index, value)
    }

    fn capture(&mut self, index: usize, value: String) -> Result<(), ParseError> {
        let parameter = &mut self.parameters[index];
        let result = parameter.capture(&value);
        self.state.push(index, value.clone());
        result.map_err(|source| ParseError::InvalidValue {
            name: parameter.long_name().to_string(),
            value,
            source,
        })
    }

    fn verify(&self) -> Result<(), ParseError> {
        match self
            .parameters
            .iter()
            .enumerate()
            .find(|(i, p)| p.kind().is_mandatory() && !self.state.is_parsed_at(*i))
        {
            Some((_, parameter)) => Err(ParseError::MissingOption(
                parameter.long_name().to_string(),
            )),
            None => Ok(()),
        }
    }

    fn find_long(&self, name: &str) -> Option<usize> {
        self.parameters
            .iter()
            .position(|p| p.kind().is_named() && p.long_name() == name)
    }

    fn find_short(&self, short: char) -> Option<usize> {
        self.parameters
            .iter()
            .position(|p| p.kind().is_named() && p.short_name() == Some(short))
    }

    fn next_indexed(&self) -> Option<usize> {
        self.parameters
            .iter()
            .enumerate()
            .position(|(i, p)| p.kind() == Kind::Indexed && !self.state.is_parsed_at(i))
    }

    fn variadic(&self) -> Option<usize> {
        self.parameters
            .iter()
            .position(|p| p.kind() == Kind::Variadic)
    }
}

/// Split `key=value` on the first delimiter, de-quoting a double-quoted value.
fn split_assignment(text: &str) -> (&str, Option<String>) {
    match text.split_once(ASSIGNMENT_DELIMITER) {
        Some((key, value)) => (key, Some(dequote(value))),
        None => (text, None),
    }
}

fn dequote(value: &str) -> String {
    let inner = match value
        .strip_prefix(QUOTE)
        .and_then(|v| v.strip_suffix(QUOTE))
    {
        Some(inner) => inner,
        None => return value.to_string(),
    };
    let mut out = String::with_capacity(inner.len());
    let mut characters = inner.chars();

    while let Some(c) = characters.next() {
        if c == ESCAPE {
            match characters.next() {
                Some(next) if next == QUOTE || next == ESCAPE => out.push(next),
                Some(next) => {
                    out.push(c);
                    out.push(next);
                }
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }

    out
}
