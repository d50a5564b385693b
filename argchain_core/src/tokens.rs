use crate::model::ParseConfig;

/// The classification of the token under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// The stream is exhausted.
    None,
    /// The token starts with the long prefix (ex: `--verbose`).
    Long,
    /// The token starts with the short prefix, but not the long prefix (ex: `-v`).
    Short,
    /// Any other token (ex: `items`).
    Text,
}

/// A forward-only cursor over the input tokens.
///
/// Classification is a pure function of the head token and the two configured prefixes.
#[derive(Debug)]
pub(crate) struct TokenStream<'c> {
    long_prefix: &'c str,
    short_prefix: &'c str,
    tokens: Vec<String>,
    cursor: usize,
}

impl<'c> TokenStream<'c> {
    pub(crate) fn new(config: &'c ParseConfig, tokens: &[&str]) -> Self {
        Self {
            long_prefix: &config.long_prefix,
            short_prefix: &config.short_prefix,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            cursor: 0,
        }
    }

    pub(crate) fn kind(&self) -> TokenKind {
        match self.raw() {
            None => TokenKind::None,
            // When the long prefix is itself short-prefixed, the long classification must win.
            Some(token) if token.starts_with(self.long_prefix) => TokenKind::Long,
            Some(token) if token.starts_with(self.short_prefix) => TokenKind::Short,
            Some(_) => TokenKind::Text,
        }
    }

    /// The current token with its classified prefix stripped.
    pub(crate) fn text(&self) -> Option<&str> {
        let token = self.raw()?;

        match self.kind() {
            TokenKind::Long => token.strip_prefix(self.long_prefix),
            TokenKind::Short => token.strip_prefix(self.short_prefix),
            TokenKind::Text => Some(token),
            TokenKind::None => None,
        }
    }

    pub(crate) fn raw(&self) -> Option<&str> {
        self.tokens.get(self.cursor).map(String::as_str)
    }

    pub(crate) fn advance(&mut self) -> bool {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn remaining(&self) -> &[String] {
        &self.tokens[self.cursor..]
    }

    pub(crate) fn truncate(&mut self) {
        self.cursor = self.tokens.len();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cursor >= self.tokens.len()
    }
}
