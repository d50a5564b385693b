use crate::constant::*;

/// The kind of an option, which dictates how it consumes tokens.
///
/// Kinds are fixed at declaration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A flag that takes no value (ex: `--verbose`).
    Boolean,
    /// A named option that may be specified at most once, with a value.
    Optional,
    /// A named option that must be specified exactly once, with a value.
    Required,
    /// A named option that may be specified any number of times, accumulating values.
    Repeated,
    /// A positional option, matched by declaration order among unprefixed tokens.
    Indexed,
    /// A positional option that captures every remaining token.
    Variadic,
}

impl Kind {
    /// Whether this kind carries values (everything but [`Kind::Boolean`]).
    pub fn takes_value(&self) -> bool {
        !matches!(self, Kind::Boolean)
    }

    /// Whether this kind is addressed by name (`--NAME` or `-N`) rather than by position.
    pub fn is_named(&self) -> bool {
        !matches!(self, Kind::Indexed | Kind::Variadic)
    }

    /// Whether this kind must be present by the end of its option set.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Kind::Required | Kind::Indexed)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Immutable parse configuration, shared by reference across a parse pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParseConfig {
    pub(crate) long_prefix: String,
    pub(crate) short_prefix: String,
    pub(crate) use_assignment: bool,
    pub(crate) indexed_first: bool,
    pub(crate) exec_all_handlers: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            long_prefix: DEFAULT_LONG_PREFIX.to_string(),
            short_prefix: DEFAULT_SHORT_PREFIX.to_string(),
            use_assignment: true,
            indexed_first: false,
            exec_all_handlers: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Kind::Boolean, false, true, false)]
    #[case(Kind::Optional, true, true, false)]
    #[case(Kind::Required, true, true, true)]
    #[case(Kind::Repeated, true, true, false)]
    #[case(Kind::Indexed, true, false, true)]
    #[case(Kind::Variadic, true, false, false)]
    fn kind_traits(
        #[case] kind: Kind,
        #[case] takes_value: bool,
        #[case] is_named: bool,
        #[case] is_mandatory: bool,
    ) {
        assert_eq!(kind.takes_value(), takes_value);
        assert_eq!(kind.is_named(), is_named);
        assert_eq!(kind.is_mandatory(), is_mandatory);
    }

    #[test]
    fn config_default() {
        let config = ParseConfig::default();
        assert_eq!(config.long_prefix, "--");
        assert_eq!(config.short_prefix, "-");
        assert!(config.use_assignment);
        assert!(!config.indexed_first);
        assert!(!config.exec_all_handlers);
    }
}
