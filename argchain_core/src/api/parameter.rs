use crate::api::capture::*;
use crate::model::Kind;

pub(crate) struct AnonymousCapture<'a, T: 'a> {
    field: Box<dyn GenericCapturable<'a, T> + 'a>,
}

impl<'a, T> AnonymousCapture<'a, T> {
    pub(crate) fn bind(field: impl GenericCapturable<'a, T> + 'a) -> Self {
        Self {
            field: Box::new(field),
        }
    }
}

impl<'a, T> AnonymousCapturable for AnonymousCapture<'a, T> {
    fn matched(&mut self) {
        self.field.matched();
    }

    fn capture(&mut self, value: &str) -> Result<(), InvalidCapture> {
        self.field.capture(value)
    }

    fn takes_value(&self) -> bool {
        self.field.takes_value()
    }
}

/// An option declaration: its identity, its [`Kind`], and optionally a bound variable.
///
/// The long name identifies the option within its set, and is used to address named kinds on the Cli (ex: `--NAME`).
/// Positional kinds ([`Kind::Indexed`], [`Kind::Variadic`]) are never addressed by name; their long name identifies them in errors and lookups.
///
/// ### Example
/// ```
/// # use argchain_core as argchain;
/// use argchain::{CommandLineParser, Parameter, Scalar, Switch};
///
/// let mut force: bool = false;
/// let mut count: u32 = 1;
/// let mut parser = CommandLineParser::new("program")
///     .add(Parameter::boolean("force").short('f').bind(Switch::new(&mut force, true)))
///     .add(Parameter::optional("count").short('c').bind(Scalar::new(&mut count)));
///
/// parser.parse_tokens(vec!["-f", "-c=9000"].as_slice()).unwrap();
/// drop(parser);
///
/// assert!(force);
/// assert_eq!(count, 9000);
/// ```
pub struct Parameter<'a> {
    name: String,
    short: Option<char>,
    kind: Kind,
    help: Option<String>,
    field: Option<Box<dyn AnonymousCapturable + 'a>>,
}

impl<'a> Parameter<'a> {
    fn new(kind: Kind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            kind,
            help: None,
            field: None,
        }
    }

    /// Create a [`Kind::Boolean`] option: a flag that takes no value.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(Kind::Boolean, name)
    }

    /// Create a [`Kind::Optional`] option: a value that may be specified at most once.
    pub fn optional(name: impl Into<String>) -> Self {
        Self::new(Kind::Optional, name)
    }

    /// Create a [`Kind::Required`] option: a value that must be specified exactly once.
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(Kind::Required, name)
    }

    /// Create a [`Kind::Repeated`] option: a value that may be specified any number of times.
    pub fn repeated(name: impl Into<String>) -> Self {
        Self::new(Kind::Repeated, name)
    }

    /// Create a [`Kind::Indexed`] option: a positional value, matched in declaration order.
    pub fn indexed(name: impl Into<String>) -> Self {
        Self::new(Kind::Indexed, name)
    }

    /// Create a [`Kind::Variadic`] option: captures every remaining token.
    pub fn variadic(name: impl Into<String>) -> Self {
        Self::new(Kind::Variadic, name)
    }

    /// Set the short name of this option (ex: `-f`).
    /// If repeated, only the final short name will apply.
    pub fn short(mut self, short: char) -> Self {
        self.short.replace(short);
        self
    }

    /// Document the help message for this option.
    /// If repeated, only the final help message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Bind a variable to this option via a field (ex: [`Scalar`](crate::Scalar)).
    /// The variable is written as soon as the option's value is resolved during parsing.
    /// If repeated, only the final binding will apply.
    pub fn bind<T>(mut self, field: impl GenericCapturable<'a, T> + 'a) -> Self
    where
        T: 'a,
    {
        self.field.replace(Box::new(AnonymousCapture::bind(field)));
        self
    }

    /// The long name of this option.
    pub fn long_name(&self) -> &str {
        &self.name
    }

    /// The short name of this option, if any.
    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    /// The kind of this option.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The help message of this option, if any.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Whether a variable is bound to this option.
    pub fn is_bound(&self) -> bool {
        self.field.is_some()
    }

    /// Whether the bound field (if any) is compatible with the kind.
    pub(crate) fn binding_compatible(&self) -> bool {
        match &self.field {
            Some(field) => field.takes_value() == self.kind.takes_value(),
            None => true,
        }
    }

    pub(crate) fn matched(&mut self) {
        if let Some(field) = self.field.as_mut() {
            field.matched();
        }
    }

    pub(crate) fn capture(&mut self, value: &str) -> Result<(), InvalidCapture> {
        match self.field.as_mut() {
            Some(field) => field.capture(value),
            None => Ok(()),
        }
    }
}

impl<'a> std::fmt::Debug for Parameter<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let short = match &self.short {
            Some(s) => format!(" -{s},"),
            None => "".to_string(),
        };
        let help = if let Some(d) = &self.help {
            format!(", {d}")
        } else {
            "".to_string()
        };

        write!(
            f,
            "{kind}[{name},{short} bound={bound}{help}]",
            kind = self.kind,
            name = self.name,
            bound = self.is_bound(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Collection, Scalar, Switch};
    use rstest::rstest;

    #[rstest]
    #[case(Parameter::boolean("name"), Kind::Boolean)]
    #[case(Parameter::optional("name"), Kind::Optional)]
    #[case(Parameter::required("name"), Kind::Required)]
    #[case(Parameter::repeated("name"), Kind::Repeated)]
    #[case(Parameter::indexed("name"), Kind::Indexed)]
    #[case(Parameter::variadic("name"), Kind::Variadic)]
    fn constructors(#[case] parameter: Parameter<'static>, #[case] kind: Kind) {
        assert_eq!(parameter.long_name(), "name");
        assert_eq!(parameter.kind(), kind);
        assert_eq!(parameter.short_name(), None);
        assert_eq!(parameter.help_text(), None);
        assert!(!parameter.is_bound());
        assert!(parameter.binding_compatible());
    }

    #[test]
    fn builders() {
        let parameter = Parameter::optional("count")
            .short('x')
            .short('c')
            .help("discarded")
            .help("How many.");
        assert_eq!(parameter.short_name(), Some('c'));
        assert_eq!(parameter.help_text(), Some("How many."));
        assert_eq!(
            format!("{parameter:?}"),
            "Optional[count, -c, bound=false, How many.]"
        );
    }

    #[test]
    fn binding_compatibility() {
        let mut flag = false;
        let mut value: u32 = 0;
        let mut values: Vec<u32> = Vec::default();

        assert!(Parameter::boolean("a")
            .bind(Switch::new(&mut flag, true))
            .binding_compatible());
        assert!(!Parameter::boolean("b")
            .bind(Scalar::new(&mut value))
            .binding_compatible());
        assert!(!Parameter::optional("c")
            .bind(Switch::new(&mut flag, true))
            .binding_compatible());
        assert!(Parameter::variadic("d")
            .bind(Collection::new(&mut values))
            .binding_compatible());
    }

    #[test]
    fn matched_and_capture() {
        let mut flag = false;
        let mut value: u32 = 0;

        let mut parameter = Parameter::boolean("flag").bind(Switch::new(&mut flag, true));
        parameter.matched();
        drop(parameter);
        assert!(flag);

        let mut parameter = Parameter::required("value").bind(Scalar::new(&mut value));
        parameter.matched();
        parameter.capture("12").unwrap();
        assert_matches!(
            parameter.capture("twelve"),
            Err(InvalidCapture::InvalidConversion { .. })
        );
        drop(parameter);
        assert_eq!(value, 12);
    }

    #[test]
    fn unbound_capture() {
        let mut parameter = Parameter::required("value");
        parameter.matched();
        parameter.capture("anything").unwrap();
    }
}
