use std::marker::PhantomData;
use std::str::FromStr;

use crate::api::capture::*;
use crate::prelude::Collectable;

/// A field that takes a single value, overwriting the variable on each capture.
///
/// Any `T: FromStr` may be used, which covers the primitive numeric types, `bool`, `String`, and custom types.
///
/// ### Example
/// ```
/// # use argchain_core as argchain;
/// use argchain::{CommandLineParser, Parameter, Scalar};
///
/// let mut port: u16 = 0;
/// let mut parser = CommandLineParser::new("program")
///     .add(Parameter::optional("port").bind(Scalar::new(&mut port)));
///
/// parser.parse_tokens(vec!["--port=8080"].as_slice()).unwrap();
/// drop(parser);
///
/// assert_eq!(port, 8080);
/// ```
///
/// Calendar dates and timestamps are bound the same way, through their `FromStr` implementation.
/// Durations have a dedicated field, [`TimeSpan`].
/// ```
/// # use argchain_core as argchain;
/// use argchain::{CommandLineParser, Parameter, Scalar};
/// use chrono::{DateTime, NaiveDate, Utc};
///
/// let mut since = NaiveDate::default();
/// let mut until: DateTime<Utc> = DateTime::default();
/// let mut parser = CommandLineParser::new("program")
///     .add(Parameter::required("since").bind(Scalar::new(&mut since)))
///     .add(Parameter::required("until").bind(Scalar::new(&mut until)));
///
/// parser
///     .parse_tokens(vec!["--since=2024-02-29", "--until=2024-03-01T12:00:00Z"].as_slice())
///     .unwrap();
/// drop(parser);
///
/// assert_eq!(since, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(until.to_rfc3339(), "2024-03-01T12:00:00+00:00");
/// ```
pub struct Scalar<'a, T> {
    variable: &'a mut T,
}

impl<'a, T> Scalar<'a, T> {
    /// Create a scalar field.
    pub fn new(variable: &'a mut T) -> Self {
        Self { variable }
    }
}

impl<'a, T> GenericCapturable<'a, T> for Scalar<'a, T>
where
    T: FromStr,
{
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        *self.variable = convert(token)?;
        Ok(())
    }

    fn takes_value(&self) -> bool {
        true
    }
}

/// A field that takes no values, setting the variable to its target when the option is matched.
///
/// This is the field for [`Kind::Boolean`](crate::Kind::Boolean) options.
/// Note that `Switch` may apply to any type `T` (not restricted to just `bool`).
///
/// ### Example
/// ```
/// # use argchain_core as argchain;
/// use argchain::{CommandLineParser, Parameter, Switch};
///
/// let mut verbose: bool = false;
/// let mut parser = CommandLineParser::new("program")
///     .add(Parameter::boolean("verbose").short('v').bind(Switch::new(&mut verbose, true)));
///
/// parser.parse_tokens(vec!["-v"].as_slice()).unwrap();
/// drop(parser);
///
/// assert!(verbose);
/// ```
pub struct Switch<'a, T> {
    variable: &'a mut T,
    target: T,
}

impl<'a, T> Switch<'a, T> {
    /// Create a switch field.
    pub fn new(variable: &'a mut T, target: T) -> Self {
        Self { variable, target }
    }
}

impl<'a, T> GenericCapturable<'a, T> for Switch<'a, T>
where
    T: Clone,
{
    fn matched(&mut self) {
        *self.variable = self.target.clone();
    }

    fn capture(&mut self, _token: &str) -> Result<(), InvalidCapture> {
        unreachable!("internal error - must not capture on a Switch");
    }

    fn takes_value(&self) -> bool {
        false
    }
}

/// A field that maps down to [`Option`], taking a single value.
pub struct Optional<'a, T> {
    variable: &'a mut Option<T>,
}

impl<'a, T> Optional<'a, T> {
    /// Create an optional field.
    pub fn new(variable: &'a mut Option<T>) -> Self {
        Self { variable }
    }
}

impl<'a, T> GenericCapturable<'a, T> for Optional<'a, T>
where
    T: FromStr,
{
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        self.variable.replace(convert(token)?);
        Ok(())
    }

    fn takes_value(&self) -> bool {
        true
    }
}

/// A field that adds each captured value to a [`Collectable`].
///
/// Use this for [`Kind::Repeated`](crate::Kind::Repeated) and [`Kind::Variadic`](crate::Kind::Variadic) options.
/// The initial contents of the collection are kept; captured values are added after them.
///
/// ### Example
/// ```
/// # use argchain_core as argchain;
/// use argchain::{CommandLineParser, Parameter, Collection};
///
/// let mut tags: Vec<String> = vec!["default".to_string()];
/// let mut parser = CommandLineParser::new("program")
///     .add(Parameter::repeated("tag").bind(Collection::new(&mut tags)));
///
/// parser.parse_tokens(vec!["--tag=a", "--tag=b"].as_slice()).unwrap();
/// drop(parser);
///
/// assert_eq!(tags, vec!["default", "a", "b"]);
/// ```
pub struct Collection<'a, C, T>
where
    C: Collectable<T>,
{
    variable: &'a mut C,
    _phantom: PhantomData<T>,
}

impl<'a, C, T> Collection<'a, C, T>
where
    C: Collectable<T>,
{
    /// Create a collection field.
    pub fn new(variable: &'a mut C) -> Self {
        Self {
            variable,
            _phantom: PhantomData,
        }
    }
}

impl<'a, C, T> GenericCapturable<'a, T> for Collection<'a, C, T>
where
    C: Collectable<T>,
    T: FromStr,
{
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        self.variable.add(convert(token)?);
        Ok(())
    }

    fn takes_value(&self) -> bool {
        true
    }
}

/// A field that captures a [`std::time::Duration`] from duration text.
///
/// The text is a sequence of decimal numbers, each with an optional fraction and a mandatory unit suffix.
/// Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`; the bare value `0` needs no unit.
/// For example: `300ms`, `1.5s`, `2h45m`.
///
/// ### Example
/// ```
/// # use argchain_core as argchain;
/// use argchain::{CommandLineParser, Parameter, TimeSpan};
/// use std::time::Duration;
///
/// let mut timeout = Duration::from_secs(30);
/// let mut parser = CommandLineParser::new("program")
///     .add(Parameter::optional("timeout").bind(TimeSpan::new(&mut timeout)));
///
/// parser.parse_tokens(vec!["--timeout=1m30s"].as_slice()).unwrap();
/// drop(parser);
///
/// assert_eq!(timeout, Duration::from_secs(90));
/// ```
pub struct TimeSpan<'a> {
    variable: &'a mut std::time::Duration,
}

impl<'a> TimeSpan<'a> {
    /// Create a duration field.
    pub fn new(variable: &'a mut std::time::Duration) -> Self {
        Self { variable }
    }
}

impl<'a> GenericCapturable<'a, std::time::Duration> for TimeSpan<'a> {
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        *self.variable = parse_duration(token).map_err(|reason| InvalidCapture::InvalidDuration {
            token: token.to_string(),
            reason,
        })?;
        Ok(())
    }

    fn takes_value(&self) -> bool {
        true
    }
}

fn convert<T: FromStr>(token: &str) -> Result<T, InvalidCapture> {
    T::from_str(token).map_err(|_| InvalidCapture::InvalidConversion {
        token: token.to_string(),
        type_name: std::any::type_name::<T>(),
    })
}

// Fractional digits beyond nanosecond precision (for the largest unit) carry no information.
const MAX_FRACTION_DIGITS: usize = 18;
const NANOS_PER_SECOND: u128 = 1_000_000_000;

pub(crate) fn parse_duration(token: &str) -> Result<std::time::Duration, String> {
    let mut rest = token.strip_prefix('+').unwrap_or(token);

    if let Some(negative) = rest.strip_prefix('-') {
        return if negative == "0" {
            Ok(std::time::Duration::ZERO)
        } else {
            Err("negative durations are not supported".to_string())
        };
    }

    if rest == "0" {
        return Ok(std::time::Duration::ZERO);
    }

    if rest.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total: u128 = 0;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SECOND,
            "m" => 60 * NANOS_PER_SECOND,
            "h" => 3_600 * NANOS_PER_SECOND,
            "" => return Err(format!("missing unit after '{number}'")),
            other => return Err(format!("unknown unit '{other}'")),
        };

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));

        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return Err(format!("invalid number '{number}'"));
        }

        let mut nanos: u128 = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .ok()
                .and_then(|w| w.checked_mul(scale))
                .ok_or_else(|| "duration overflow".to_string())?
        };

        if !fraction.is_empty() {
            let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
            let digits: u128 = fraction
                .parse()
                .map_err(|_| format!("invalid number '{number}'"))?;
            nanos += digits * scale / 10u128.pow(fraction.len() as u32);
        }

        total = total
            .checked_add(nanos)
            .ok_or_else(|| "duration overflow".to_string())?;
        rest = tail;
    }

    let seconds =
        u64::try_from(total / NANOS_PER_SECOND).map_err(|_| "duration overflow".to_string())?;
    Ok(std::time::Duration::new(
        seconds,
        (total % NANOS_PER_SECOND) as u32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;
    use std::time::Duration;

    #[test]
    fn scalar_capture() {
        // Integer
        let mut variable: u32 = u32::default();
        let mut scalar = Scalar::new(&mut variable);
        scalar.capture("5").unwrap();
        assert!(scalar.takes_value());
        assert_eq!(variable, 5);

        // Boolean
        let mut variable: bool = false;
        let mut scalar = Scalar::new(&mut variable);
        scalar.capture("true").unwrap();
        assert!(variable);

        // Float
        let mut variable: f64 = 0.0;
        let mut scalar = Scalar::new(&mut variable);
        scalar.capture("2.5").unwrap();
        assert_eq!(variable, 2.5);
    }

    #[test]
    fn scalar_overwrites() {
        let mut variable: String = "initial".to_string();
        let mut scalar = Scalar::new(&mut variable);
        scalar.capture("a").unwrap();
        scalar.capture("b").unwrap();
        assert_eq!(variable, "b");
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("-1")]
    #[case("")]
    fn scalar_invalid(#[case] token: &str) {
        let mut variable: u32 = 7;
        let mut scalar = Scalar::new(&mut variable);
        assert_eq!(
            scalar.capture(token).unwrap_err(),
            InvalidCapture::InvalidConversion {
                token: token.to_string(),
                type_name: "u32",
            }
        );
        assert_eq!(variable, 7);
    }

    #[test]
    fn scalar_chrono() {
        let mut variable = chrono::NaiveDate::default();
        let mut scalar = Scalar::new(&mut variable);
        scalar.capture("2024-02-29").unwrap();
        assert_eq!(
            variable,
            chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn switch_matched() {
        let mut variable: u8 = 0;
        let mut switch = Switch::new(&mut variable, 3);
        assert!(!switch.takes_value());
        switch.matched();
        switch.matched();
        assert_eq!(variable, 3);
    }

    #[test]
    fn optional_capture() {
        let mut variable: Option<u32> = None;
        let mut optional = Optional::new(&mut variable);
        optional.capture("1").unwrap();
        assert_eq!(variable, Some(1));
    }

    #[test]
    fn collection_capture() {
        // Vec<u32>
        let mut variable: Vec<u32> = vec![9];
        let mut collection = Collection::new(&mut variable);
        collection.capture("1").unwrap();
        collection.capture("0").unwrap();
        assert_eq!(variable, vec![9, 1, 0]);

        // HashSet<u32>
        let mut variable: HashSet<u32> = HashSet::default();
        let mut collection = Collection::new(&mut variable);
        collection.capture("1").unwrap();
        collection.capture("0").unwrap();
        collection.capture("0").unwrap();
        assert_eq!(variable, HashSet::from([0, 1]));
    }

    #[rstest]
    #[case("0", Duration::ZERO)]
    #[case("-0", Duration::ZERO)]
    #[case("+5s", Duration::from_secs(5))]
    #[case("300ms", Duration::from_millis(300))]
    #[case("1.5s", Duration::from_millis(1500))]
    #[case(".5s", Duration::from_millis(500))]
    #[case("2h45m", Duration::from_secs(2 * 3600 + 45 * 60))]
    #[case("1m30s", Duration::from_secs(90))]
    #[case("10us", Duration::from_micros(10))]
    #[case("10µs", Duration::from_micros(10))]
    #[case("7ns", Duration::from_nanos(7))]
    #[case("1h0.5m", Duration::from_secs(3630))]
    fn duration_valid(#[case] token: &str, #[case] expected: Duration) {
        assert_eq!(parse_duration(token).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("5")]
    #[case("-5s")]
    #[case("5x")]
    #[case(".s")]
    #[case("1.2.3s")]
    #[case("s")]
    fn duration_invalid(#[case] token: &str) {
        assert!(parse_duration(token).is_err());
    }

    #[test]
    fn time_span_capture() {
        let mut variable = Duration::from_secs(1);
        let mut time_span = TimeSpan::new(&mut variable);
        time_span.capture("250ms").unwrap();
        assert_eq!(variable, Duration::from_millis(250));

        let mut time_span = TimeSpan::new(&mut variable);
        assert_matches!(
            time_span.capture("soon"),
            Err(InvalidCapture::InvalidDuration { token, .. }) if token == "soon"
        );
        assert_eq!(variable, Duration::from_millis(250));
    }
}
