pub(crate) const DEFAULT_LONG_PREFIX: &str = "--";
pub(crate) const DEFAULT_SHORT_PREFIX: &str = "-";
pub(crate) const ASSIGNMENT_DELIMITER: char = '=';
pub(crate) const QUOTE: char = '"';
pub(crate) const ESCAPE: char = '\\';
