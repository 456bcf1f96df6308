//! Whitespace tokenizer for monitor input lines.

use crate::config::MAX_ARGS;
use crate::error::MonitorError;

/// Characters that separate tokens.
pub const WHITESPACE: [char; 4] = ['\t', '\r', '\n', ' '];

/// Tokens accepted per line.
pub const MAX_TOKENS: usize = MAX_ARGS - 1;

/// The tokens of one line, borrowed from it.
#[derive(Debug, Clone, Copy)]
pub struct Args<'l> {
    slots: [&'l str; MAX_TOKENS],
    len: usize,
}

impl<'l> Args<'l> {
    #[must_use]
    pub fn as_slice(&self) -> &[&'l str] {
        &self.slots[..self.len]
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The command name, i.e. the first token.
    #[must_use]
    pub fn command(&self) -> Option<&'l str> {
        self.as_slice().first().copied()
    }

    /// Everything after the command name.
    #[must_use]
    pub fn rest(&self) -> &[&'l str] {
        self.as_slice().get(1..).unwrap_or(&[])
    }
}

/// Split `line` on [`WHITESPACE`], dropping empty tokens.
///
/// # Errors
/// [`MonitorError::TooManyArguments`] if the line has more than
/// [`MAX_TOKENS`] tokens.
pub fn tokenize(line: &str) -> Result<Args<'_>, MonitorError<'static>> {
    let mut args = Args {
        slots: [""; MAX_TOKENS],
        len: 0,
    };
    for token in line.split(WHITESPACE).filter(|t| !t.is_empty()) {
        let slot = args
            .slots
            .get_mut(args.len)
            .ok_or(MonitorError::TooManyArguments)?;
        *slot = token;
        args.len += 1;
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_all_separators() {
        let args = tokenize("\tsm  f0000000\r\nf0001000 ").unwrap();
        assert_eq!(args.as_slice(), ["sm", "f0000000", "f0001000"]);
        assert_eq!(args.command(), Some("sm"));
        assert_eq!(args.rest(), ["f0000000", "f0001000"]);
    }

    #[test]
    fn blank_line_has_no_tokens() {
        let args = tokenize(" \t ").unwrap();
        assert!(args.is_empty());
        assert_eq!(args.command(), None);
        assert!(args.rest().is_empty());
    }

    #[test]
    fn fifteen_tokens_fit_sixteen_do_not() {
        let fifteen = "a ".repeat(15);
        assert_eq!(tokenize(&fifteen).unwrap().len(), 15);

        let sixteen = "a ".repeat(16);
        assert_eq!(
            tokenize(&sixteen).unwrap_err(),
            MonitorError::TooManyArguments
        );
    }
}
