//! crates/logging/src/entry.rs
//! The message payload accepted by every recording entry point.

use std::fmt;

/// Message payload handed to a logger.
///
/// Callers build entries explicitly instead of passing loosely typed
/// arguments. A lone string is always [`Entry::Plain`] and is emitted
/// verbatim, so braces or percent signs in user data are never interpreted.
/// Formatting only happens when the caller asks for it through
/// [`Entry::formatted`] (or the logging macros with extra arguments).
///
/// # Examples
///
/// ```
/// use logging::Entry;
///
/// let plain = Entry::from("100% {done}");
/// assert_eq!(plain.render(), "100% {done}");
///
/// let formatted = Entry::formatted(format_args!("copied {} files", 3));
/// assert_eq!(formatted.render(), "copied 3 files");
///
/// let error = std::io::Error::other("disk full");
/// assert_eq!(Entry::error(&error).render(), "ERROR: disk full");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// An error value, rendered as `ERROR: <error>`.
    Error(String),
    /// Text produced from a format string and arguments.
    Formatted(String),
    /// Text used exactly as given.
    Plain(String),
}

impl Entry {
    /// Builds an entry from an error value.
    pub fn error<E>(error: &E) -> Self
    where
        E: fmt::Display + ?Sized,
    {
        Self::Error(error.to_string())
    }

    /// Builds an entry from pre-captured format arguments.
    pub fn formatted(args: fmt::Arguments<'_>) -> Self {
        Self::Formatted(fmt::format(args))
    }

    /// Builds an entry from verbatim text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Returns the text exactly as the caller supplied it.
    pub fn text(&self) -> &str {
        match self {
            Self::Error(text) | Self::Formatted(text) | Self::Plain(text) => text,
        }
    }

    /// Renders the entry into the message that gets recorded.
    pub fn render(&self) -> String {
        match self {
            Self::Error(error) => format!("ERROR: {error}"),
            Self::Formatted(text) | Self::Plain(text) => text.clone(),
        }
    }

    /// Prepends `prefix` to textual entries; error entries are left as-is.
    pub(crate) fn prefixed(self, prefix: &str) -> Self {
        match self {
            Self::Formatted(text) => Self::Formatted(format!("{prefix}{text}")),
            Self::Plain(text) => Self::Plain(format!("{prefix}{text}")),
            error @ Self::Error(_) => error,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => write!(f, "ERROR: {error}"),
            Self::Formatted(text) | Self::Plain(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_owned())
    }
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<&String> for Entry {
    fn from(text: &String) -> Self {
        Self::Plain(text.clone())
    }
}

impl From<fmt::Arguments<'_>> for Entry {
    fn from(args: fmt::Arguments<'_>) -> Self {
        Self::formatted(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_interpreted() {
        let entry = Entry::from("50% of {items}");
        assert_eq!(entry.render(), "50% of {items}");
        assert!(matches!(entry, Entry::Plain(_)));
    }

    #[test]
    fn error_entries_are_tagged() {
        let error = std::io::Error::other("permission denied");
        let entry = Entry::error(&error);
        assert_eq!(entry.text(), "permission denied");
        assert_eq!(entry.render(), "ERROR: permission denied");
        assert_eq!(entry.to_string(), entry.render());
    }

    #[test]
    fn format_arguments_become_formatted_entries() {
        let entry: Entry = format_args!("{}-{}", "a", 1).into();
        assert_eq!(entry, Entry::Formatted("a-1".to_owned()));
    }

    #[test]
    fn prefixed_applies_to_text_only() {
        assert_eq!(
            Entry::plain("Done.").prefixed("build ... "),
            Entry::Plain("build ... Done.".to_owned())
        );
        assert_eq!(
            Entry::formatted(format_args!("{} left", 2)).prefixed("sync ... "),
            Entry::Formatted("sync ... 2 left".to_owned())
        );
        let error = Entry::Error("boom".to_owned());
        assert_eq!(error.clone().prefixed("task ... "), error);
    }
}
