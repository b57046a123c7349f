/// Controls whether a [`LineWriter`](crate::LineWriter) terminates records with a newline.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Terminate each record with a newline unless it already ends with one.
    #[default]
    WithNewline,
    /// Emit the record exactly as rendered.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode terminates records with a newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::LineMode;
    ///
    /// assert!(LineMode::WithNewline.append_newline());
    /// assert!(!LineMode::WithoutNewline.append_newline());
    /// ```
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }

    /// Appends a trailing newline to `line` when the mode requires one.
    ///
    /// Records that already end with `\n` are left alone so payloads coming
    /// from line-oriented writers are not double-spaced.
    pub fn terminate(self, line: &mut String) {
        if self.append_newline() && !line.ends_with('\n') {
            line.push('\n');
        }
    }
}

impl From<bool> for LineMode {
    /// `true` maps to [`LineMode::WithNewline`], `false` to [`LineMode::WithoutNewline`].
    fn from(append_newline: bool) -> Self {
        if append_newline {
            Self::WithNewline
        } else {
            Self::WithoutNewline
        }
    }
}

impl From<LineMode> for bool {
    fn from(mode: LineMode) -> Self {
        mode.append_newline()
    }
}
