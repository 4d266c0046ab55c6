/// Where the scanner currently is in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    /// Inside a `'` or `"` string; holds the opening quote.
    Str(char),
    /// Inside a backtick template literal. Treated as opaque text.
    Template,
}

/// Remove `//` and `/* */` comments from C-family source (C, C++, JS, CSS).
///
/// Comment markers inside single-quoted, double-quoted and backtick strings
/// are left alone. A backslash outside comments always copies the following
/// character verbatim, so `\"` or `` \` `` never close a string.
///
/// - Line comments are removed up to, but not including, the newline.
/// - Block comments do not nest; the first `*/` closes them. An unterminated
///   block comment runs to the end of input.
/// - An unterminated string simply runs to the end of input.
/// - A lone trailing backslash is kept as a literal character.
pub fn strip_c_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars().peekable();
    let mut state = State::Code;

    while let Some(c) = chars.next() {
        state = match state {
            State::LineComment => {
                if c == '\n' {
                    out.push(c);
                    State::Code
                } else {
                    State::LineComment
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    State::Code
                } else {
                    State::BlockComment
                }
            }
            _ if c == '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
                state
            }
            State::Code => match (c, chars.peek().copied()) {
                ('/', Some('*')) => {
                    chars.next();
                    State::BlockComment
                }
                ('/', Some('/')) => {
                    chars.next();
                    State::LineComment
                }
                ('"' | '\'', _) => {
                    out.push(c);
                    State::Str(c)
                }
                ('`', _) => {
                    out.push(c);
                    State::Template
                }
                _ => {
                    out.push(c);
                    State::Code
                }
            },
            State::Str(quote) => {
                out.push(c);
                if c == quote { State::Code } else { state }
            }
            State::Template => {
                out.push(c);
                if c == '`' { State::Code } else { state }
            }
        };
    }

    out
}
