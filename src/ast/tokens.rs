#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Identifier or dotted-path component, percent-escapes already decoded
    ///
    /// # Examples
    /// ```text
    /// Temperature
    /// wind_speed
    /// temp%20max   (decodes to "temp max")
    /// ```
    Word(String),

    /// String literal enclosed in double quotes
    ///
    /// The text is kept verbatim; only `\"` and `\\` are unescaped, and
    /// percent-escapes are *not* decoded (unlike [`Token::Word`]).
    ///
    /// # Examples
    /// ```text
    /// "station 41"
    /// "st.*n"
    /// ```
    Str(String),

    /// Numeric literal, kept as raw text
    ///
    /// The parser decides integer vs. float later with an
    /// integer-then-float parse fallback.
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 5.0
    /// 1e-3
    /// ```
    Number(String),

    // Delimiters
    /// Optional constraint prefix `?`
    Question,

    /// Comma separating projections, arguments, and set members
    Comma,

    /// Left parenthesis opening a function argument list
    LParen,

    /// Right parenthesis
    RParen,

    /// Dot separating path segments
    Dot,

    /// Left bracket opening a slice
    LBracket,

    /// Colon separating slice bounds
    Colon,

    /// Right bracket
    RBracket,

    /// Ampersand prefixing each selection clause
    Ampersand,

    /// Left brace opening a value set on a clause's right-hand side
    LBrace,

    /// Right brace
    RBrace,

    /// Semicolon (reserved delimiter, rejected by the grammar)
    Semicolon,

    // Relational operator characters
    //
    // Two-character operators (`>=`, `<=`, `!=`, `~=`) are assembled by the
    // parser from these single-character tokens.
    /// Equals
    Eq,

    /// Greater than
    Gt,

    /// Less than
    Lt,

    /// Exclamation mark (first half of `!=`)
    Bang,

    /// Tilde (first half of the regex-match operator `~=`)
    Tilde,

    /// End of input
    Eof,
}
