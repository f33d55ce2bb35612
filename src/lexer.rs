use std::collections::VecDeque;
use std::fmt;

use crate::ast::Token;

/// Errors raised while scanning constraint text.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A quoted string ran off the end of the input
    UnterminatedString { offset: usize },

    /// A character outside the identifier/delimiter alphabet
    IllegalCharacter { ch: char, offset: usize },

    /// A `%` in an identifier not followed by two hex digits
    InvalidEscape { text: String, offset: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedString { offset } => {
                write!(f, "unterminated string starting at offset {}", offset)
            }
            LexError::IllegalCharacter { ch, offset } => {
                write!(f, "illegal character '{}' at offset {}", ch, offset)
            }
            LexError::InvalidEscape { text, offset } => {
                write!(f, "invalid %-escape in '{}' at offset {}", text, offset)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Characters that may appear inside an identifier or number run.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '+' | '_' | '/' | '%' | '\\' | '.')
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    /// Characters consumed and then returned, re-read before the input.
    /// Needed for the number/dotted-path backtracking below.
    pushback: VecDeque<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            pushback: VecDeque::new(),
        }
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some(ch) = self.pushback.pop_front() {
            return Some(ch);
        }
        let ch = self.input.get(self.position).copied();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }

    fn unread_char(&mut self, ch: char) {
        self.pushback.push_front(ch);
    }

    /// Return a run of characters so they are re-read in the given order.
    fn unread_run(&mut self, run: &[char]) {
        for &ch in run.iter().rev() {
            self.pushback.push_front(ch);
        }
    }

    /// Offset of the next unconsumed character, for error messages.
    fn offset(&self) -> usize {
        self.position - self.pushback.len()
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let Some(ch) = self.next_char() else {
                return Ok(Token::Eof);
            };

            // Space, newline, and anything below 0x20 is skipped.
            if ch == ' ' || (ch as u32) < 0x20 {
                continue;
            }

            return match ch {
                '?' => Ok(Token::Question),
                ',' => Ok(Token::Comma),
                '(' => Ok(Token::LParen),
                ')' => Ok(Token::RParen),
                '[' => Ok(Token::LBracket),
                ':' => Ok(Token::Colon),
                ']' => Ok(Token::RBracket),
                '&' => Ok(Token::Ampersand),
                '{' => Ok(Token::LBrace),
                '}' => Ok(Token::RBrace),
                ';' => Ok(Token::Semicolon),
                '=' => Ok(Token::Eq),
                '>' => Ok(Token::Gt),
                '<' => Ok(Token::Lt),
                '!' => Ok(Token::Bang),
                '~' => Ok(Token::Tilde),
                '"' => self.read_string(),
                ch if is_word_char(ch) => self.read_word_or_number(ch),
                ch => Err(LexError::IllegalCharacter {
                    ch,
                    offset: self.offset() - 1,
                }),
            };
        }
    }

    /// Read a quoted string. A backslash protects the terminating quote and
    /// the backslash itself; any other escaped character keeps its backslash
    /// verbatim, and `%XX` escapes are *not* decoded here.
    fn read_string(&mut self) -> Result<Token, LexError> {
        let start = self.offset() - 1;
        let mut result = String::new();

        loop {
            match self.next_char() {
                None => return Err(LexError::UnterminatedString { offset: start }),
                Some('"') => return Ok(Token::Str(result)),
                Some('\\') => match self.next_char() {
                    None => return Err(LexError::UnterminatedString { offset: start }),
                    Some(ch @ ('"' | '\\')) => result.push(ch),
                    Some(ch) => {
                        result.push('\\');
                        result.push(ch);
                    }
                },
                Some(ch) => result.push(ch),
            }
        }
    }

    /// Read a maximal identifier/number run and classify it.
    ///
    /// Embedded spaces are allowed mid-run; trailing spaces are returned to
    /// the input. A run that parses as a number becomes a [`Token::Number`].
    /// Otherwise a run containing `.` is ambiguous between a number-like
    /// prefix and a dotted path: the run is truncated before the first `.`
    /// and the rest (dot included) is returned to the input, so the dot
    /// re-emerges as its own token on the next scan.
    fn read_word_or_number(&mut self, first: char) -> Result<Token, LexError> {
        let mut run = vec![first];
        while let Some(ch) = self.next_char() {
            if is_word_char(ch) || ch == ' ' {
                run.push(ch);
            } else {
                self.unread_char(ch);
                break;
            }
        }
        while run.last() == Some(&' ') {
            run.pop();
            self.unread_char(' ');
        }

        let text: String = run.iter().collect();

        // Require a digit so identifiers like "inf" or "NaN" stay words even
        // though f64's parser accepts them.
        let number_like = text.contains(|c: char| c.is_ascii_digit());
        if number_like && text.parse::<f64>().is_ok() {
            return Ok(Token::Number(text));
        }

        if let Some(dot) = run.iter().position(|&c| c == '.') {
            if dot == 0 {
                self.unread_run(&run[1..]);
                return Ok(Token::Dot);
            }
            self.unread_run(&run[dot..]);
            let head: String = run[..dot].iter().collect();
            return Ok(Token::Word(self.unescape_word(&head)?));
        }

        Ok(Token::Word(self.unescape_word(&text)?))
    }

    /// Decode `%XX` escapes in identifier text. Strings never get this.
    fn unescape_word(&self, text: &str) -> Result<String, LexError> {
        if !text.contains('%') {
            return Ok(text.to_string());
        }

        let mut result = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch != '%' {
                result.push(ch);
                continue;
            }
            let hi = chars.next().and_then(|c| c.to_digit(16));
            let lo = chars.next().and_then(|c| c.to_digit(16));
            match (hi, lo) {
                (Some(hi), Some(lo)) => result.push(char::from((hi * 16 + lo) as u8)),
                _ => {
                    return Err(LexError::InvalidEscape {
                        text: text.to_string(),
                        offset: self.offset(),
                    });
                }
            }
        }
        Ok(result)
    }
}

#[test]
fn test_dotted_path_backtracks_through_pushback() {
    let mut lexer = Lexer::new("g.a[0]");
    assert_eq!(lexer.next_token(), Ok(Token::Word("g".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Dot));
    assert_eq!(lexer.next_token(), Ok(Token::Word("a".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::LBracket));
    assert_eq!(lexer.next_token(), Ok(Token::Number("0".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::RBracket));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_number_wins_over_word() {
    let mut lexer = Lexer::new("5.0&x");
    assert_eq!(lexer.next_token(), Ok(Token::Number("5.0".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Ampersand));
    assert_eq!(lexer.next_token(), Ok(Token::Word("x".to_string())));
}
