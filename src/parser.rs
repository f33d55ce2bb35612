use std::fmt;

use crate::{
    ast::{Const, Constraint, FuncCall, Projection, RelOp, Segment, Selection, Slice, Token, Value, VarRef},
    lexer::{LexError, Lexer},
};

/// Errors raised while parsing a token stream into a [`Constraint`].
///
/// Any error is fatal to the whole parse; no partial AST is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The scanner rejected the input
    Lex(LexError),

    /// The token stream does not match the grammar
    Unexpected { expected: String, found: String },

    /// A slice index that is not a non-negative integer
    InvalidIndex(String),

    /// Slice bounds violating `start >= 0`, `stride > 0`, `stop >= start`
    InvalidSlice {
        start: i64,
        stride: i64,
        stop: i64,
        reason: &'static str,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::Unexpected { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            ParseError::InvalidIndex(text) => {
                write!(f, "invalid index '{}': must be a non-negative integer", text)
            }
            ParseError::InvalidSlice {
                start,
                stride,
                stop,
                reason,
            } => {
                write!(f, "invalid slice [{}:{}:{}]: {}", start, stride, stop, reason)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

/// Parse a constraint-expression string.
///
/// # Examples
///
/// ```
/// use cexpr_lang::parser::parse;
///
/// let constraint = parse("Temperature[0:2:10],Lat&Temperature>5.0").unwrap();
/// assert_eq!(constraint.projections.as_ref().unwrap().len(), 2);
/// assert_eq!(constraint.selections.as_ref().unwrap().len(), 1);
/// ```
pub fn parse(input: &str) -> Result<Constraint, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.current_token) == std::mem::discriminant(token)
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<(), ParseError> {
        if !self.check(&token) {
            return Err(self.unexpected(expected));
        }
        self.advance()
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::Unexpected {
            expected: expected.to_string(),
            found: match &self.current_token {
                Token::Eof => "end of input".to_string(),
                token => format!("{:?}", token),
            },
        }
    }

    /// Parse a complete constraint: `'?'? projections? selections?`.
    pub fn parse(&mut self) -> Result<Constraint, ParseError> {
        if self.check(&Token::Question) {
            self.advance()?;
        }

        let projections = if self.check(&Token::Ampersand) || self.check(&Token::Eof) {
            None
        } else {
            Some(self.parse_projection_list()?)
        };

        let mut selections = vec![];
        while self.check(&Token::Ampersand) {
            self.advance()?;
            selections.push(self.parse_selection()?);
        }

        self.expect(Token::Eof, "end of constraint")?;

        Ok(Constraint {
            projections,
            selections: if selections.is_empty() {
                None
            } else {
                Some(selections)
            },
        })
    }

    fn parse_projection_list(&mut self) -> Result<Vec<Projection>, ParseError> {
        let mut projections = vec![self.parse_projection()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            projections.push(self.parse_projection()?);
        }
        Ok(projections)
    }

    /// A projection is either a sliced variable path or a function call;
    /// both start with a word, disambiguated by the following `(`.
    fn parse_projection(&mut self) -> Result<Projection, ParseError> {
        let name = self.parse_word("variable or function name")?;
        if self.check(&Token::LParen) {
            Ok(Projection::Call(self.parse_call(name)?))
        } else {
            Ok(Projection::Var(self.parse_var(name)?))
        }
    }

    fn parse_word(&mut self, expected: &str) -> Result<String, ParseError> {
        match std::mem::replace(&mut self.current_token, Token::Eof) {
            Token::Word(name) => {
                self.advance()?;
                Ok(name)
            }
            token => {
                self.current_token = token;
                Err(self.unexpected(expected))
            }
        }
    }

    /// Parse the remainder of a variable path, the first segment's name
    /// already consumed: `segment ('.' segment)*`.
    fn parse_var(&mut self, first: String) -> Result<VarRef, ParseError> {
        let mut segments = vec![self.parse_segment(first)?];
        while self.check(&Token::Dot) {
            self.advance()?;
            let name = self.parse_word("path segment after '.'")?;
            segments.push(self.parse_segment(name)?);
        }
        Ok(VarRef { segments })
    }

    fn parse_segment(&mut self, name: String) -> Result<Segment, ParseError> {
        let mut slices = vec![];
        while self.check(&Token::LBracket) {
            slices.push(self.parse_slice()?);
        }
        Ok(Segment { name, slices })
    }

    /// `'[' n ']'` | `'[' start ':' stop ']'` | `'[' start ':' stride ':' stop ']'`.
    ///
    /// A bare index is sugar for a single-point slice. Bounds are validated
    /// here: a violation is a parse error, not a resolution-time error.
    fn parse_slice(&mut self) -> Result<Slice, ParseError> {
        self.expect(Token::LBracket, "'['")?;
        let first = self.parse_index()?;

        let (start, stride, stop) = if self.check(&Token::Colon) {
            self.advance()?;
            let second = self.parse_index()?;
            if self.check(&Token::Colon) {
                self.advance()?;
                let third = self.parse_index()?;
                (first, second, third)
            } else {
                (first, 1, second)
            }
        } else {
            (first, 1, first)
        };

        self.expect(Token::RBracket, "']'")?;

        Slice::new(start, stride, stop).map_err(|reason| ParseError::InvalidSlice {
            start,
            stride,
            stop,
            reason,
        })
    }

    fn parse_index(&mut self) -> Result<i64, ParseError> {
        match std::mem::replace(&mut self.current_token, Token::Eof) {
            Token::Number(text) => {
                self.advance()?;
                text.parse::<i64>()
                    .map_err(|_| ParseError::InvalidIndex(text))
            }
            token => {
                self.current_token = token;
                Err(self.unexpected("slice index"))
            }
        }
    }

    /// Parse a function call, the name already consumed: `'(' arglist? ')'`.
    fn parse_call(&mut self, name: String) -> Result<FuncCall, ParseError> {
        self.expect(Token::LParen, "'('")?;
        let mut args = vec![];
        if !self.check(&Token::RParen) {
            args.push(self.parse_value()?);
            while self.check(&Token::Comma) {
                self.advance()?;
                args.push(self.parse_value()?);
            }
        }
        self.expect(Token::RParen, "')'")?;
        Ok(FuncCall { name, args })
    }

    /// `value := constant | var | call`.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match std::mem::replace(&mut self.current_token, Token::Eof) {
            Token::Number(text) => {
                self.advance()?;
                Ok(Value::Constant(parse_number(&text)))
            }
            Token::Str(text) => {
                self.advance()?;
                Ok(Value::Constant(Const::Str(text)))
            }
            Token::Word(name) => {
                self.advance()?;
                if self.check(&Token::LParen) {
                    Ok(Value::Call(self.parse_call(name)?))
                } else {
                    Ok(Value::Var(self.parse_var(name)?))
                }
            }
            token => {
                self.current_token = token;
                Err(self.unexpected("constant, variable, or function call"))
            }
        }
    }

    /// One selection clause, its leading `&` already consumed:
    /// `value relop value` | `value relop '{' value (',' value)* '}'` |
    /// `boolfunction`.
    fn parse_selection(&mut self) -> Result<Selection, ParseError> {
        let lhs = self.parse_value()?;

        let Some(op) = self.parse_rel_op()? else {
            // No operator: only a boolean function call stands alone.
            return match lhs {
                Value::Call(call) => Ok(Selection::Call(call)),
                _ => Err(self.unexpected("relational operator")),
            };
        };

        let rhs = if self.check(&Token::LBrace) {
            self.advance()?;
            let mut values = vec![self.parse_value()?];
            while self.check(&Token::Comma) {
                self.advance()?;
                values.push(self.parse_value()?);
            }
            self.expect(Token::RBrace, "'}'")?;
            values
        } else {
            vec![self.parse_value()?]
        };

        Ok(Selection::Compare { lhs, op, rhs })
    }

    /// Assemble a relational operator from one or two punctuation tokens.
    fn parse_rel_op(&mut self) -> Result<Option<RelOp>, ParseError> {
        let op = match &self.current_token {
            Token::Eq => {
                self.advance()?;
                RelOp::Eq
            }
            Token::Gt => {
                self.advance()?;
                if self.check(&Token::Eq) {
                    self.advance()?;
                    RelOp::Ge
                } else {
                    RelOp::Gt
                }
            }
            Token::Lt => {
                self.advance()?;
                if self.check(&Token::Eq) {
                    self.advance()?;
                    RelOp::Le
                } else {
                    RelOp::Lt
                }
            }
            Token::Bang => {
                self.advance()?;
                self.expect(Token::Eq, "'=' after '!'")?;
                RelOp::Ne
            }
            Token::Tilde => {
                self.advance()?;
                self.expect(Token::Eq, "'=' after '~'")?;
                RelOp::RegexMatch
            }
            _ => return Ok(None),
        };
        Ok(Some(op))
    }
}

/// Classify numeric literal text with an integer-then-float fallback.
fn parse_number(text: &str) -> Const {
    match text.parse::<i64>() {
        Ok(n) => Const::Int(n),
        // the lexer only emits Number for text f64 accepts
        Err(_) => Const::Float(text.parse::<f64>().unwrap_or(f64::NAN)),
    }
}
