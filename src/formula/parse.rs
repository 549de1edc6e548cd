//! Reader for formulas written in the same notation `Display` produces.
//!
//! ```text
//! formula := implication ( "<->" formula )?
//! implication := disjunction ( "->" implication )?
//! disjunction := conjunction ( ("v" | "|") disjunction )?
//! conjunction := unary ( ("^" | "&") conjunction )?
//! unary := ("!" | "~") unary | "(" formula ")" | "true" | "false" | name
//! name := identifier | "'" any text without quotes or newlines "'"
//! ```
//!
//! Binary operators associate to the right, so `a v b v c` reads as `(a v (b v c))`.
//! The bare words `v`, `true` and `false` are not identifiers; variables with those
//! names (or any name that isn't an identifier) are written quoted, as in `'v'`. `#`
//! starts a comment that runs to the end of the line.

use crate::formula::Proposition;
use crate::Error;
use logos::{Lexer, Logos};
use std::io::Read;

pub fn parse(input: &str) -> Result<Proposition, Error> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: input.len(),
    };
    let formula = parser.formula()?;
    match parser.peek() {
        None => Ok(formula),
        Some((offset, token)) => {
            Err(parse_error(offset, format!("unexpected {}", token.describe())))
        }
    }
}

pub fn parse_reader<R: Read>(mut reader: R) -> Result<Proposition, Error> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse(&input)
}

#[derive(Logos, Clone, Copy, PartialEq, Eq, Debug)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
enum Token<'a> {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice())]
    Ident(&'a str),

    #[regex(r"'[^'\n]*'", unquote)]
    Quoted(&'a str),

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("!")]
    #[token("~")]
    Not,

    #[token("^")]
    #[token("&")]
    And,

    #[token("v", priority = 3)]
    #[token("|")]
    Or,

    #[token("->")]
    Implies,

    #[token("<->")]
    Iff,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

fn unquote<'a>(lex: &mut Lexer<'a, Token<'a>>) -> &'a str {
    let quoted = lex.slice();
    &quoted[1..quoted.len() - 1]
}

impl Token<'_> {
    fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("identifier '{}'", name),
            Token::Quoted(name) => format!("name '{}'", name),
            Token::True => "'true'".into(),
            Token::False => "'false'".into(),
            Token::Not => "'!'".into(),
            Token::And => "'^'".into(),
            Token::Or => "'v'".into(),
            Token::Implies => "'->'".into(),
            Token::Iff => "'<->'".into(),
            Token::LParen => "'('".into(),
            Token::RParen => "')'".into(),
        }
    }
}

fn parse_error(offset: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        offset,
        message: message.into(),
    }
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token<'_>)>, Error> {
    let mut lexer = Token::lexer(input);
    let mut tokens = vec![];
    while let Some(token) = lexer.next() {
        let offset = lexer.span().start;
        match token {
            Ok(token) => tokens.push((offset, token)),
            Err(()) => {
                return Err(parse_error(offset, format!("unexpected input '{}'", lexer.slice())))
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<(usize, Token<'a>)>,
    pos: usize,
    end: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<(usize, Token<'a>)> {
        self.tokens.get(self.pos).copied()
    }

    fn eat(&mut self, token: Token<'a>) -> bool {
        match self.peek() {
            Some((_, t)) if t == token => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn formula(&mut self) -> Result<Proposition, Error> {
        let left = self.implication()?;
        if self.eat(Token::Iff) {
            Ok(Proposition::iff(left, self.formula()?))
        } else {
            Ok(left)
        }
    }

    fn implication(&mut self) -> Result<Proposition, Error> {
        let left = self.disjunction()?;
        if self.eat(Token::Implies) {
            Ok(Proposition::implies(left, self.implication()?))
        } else {
            Ok(left)
        }
    }

    fn disjunction(&mut self) -> Result<Proposition, Error> {
        let left = self.conjunction()?;
        if self.eat(Token::Or) {
            Ok(Proposition::disjunction(left, self.disjunction()?))
        } else {
            Ok(left)
        }
    }

    fn conjunction(&mut self) -> Result<Proposition, Error> {
        let left = self.unary()?;
        if self.eat(Token::And) {
            Ok(Proposition::conjunction(left, self.conjunction()?))
        } else {
            Ok(left)
        }
    }

    fn unary(&mut self) -> Result<Proposition, Error> {
        let (offset, token) = self
            .peek()
            .ok_or_else(|| parse_error(self.end, "unexpected end of input"))?;
        self.pos += 1;
        match token {
            Token::Not => Ok(Proposition::negation(self.unary()?)),
            Token::LParen => {
                let inner = self.formula()?;
                if self.eat(Token::RParen) {
                    Ok(inner)
                } else {
                    let at = self.peek().map_or(self.end, |(offset, _)| offset);
                    Err(parse_error(at, "expected ')'"))
                }
            }
            Token::True => Ok(Proposition::constant(true)),
            Token::False => Ok(Proposition::constant(false)),
            Token::Ident(name) | Token::Quoted(name) => Ok(Proposition::variable(name)),
            other => Err(parse_error(offset, format!("unexpected {}", other.describe()))),
        }
    }
}
