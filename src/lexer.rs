//! Token stream over Java source text.
//!
//! Comments and whitespace are skipped; every other byte becomes a token,
//! with anything unrecognized surfacing as `TokenKind::Unknown` so the
//! parser can recover instead of stopping.

use crate::ast::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) text: String,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    At,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Dot,
    Colon,
    Question,
    /// `->` in switch rules and lambdas.
    Arrow,
    EqEq,
    BangEq,
    AndAnd,
    OrOr,
    Bang,
    Eq,
    /// Any compound assignment operator (`+=`, `&=`, ...).
    CompoundEq,
    PlusPlus,
    MinusMinus,
    Lt,
    Gt,
    Le,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Unknown,
}

pub(crate) struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    line: u32,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(text: &'a str) -> Lexer<'a> {
        Lexer { text, pos: 0, line: 1 }
    }

    fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn eat_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.bump_char();
            true
        } else {
            false
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while matches!(self.peek_char(), Some(ch) if ch.is_whitespace()) {
                self.bump_char();
            }
            let rest = self.remaining();
            if rest.starts_with("//") {
                while let Some(ch) = self.bump_char() {
                    if ch == '\n' {
                        break;
                    }
                }
                continue;
            }
            if rest.starts_with("/*") {
                self.bump_char();
                self.bump_char();
                while !self.remaining().is_empty() && !self.remaining().starts_with("*/") {
                    self.bump_char();
                }
                if self.remaining().starts_with("*/") {
                    self.bump_char();
                    self.bump_char();
                }
                continue;
            }
            break;
        }
    }

    fn lex_identifier(&mut self, first: char) -> String {
        let mut text = String::new();
        text.push(first);
        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                text.push(ch);
                self.bump_char();
            } else {
                break;
            }
        }
        text
    }

    fn lex_number(&mut self, first: char) -> (TokenKind, String) {
        let mut kind = TokenKind::IntLiteral;
        let mut text = String::new();
        text.push(first);
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                // hex digits and suffixes such as 0x1F, 10L, 1.5f
                text.push(ch);
                self.bump_char();
            } else if ch == '.' && kind == TokenKind::IntLiteral {
                kind = TokenKind::FloatLiteral;
                text.push(ch);
                self.bump_char();
            } else {
                break;
            }
        }
        (kind, text)
    }

    /// Consumes up to the closing quote; the opening quote is already eaten.
    fn lex_quoted(&mut self, quote: char) -> String {
        let mut text = String::new();
        text.push(quote);
        while let Some(ch) = self.bump_char() {
            text.push(ch);
            if ch == quote {
                break;
            }
            if ch == '\\' {
                if let Some(escaped) = self.bump_char() {
                    text.push(escaped);
                }
            }
        }
        text
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        let line = self.line;
        let first = self.bump_char()?;

        let (kind, text) = match first {
            '{' => (TokenKind::LBrace, "{".to_string()),
            '}' => (TokenKind::RBrace, "}".to_string()),
            '(' => (TokenKind::LParen, "(".to_string()),
            ')' => (TokenKind::RParen, ")".to_string()),
            '[' => (TokenKind::LBracket, "[".to_string()),
            ']' => (TokenKind::RBracket, "]".to_string()),
            ';' => (TokenKind::Semi, ";".to_string()),
            ',' => (TokenKind::Comma, ",".to_string()),
            '.' => (TokenKind::Dot, ".".to_string()),
            ':' => (TokenKind::Colon, ":".to_string()),
            '?' => (TokenKind::Question, "?".to_string()),
            '@' => (TokenKind::At, "@".to_string()),
            '~' => (TokenKind::Tilde, "~".to_string()),
            '=' => {
                if self.eat_char('=') {
                    (TokenKind::EqEq, "==".to_string())
                } else {
                    (TokenKind::Eq, "=".to_string())
                }
            }
            '!' => {
                if self.eat_char('=') {
                    (TokenKind::BangEq, "!=".to_string())
                } else {
                    (TokenKind::Bang, "!".to_string())
                }
            }
            '&' => {
                if self.eat_char('&') {
                    (TokenKind::AndAnd, "&&".to_string())
                } else if self.eat_char('=') {
                    (TokenKind::CompoundEq, "&=".to_string())
                } else {
                    (TokenKind::Amp, "&".to_string())
                }
            }
            '|' => {
                if self.eat_char('|') {
                    (TokenKind::OrOr, "||".to_string())
                } else if self.eat_char('=') {
                    (TokenKind::CompoundEq, "|=".to_string())
                } else {
                    (TokenKind::Pipe, "|".to_string())
                }
            }
            '+' => {
                if self.eat_char('+') {
                    (TokenKind::PlusPlus, "++".to_string())
                } else if self.eat_char('=') {
                    (TokenKind::CompoundEq, "+=".to_string())
                } else {
                    (TokenKind::Plus, "+".to_string())
                }
            }
            '-' => {
                if self.eat_char('>') {
                    (TokenKind::Arrow, "->".to_string())
                } else if self.eat_char('-') {
                    (TokenKind::MinusMinus, "--".to_string())
                } else if self.eat_char('=') {
                    (TokenKind::CompoundEq, "-=".to_string())
                } else {
                    (TokenKind::Minus, "-".to_string())
                }
            }
            '*' => {
                if self.eat_char('=') {
                    (TokenKind::CompoundEq, "*=".to_string())
                } else {
                    (TokenKind::Star, "*".to_string())
                }
            }
            '/' => {
                // comments were consumed above, so this is plain division
                if self.eat_char('=') {
                    (TokenKind::CompoundEq, "/=".to_string())
                } else {
                    (TokenKind::Slash, "/".to_string())
                }
            }
            '%' => {
                if self.eat_char('=') {
                    (TokenKind::CompoundEq, "%=".to_string())
                } else {
                    (TokenKind::Percent, "%".to_string())
                }
            }
            '^' => {
                if self.eat_char('=') {
                    (TokenKind::CompoundEq, "^=".to_string())
                } else {
                    (TokenKind::Caret, "^".to_string())
                }
            }
            '<' => {
                if self.eat_char('=') {
                    (TokenKind::Le, "<=".to_string())
                } else {
                    (TokenKind::Lt, "<".to_string())
                }
            }
            '>' => {
                if self.eat_char('=') {
                    (TokenKind::Ge, ">=".to_string())
                } else {
                    (TokenKind::Gt, ">".to_string())
                }
            }
            '"' => (TokenKind::StringLiteral, self.lex_quoted('"')),
            '\'' => (TokenKind::CharLiteral, self.lex_quoted('\'')),
            ch if ch.is_ascii_digit() => self.lex_number(ch),
            ch if ch.is_alphabetic() || ch == '_' || ch == '$' => {
                (TokenKind::Ident, self.lex_identifier(ch))
            }
            ch => (TokenKind::Unknown, ch.to_string()),
        };

        Some(Token {
            kind,
            text,
            span: Span::new(start, self.pos, line),
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        Lexer::new(text).map(|token| token.kind).collect()
    }

    #[test]
    fn lexes_punctuation_and_operators() {
        assert_eq!(
            kinds("a == null && !b || c != d"),
            vec![
                TokenKind::Ident,
                TokenKind::EqEq,
                TokenKind::Ident,
                TokenKind::AndAnd,
                TokenKind::Bang,
                TokenKind::Ident,
                TokenKind::OrOr,
                TokenKind::Ident,
                TokenKind::BangEq,
                TokenKind::Ident,
            ]
        );
    }

    #[test]
    fn distinguishes_assignment_from_equality() {
        assert_eq!(
            kinds("a = b == c += 1"),
            vec![
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::Ident,
                TokenKind::EqEq,
                TokenKind::Ident,
                TokenKind::CompoundEq,
                TokenKind::IntLiteral,
            ]
        );
    }

    #[test]
    fn skips_line_and_block_comments() {
        let tokens: Vec<Token> = Lexer::new("a // one\n/* two\nthree */ b").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "a");
        assert_eq!(tokens[1].text, "b");
        assert_eq!(tokens[1].span.line, 3);
    }

    #[test]
    fn tracks_line_numbers_from_one() {
        let tokens: Vec<Token> = Lexer::new("a\nb\n\nc").collect();
        let lines: Vec<u32> = tokens.iter().map(|token| token.span.line).collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn keeps_escapes_inside_string_literals() {
        let tokens: Vec<Token> = Lexer::new(r#"say("a \"quoted\" word")"#).collect();
        assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[2].text, r#""a \"quoted\" word""#);
    }

    #[test]
    fn lexes_numbers_with_suffixes() {
        assert_eq!(
            kinds("0x1F 10L 1.5f 3"),
            vec![
                TokenKind::IntLiteral,
                TokenKind::IntLiteral,
                TokenKind::FloatLiteral,
                TokenKind::IntLiteral,
            ]
        );
    }

    #[test]
    fn spans_cover_token_text() {
        let text = "if (value != null)";
        for token in Lexer::new(text) {
            assert_eq!(&text[token.span.start..token.span.end], token.text);
        }
    }

    #[test]
    fn unrecognized_bytes_become_unknown_tokens() {
        assert_eq!(kinds("a # b"), vec![TokenKind::Ident, TokenKind::Unknown, TokenKind::Ident]);
    }
}
