//! Single-pass lexer: source text to a flat token stream, skipping
//! whitespace and comments silently, recovering from unknown characters
//! by discarding them one at a time.

use crate::token::{Token, TokenKind};

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    col: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            let (line, col) = (self.line, self.col);
            let Some(c) = self.peek() else {
                tokens.push(Token::new(TokenKind::Eof, "", line, col));
                break;
            };

            if c.is_ascii_digit() {
                tokens.push(self.lex_number(line, col));
                continue;
            }
            if c.is_ascii_alphabetic() || c == '_' {
                tokens.push(self.lex_identifier(line, col));
                continue;
            }
            if let Some(tok) = self.lex_operator(line, col) {
                tokens.push(tok);
                continue;
            }
            // unrecognized character: skip it silently, no diagnostic.
            self.advance();
        }
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.advance();
                }
                Some('/') if self.peek_at(1) == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    self.advance();
                    self.advance();
                    loop {
                        match self.peek() {
                            None => break,
                            Some('*') if self.peek_at(1) == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            Some(_) => {
                                self.advance();
                            }
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn lex_number(&mut self, line: u32, col: u32) -> Token {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            lexeme.push(c);
            self.advance();
        }
        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            lexeme.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                lexeme.push(c);
                self.advance();
            }
        }
        let kind = if is_float { TokenKind::FloatLit } else { TokenKind::IntLit };
        Token::new(kind, lexeme, line, col)
    }

    fn lex_identifier(&mut self, line: u32, col: u32) -> Token {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            lexeme.push(c);
            self.advance();
        }
        let kind = TokenKind::keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, line, col)
    }

    fn lex_operator(&mut self, line: u32, col: u32) -> Option<Token> {
        let c = self.peek()?;
        let two = self.peek_at(1);
        let (kind, len) = match (c, two) {
            ('<', Some('=')) => (TokenKind::Le, 2),
            ('>', Some('=')) => (TokenKind::Ge, 2),
            ('=', Some('=')) => (TokenKind::Eq, 2),
            ('!', Some('=')) => (TokenKind::NotEq, 2),
            ('&', Some('&')) => (TokenKind::AndAnd, 2),
            ('|', Some('|')) => (TokenKind::OrOr, 2),
            ('<', _) => (TokenKind::Lt, 1),
            ('>', _) => (TokenKind::Gt, 1),
            ('=', _) => (TokenKind::Assign, 1),
            ('!', _) => (TokenKind::Bang, 1),
            ('+', _) => (TokenKind::Plus, 1),
            ('-', _) => (TokenKind::Minus, 1),
            ('*', _) => (TokenKind::Star, 1),
            ('/', _) => (TokenKind::Slash, 1),
            ('%', _) => (TokenKind::Percent, 1),
            ('(', _) => (TokenKind::LParen, 1),
            (')', _) => (TokenKind::RParen, 1),
            ('{', _) => (TokenKind::LBrace, 1),
            ('}', _) => (TokenKind::RBrace, 1),
            (',', _) => (TokenKind::Comma, 1),
            (';', _) => (TokenKind::Semicolon, 1),
            _ => return None,
        };
        let mut lexeme = String::new();
        for _ in 0..len {
            lexeme.push(self.advance().expect("checked by peek above"));
        }
        Some(Token::new(kind, lexeme, line, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("int x"),
            vec![TokenKind::Int, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn boolean_literals_map_to_bool_lit() {
        assert_eq!(
            kinds("true false"),
            vec![TokenKind::BoolLit, TokenKind::BoolLit, TokenKind::Eof]
        );
    }

    #[test]
    fn numbers_integer_and_float() {
        let toks = Lexer::new("42 3.5").tokenize();
        assert_eq!(toks[0].kind, TokenKind::IntLit);
        assert_eq!(toks[0].lexeme, "42");
        assert_eq!(toks[1].kind, TokenKind::FloatLit);
        assert_eq!(toks[1].lexeme, "3.5");
    }

    #[test]
    fn two_char_operators_prefer_longest_match() {
        assert_eq!(
            kinds("<= >= == != && ||"),
            vec![
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn line_comment_is_skipped() {
        assert_eq!(kinds("1 // trailing\n2"), vec![TokenKind::IntLit, TokenKind::IntLit, TokenKind::Eof]);
    }

    #[test]
    fn unterminated_block_comment_consumes_rest_of_source() {
        assert_eq!(kinds("1 /* oops"), vec![TokenKind::IntLit, TokenKind::Eof]);
    }

    #[test]
    fn unknown_character_is_silently_skipped() {
        assert_eq!(kinds("1 @ 2"), vec![TokenKind::IntLit, TokenKind::IntLit, TokenKind::Eof]);
    }

    #[test]
    fn non_ascii_whitespace_is_not_trivia() {
        // U+00A0 non-breaking space is not one of the four trivia
        // characters; it falls through the unrecognized-character path
        // like any other unknown byte, same as `@` above.
        assert_eq!(kinds("1\u{a0}2"), vec![TokenKind::IntLit, TokenKind::IntLit, TokenKind::Eof]);
    }

    #[test]
    fn line_and_column_tracking() {
        let toks = Lexer::new("int\nx").tokenize();
        assert_eq!((toks[0].line, toks[0].col), (1, 1));
        assert_eq!((toks[1].line, toks[1].col), (2, 1));
    }
}
