//! lexer.rs — Analyse lexicale du langage Teeny
//!
//! Objectifs :
//! - Un token par appel (`next_token`), jusqu’au token `Eof` (puis `Eof` en boucle).
//! - Curseur + un caractère de lookahead ; un `\n` implicite est ajouté en fin
//!   de source pour que la dernière instruction soit toujours terminée.
//! - Espaces/tabulations/`\r` ignorés ; `\n` est un token (fin d’instruction).
//! - Commentaires : `# ...` jusqu’à la fin de ligne.
//! - Littéraux :
//!     - nombres : `42`, `3.14` (pas de signe, `3.` refusé)
//!     - chaînes : `"..."` sans échappes, sans caractère de contrôle, sans `%`
//!       (la chaîne finit telle quelle dans un `printf`)
//!     - identifiants : lettre puis alphanumériques ASCII ; mots-clés résolus
//!       via [`TokenKind::keyword`]
//! - Opérateurs : `+ - * / = == != < <= > >=`.
//!
//! API :
//!   let mut lx = Lexer::new(src);
//!   loop { let tok = lx.next_token()?; if tok.is(TokenKind::Eof) { break; } ... }
//!   // ou: let toks = tokenize(src)?;

use std::iter::{self, Chain, Once};
use std::str::Chars;

use log::trace;

use crate::error::{LexError, LexErrorKind};
use crate::token::{Token, TokenKind};

/* ───────────────────────── Lexer ───────────────────────── */

pub struct Lexer<'a> {
    chars: Chain<Chars<'a>, Once<char>>,
    /// caractère courant (`None` = fin d’entrée)
    cur: Option<char>,
    /// lookahead d’un caractère
    look: Option<char>,
    /// ligne courante, 1-based
    line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        let mut chars = src.chars().chain(iter::once('\n'));
        let cur = chars.next();
        let look = chars.next();
        Self { chars, cur, look, line: 1 }
    }

    /// Tokenise intégralement la source (token `Eof` inclus).
    pub fn tokenize_all(mut self) -> Result<Vec<Token>, LexError> {
        let mut v = Vec::<Token>::new();
        loop {
            let t = self.next_token()?;
            let end = t.is(TokenKind::Eof);
            v.push(t);
            if end {
                break;
            }
        }
        Ok(v)
    }

    /// Lit le prochain token (ignore espaces et commentaires).
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.skip_comment();

        let line = self.line;
        let Some(ch) = self.cur else {
            return Ok(Token::new("", TokenKind::Eof, line));
        };

        let tok = match ch {
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Asterisk),
            '/' => self.single(TokenKind::Slash),
            '\n' => self.single(TokenKind::Newline),
            '=' => self.with_eq(TokenKind::EqEq, TokenKind::Eq),
            '<' => self.with_eq(TokenKind::LtEq, TokenKind::Lt),
            '>' => self.with_eq(TokenKind::GtEq, TokenKind::Gt),
            '!' => {
                if self.peek() != Some('=') {
                    let got = self.peek().unwrap_or('\n');
                    return Err(self.err(LexErrorKind::IncompleteNotEq(got)));
                }
                self.pair(TokenKind::NotEq)
            }
            '"' => self.lex_string()?,
            c if c.is_ascii_digit() => self.lex_number()?,
            c if c.is_ascii_alphabetic() => self.lex_word(),
            other => return Err(self.err(LexErrorKind::UnknownChar(other))),
        };

        trace!("token {:?} {:?} (line {})", tok.kind, tok.text, tok.line);
        Ok(tok)
    }

    /* ────── core ────── */

    fn bump(&mut self) -> Option<char> {
        let c = self.cur?;
        if c == '\n' {
            self.line += 1;
        }
        self.cur = self.look;
        self.look = self.chars.next();
        Some(c)
    }

    const fn peek(&self) -> Option<char> {
        self.look
    }

    fn err(&self, kind: LexErrorKind) -> LexError {
        LexError { line: self.line, kind }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.cur, Some(' ' | '\t' | '\r')) {
            self.bump();
        }
    }

    // s’arrête sur le `\n` : il reste un token significatif
    fn skip_comment(&mut self) {
        if self.cur == Some('#') {
            while !matches!(self.cur, Some('\n') | None) {
                self.bump();
            }
        }
    }

    fn collect_while(&mut self, out: &mut String, f: impl Fn(char) -> bool) {
        while let Some(c) = self.cur {
            if !f(c) {
                break;
            }
            out.push(c);
            self.bump();
        }
    }

    /* ────── opérateurs ────── */

    fn single(&mut self, kind: TokenKind) -> Token {
        let line = self.line;
        let text: String = self.bump().into_iter().collect();
        Token::new(text, kind, line)
    }

    fn pair(&mut self, kind: TokenKind) -> Token {
        let line = self.line;
        let mut text = String::with_capacity(2);
        text.extend(self.bump());
        text.extend(self.bump());
        Token::new(text, kind, line)
    }

    /// `x=` si le lookahead est `=`, sinon `x` seul.
    fn with_eq(&mut self, compound: TokenKind, simple: TokenKind) -> Token {
        if self.peek() == Some('=') {
            self.pair(compound)
        } else {
            self.single(simple)
        }
    }

    /* ────── littéraux ────── */

    fn lex_string(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        self.bump(); // '"' ouvrant
        let mut text = String::new();
        loop {
            match self.cur {
                Some('"') => {
                    self.bump();
                    break;
                }
                Some(c) if c.is_control() || c == '\\' || c == '%' => {
                    return Err(self.err(LexErrorKind::IllegalStringChar(c)));
                }
                Some(c) => {
                    text.push(c);
                    self.bump();
                }
                None => return Err(self.err(LexErrorKind::UnterminatedString)),
            }
        }
        Ok(Token::new(text, TokenKind::String, line))
    }

    fn lex_number(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        let mut text = String::new();
        self.collect_while(&mut text, |c| c.is_ascii_digit());

        if self.cur == Some('.') {
            if !matches!(self.peek(), Some(d) if d.is_ascii_digit()) {
                return Err(self.err(LexErrorKind::MalformedNumber));
            }
            text.push('.');
            self.bump();
            self.collect_while(&mut text, |c| c.is_ascii_digit());
        }
        Ok(Token::new(text, TokenKind::Number, line))
    }

    fn lex_word(&mut self) -> Token {
        let line = self.line;
        let mut text = String::new();
        self.collect_while(&mut text, |c| c.is_ascii_alphanumeric());
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Ident);
        Token::new(text, kind, line)
    }
}

/* ───────────────────────── API top-level ───────────────────────── */

pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(src).tokenize_all()
}

/* ───────────────────────── Tests ───────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::token::TokenKind::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn lex_err(src: &str) -> LexErrorKind {
        tokenize(src).unwrap_err().kind
    }

    #[test]
    fn keywords_and_idents() {
        let t = tokenize("LET foo = IF THEN ENDIF while WHILE2 x1").unwrap();
        assert_eq!(t[0].kind, Let);
        assert_eq!(t[1].kind, Ident);
        assert_eq!(t[1].text, "foo");
        assert_eq!(t[3].kind, If);
        assert_eq!(t[4].kind, Then);
        assert_eq!(t[5].kind, EndIf);
        // casse exacte : `while` et `WHILE2` sont des identifiants
        assert_eq!(t[6].kind, Ident);
        assert_eq!(t[7].kind, Ident);
        assert_eq!(t[8].text, "x1");
    }

    #[test]
    fn numbers() {
        let t = tokenize("3.14 42 0.5").unwrap();
        assert_eq!((t[0].kind, t[0].text.as_str()), (Number, "3.14"));
        assert_eq!((t[1].kind, t[1].text.as_str()), (Number, "42"));
        assert_eq!((t[2].kind, t[2].text.as_str()), (Number, "0.5"));
    }

    #[test]
    fn trailing_dot_rejected() {
        assert_eq!(lex_err("3."), LexErrorKind::MalformedNumber);
        assert_eq!(lex_err("LET a = 3.x"), LexErrorKind::MalformedNumber);
    }

    #[test]
    fn sign_is_not_part_of_number() {
        assert_eq!(kinds("-5"), vec![Minus, Number, Newline, Eof]);
    }

    #[test]
    fn compound_operators() {
        assert_eq!(
            kinds("= == < <= > >= != + - * /"),
            vec![Eq, EqEq, Lt, LtEq, Gt, GtEq, NotEq, Plus, Minus, Asterisk, Slash, Newline, Eof]
        );
        // pas d’espace : maximal munch sur deux caractères
        assert_eq!(kinds("a<=b"), vec![Ident, LtEq, Ident, Newline, Eof]);
    }

    #[test]
    fn bare_bang_rejected() {
        assert_eq!(lex_err("a ! b"), LexErrorKind::IncompleteNotEq(' '));
        assert_eq!(lex_err("!"), LexErrorKind::IncompleteNotEq('\n'));
    }

    #[test]
    fn strings() {
        let t = tokenize("PRINT \"hello, world!\"").unwrap();
        assert_eq!(t[1].kind, String);
        assert_eq!(t[1].text, "hello, world!");
    }

    #[test]
    fn illegal_string_chars() {
        assert_eq!(lex_err("\"50%\""), LexErrorKind::IllegalStringChar('%'));
        assert_eq!(lex_err("\"a\tb\""), LexErrorKind::IllegalStringChar('\t'));
        assert_eq!(lex_err("\"a\rb\""), LexErrorKind::IllegalStringChar('\r'));
        assert_eq!(lex_err("\"a\\nb\""), LexErrorKind::IllegalStringChar('\\'));
        assert_eq!(lex_err("\"a\nb\""), LexErrorKind::IllegalStringChar('\n'));
        // non terminée : on bute sur le `\n` implicite
        assert_eq!(lex_err("\"abc"), LexErrorKind::IllegalStringChar('\n'));
    }

    #[test]
    fn newlines_are_tokens_and_comments_skipped() {
        assert_eq!(
            kinds("# entête\nPRINT 1 # fin\n\n"),
            vec![Newline, Print, Number, Newline, Newline, Newline, Eof]
        );
    }

    #[test]
    fn implicit_trailing_newline() {
        assert_eq!(kinds("INPUT x"), vec![Input, Ident, Newline, Eof]);
        assert_eq!(kinds(""), vec![Newline, Eof]);
    }

    #[test]
    fn eof_is_sticky() {
        let mut lx = Lexer::new("");
        assert_eq!(lx.next_token().unwrap().kind, Newline);
        assert_eq!(lx.next_token().unwrap().kind, Eof);
        assert_eq!(lx.next_token().unwrap().kind, Eof);
    }

    #[test]
    fn unknown_char() {
        assert_eq!(lex_err("LET a = 1 ; "), LexErrorKind::UnknownChar(';'));
        assert_eq!(lex_err("_x"), LexErrorKind::UnknownChar('_'));
    }

    #[test]
    fn line_numbers() {
        let t = tokenize("PRINT 1\n\nLET b = 2\n").unwrap();
        let let_tok = t.iter().find(|t| t.is(Let)).unwrap();
        assert_eq!(let_tok.line, 3);
        let err = tokenize("PRINT 1\nPRINT 2.\n").unwrap_err();
        assert_eq!(err.line, 2);
    }
}
