//! parser.rs — Descente récursive + génération C à la volée
//!
//! Pas d’AST : chaque règle valide sa structure et pousse immédiatement ses
//! fragments C dans l’[`Emitter`]. Fenêtre de lookahead : token courant +
//! token suivant, rechargée un token à la fois.
//!
//! Grammaire :
//! ```text
//! program    := {NEWLINE} {statement}
//! statement  := PRINT (STRING | expression) nl
//!             | IF comparison THEN nl {statement} ENDIF nl
//!             | WHILE comparison REPEAT nl {statement} ENDWHILE nl
//!             | LABEL IDENT nl
//!             | GOTO IDENT nl
//!             | LET IDENT EQ expression nl
//!             | INPUT IDENT nl
//! comparison := expression cmp expression {cmp expression}
//! expression := term {(PLUS | MINUS) term}
//! term       := unary {(ASTERISK | SLASH) unary}
//! unary      := [PLUS | MINUS] primary
//! primary    := NUMBER | IDENT
//! nl         := NEWLINE {NEWLINE}
//! ```
//!
//! L’état de session (variables, labels, lookahead, tampons) vit dans le
//! `Parser` : deux compilations n’ont rien en commun.

use std::collections::HashSet;

use log::{debug, info};

use crate::emitter::Emitter;
use crate::error::{CompileError, ParseError, ParseErrorKind, Result};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    emitter: Emitter,

    /// variables déclarées (LET / INPUT)
    symbols: HashSet<String>,
    labels_declared: HashSet<String>,
    /// cibles de GOTO, dans l’ordre du programme ; vérifiées en fin de parse
    labels_gotoed: Vec<Token>,

    cur: Token,
    peek: Token,
}

impl<'a> Parser<'a> {
    /// Amorce la fenêtre (courant + suivant) : peut déjà échouer au lexing.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let cur = lexer.next_token()?;
        let peek = lexer.next_token()?;
        Ok(Self {
            lexer,
            emitter: Emitter::new(),
            symbols: HashSet::new(),
            labels_declared: HashSet::new(),
            labels_gotoed: Vec::new(),
            cur,
            peek,
        })
    }

    /// Parse le programme entier et rend l’émetteur rempli.
    ///
    /// La première violation (lexicale ou syntaxique) interrompt tout ; la
    /// réconciliation GOTO/LABEL se fait une seule fois, à la fin.
    pub fn parse_program(mut self) -> Result<Emitter> {
        self.emitter.header_line("#include <stdio.h>");
        self.emitter.header_line("int main(void){");

        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        while !self.check(TokenKind::Eof) {
            self.statement()?;
        }

        self.emitter.emit_line("return 0;");
        self.emitter.emit_line("}");

        if let Some(target) = self
            .labels_gotoed
            .iter()
            .find(|t| !self.labels_declared.contains(&t.text))
        {
            return Err(parse_err(target.line, ParseErrorKind::UndeclaredLabel(target.text.clone())));
        }

        info!(
            "parse ok : {} variable(s), {} label(s), {} goto",
            self.symbols.len(),
            self.labels_declared.len(),
            self.labels_gotoed.len()
        );
        Ok(self.emitter)
    }

    /* ────── fenêtre de tokens ────── */

    fn check(&self, kind: TokenKind) -> bool {
        self.cur.is(kind)
    }

    fn advance(&mut self) -> Result<()> {
        let next = self.lexer.next_token()?;
        self.cur = std::mem::replace(&mut self.peek, next);
        Ok(())
    }

    /// Consomme le token courant s’il est de kind `kind`, sinon erreur.
    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if !self.check(kind) {
            return Err(self.error(ParseErrorKind::Expected { expected: kind, found: self.cur.kind }));
        }
        self.advance()
    }

    fn error(&self, kind: ParseErrorKind) -> CompileError {
        parse_err(self.cur.line, kind)
    }

    /// Émet le texte du token courant tel quel puis avance.
    fn emit_current(&mut self) -> Result<()> {
        self.emitter.emit(&self.cur.text);
        self.advance()
    }

    /// Opérateur binaire : entouré d’espaces, sinon `a - -b` deviendrait `a--b`.
    fn emit_binary_op(&mut self) -> Result<()> {
        self.emitter.emit(&format!(" {} ", self.cur.text));
        self.advance()
    }

    // nl := NEWLINE {NEWLINE}
    fn nl(&mut self) -> Result<()> {
        self.expect(TokenKind::Newline)?;
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        Ok(())
    }

    /* ────── instructions ────── */

    fn statement(&mut self) -> Result<()> {
        debug!("statement {} (line {})", self.cur.kind, self.cur.line);
        match self.cur.kind {
            TokenKind::Print => self.print_stmt()?,
            TokenKind::If => self.block_stmt("if(", TokenKind::Then, TokenKind::EndIf)?,
            TokenKind::While => self.block_stmt("while(", TokenKind::Repeat, TokenKind::EndWhile)?,
            TokenKind::Label => self.label_stmt()?,
            TokenKind::Goto => self.goto_stmt()?,
            TokenKind::Let => self.let_stmt()?,
            TokenKind::Input => self.input_stmt()?,
            kind => {
                return Err(self.error(ParseErrorKind::InvalidStatement {
                    text: self.cur.text.clone(),
                    kind,
                }));
            }
        }
        self.nl()
    }

    fn print_stmt(&mut self) -> Result<()> {
        self.advance()?;
        if self.check(TokenKind::String) {
            self.emitter.emit_line(&format!("printf(\"{}\\n\");", self.cur.text));
            self.advance()
        } else {
            self.emitter.emit("printf(\"%.2f\\n\", (float)(");
            self.expression()?;
            self.emitter.emit_line("));");
            Ok(())
        }
    }

    /// IF/WHILE : `open` comparison `then_kw` nl {statement} `end_kw`.
    fn block_stmt(&mut self, open: &str, then_kw: TokenKind, end_kw: TokenKind) -> Result<()> {
        self.advance()?;
        self.emitter.emit(open);
        self.comparison()?;

        self.expect(then_kw)?;
        self.nl()?;
        self.emitter.emit_line("){");

        while !self.check(end_kw) {
            if self.check(TokenKind::Eof) {
                return Err(self.error(ParseErrorKind::Expected { expected: end_kw, found: TokenKind::Eof }));
            }
            self.statement()?;
        }
        self.expect(end_kw)?;
        self.emitter.emit_line("}");
        Ok(())
    }

    fn label_stmt(&mut self) -> Result<()> {
        self.advance()?;
        let name = self.ident()?;
        if !self.labels_declared.insert(name.text.clone()) {
            return Err(parse_err(name.line, ParseErrorKind::DuplicateLabel(name.text)));
        }
        // `x:;` : un label doit précéder une instruction, même en fin de bloc
        self.emitter.emit_line(&format!("{}:;", name.text));
        Ok(())
    }

    fn goto_stmt(&mut self) -> Result<()> {
        self.advance()?;
        let target = self.ident()?;
        self.emitter.emit_line(&format!("goto {};", target.text));
        self.labels_gotoed.push(target);
        Ok(())
    }

    fn let_stmt(&mut self) -> Result<()> {
        self.advance()?;
        let name = self.ident()?;
        // déclarée avant la partie droite : `LET x = x` est accepté
        self.declare(&name.text);
        self.emitter.emit(&format!("{} = ", name.text));
        self.expect(TokenKind::Eq)?;
        self.expression()?;
        self.emitter.emit_line(";");
        Ok(())
    }

    fn input_stmt(&mut self) -> Result<()> {
        self.advance()?;
        let name = self.ident()?;
        self.declare(&name.text);
        // lecture gardée : tout échec (mot invalide ou EOF) ⇒ 0, mot fautif jeté
        self.emitter.emit_line(&format!("if(1 != scanf(\"%f\", &{})) {{", name.text));
        self.emitter.emit_line(&format!("{} = 0;", name.text));
        self.emitter.emit_line("scanf(\"%*s\");");
        self.emitter.emit_line("}");
        Ok(())
    }

    /// Consomme un IDENT et le rend.
    fn ident(&mut self) -> Result<Token> {
        let tok = self.cur.clone();
        self.expect(TokenKind::Ident)?;
        Ok(tok)
    }

    /// Première apparition ⇒ symbole + déclaration `float` dans le header.
    fn declare(&mut self, name: &str) {
        if self.symbols.insert(name.to_owned()) {
            self.emitter.header_line(&format!("float {name};"));
        }
    }

    /* ────── expressions ────── */

    // comparison := expression cmp expression {cmp expression}
    fn comparison(&mut self) -> Result<()> {
        self.expression()?;
        if !self.cur.kind.is_comparison() {
            return Err(self.error(ParseErrorKind::MissingComparator(self.cur.text.clone())));
        }
        while self.cur.kind.is_comparison() {
            self.emit_binary_op()?;
            self.expression()?;
        }
        Ok(())
    }

    // expression := term {(PLUS | MINUS) term}
    fn expression(&mut self) -> Result<()> {
        self.term()?;
        while self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            self.emit_binary_op()?;
            self.term()?;
        }
        Ok(())
    }

    // term := unary {(ASTERISK | SLASH) unary}
    fn term(&mut self) -> Result<()> {
        self.unary()?;
        while self.check(TokenKind::Asterisk) || self.check(TokenKind::Slash) {
            self.emit_binary_op()?;
            self.unary()?;
        }
        Ok(())
    }

    // unary := [PLUS | MINUS] primary
    fn unary(&mut self) -> Result<()> {
        if self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            self.emit_current()?;
        }
        self.primary()
    }

    // primary := NUMBER | IDENT
    fn primary(&mut self) -> Result<()> {
        match self.cur.kind {
            TokenKind::Number => self.emit_current(),
            TokenKind::Ident => {
                if !self.symbols.contains(&self.cur.text) {
                    return Err(self.error(ParseErrorKind::UndeclaredVariable(self.cur.text.clone())));
                }
                self.emit_current()
            }
            kind => Err(self.error(ParseErrorKind::UnexpectedPrimary {
                text: self.cur.text.clone(),
                kind,
            })),
        }
    }
}

fn parse_err(line: u32, kind: ParseErrorKind) -> CompileError {
    CompileError::Parse(ParseError { line, kind })
}

/// Raccourci : compile une source Teeny en texte C complet (sans I/O).
pub fn translate(src: &str) -> Result<String> {
    let parser = Parser::new(Lexer::new(src))?;
    Ok(parser.parse_program()?.finalize())
}

/* ───────────────────────── Tests ───────────────────────── */
