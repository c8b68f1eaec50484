//! error.rs — Erreurs structurées du frontend
//!
//! Toute erreur est fatale : la première violation détectée remonte jusqu’au
//! pilote, qui décide seul de la sortie du process.

use thiserror::Error;

use crate::token::TokenKind;

/* ───────────────────────── Lexing ───────────────────────── */

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (line {line})")]
pub struct LexError {
    pub line: u32,
    pub kind: LexErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// Caractère de contrôle, `\` ou `%` dans une chaîne.
    #[error("Illegal character in string: {0:?}")]
    IllegalStringChar(char),
    /// `.` non suivi d’au moins un chiffre.
    #[error("Illegal character in number")]
    MalformedNumber,
    /// Fin d’entrée atteinte dans une chaîne.
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unknown token: {0}")]
    UnknownChar(char),
    /// `!` seul ; seul `!=` existe.
    #[error("Expected !=, got: {0:?}")]
    IncompleteNotEq(char),
}

/* ───────────────────────── Parsing ───────────────────────── */

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (line {line})")]
pub struct ParseError {
    pub line: u32,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Expected {expected}, got {found}")]
    Expected { expected: TokenKind, found: TokenKind },
    #[error("Expected comparison operator at: {0}")]
    MissingComparator(String),
    #[error("Referencing variable before assignment: {0}")]
    UndeclaredVariable(String),
    #[error("Label already exists: {0}")]
    DuplicateLabel(String),
    #[error("Attempting to GOTO to undeclared label: {0}")]
    UndeclaredLabel(String),
    #[error("Invalid statement at {text:?} ({kind})")]
    InvalidStatement { text: String, kind: TokenKind },
    #[error("Unexpected token at {text:?} ({kind})")]
    UnexpectedPrimary { text: String, kind: TokenKind },
}

/* ───────────────────────── Compilation ───────────────────────── */

/// Erreur d’une session de compilation (lexer **ou** parser).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("Lexing error. {0}")]
    Lex(#[from] LexError),
    #[error("Parsing error. {0}")]
    Parse(#[from] ParseError),
}

impl CompileError {
    pub const fn line(&self) -> u32 {
        match self {
            Self::Lex(e) => e.line,
            Self::Parse(e) => e.line,
        }
    }
}

pub type Result<T, E = CompileError> = core::result::Result<T, E>;
