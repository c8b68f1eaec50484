//! token.rs — Modèle de tokens Teeny
//!
//! Un `Token` associe le texte brut (lexème) à son `TokenKind`. Les kinds sont
//! répartis en bandes (`Band`) : sentinelle, structure, littéraux, mots-clés,
//! opérateurs. Les mots-clés sont résolus par une table explicite
//! orthographe → kind (sensible à la casse).

use std::fmt;

/* ───────────────────────── Bandes ───────────────────────── */

/// Famille d’un `TokenKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Fin d’entrée.
    Sentinel,
    /// Séparateur d’instructions (`\n`).
    Structural,
    /// Nombre, chaîne, identifiant.
    Literal,
    /// Mot réservé.
    Keyword,
    /// Affectation, arithmétique, comparaison.
    Operator,
}

/* ───────────────────────── Kinds ───────────────────────── */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Sentinelle
    Eof,
    // Structure
    Newline,
    // Littéraux
    Number,
    Ident,
    String,
    // Mots-clés
    Label,
    Goto,
    Print,
    Input,
    Let,
    If,
    Then,
    EndIf,
    While,
    Repeat,
    EndWhile,
    // Opérateurs
    Eq,
    Plus,
    Minus,
    Asterisk,
    Slash,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl TokenKind {
    /// Résout un mot-clé par son orthographe exacte (`PRINT`, `ENDIF`…).
    ///
    /// Renvoie `None` pour tout autre texte : c’est alors un identifiant.
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "LABEL" => Self::Label,
            "GOTO" => Self::Goto,
            "PRINT" => Self::Print,
            "INPUT" => Self::Input,
            "LET" => Self::Let,
            "IF" => Self::If,
            "THEN" => Self::Then,
            "ENDIF" => Self::EndIf,
            "WHILE" => Self::While,
            "REPEAT" => Self::Repeat,
            "ENDWHILE" => Self::EndWhile,
            _ => return None,
        };
        Some(kind)
    }

    pub const fn band(self) -> Band {
        match self {
            Self::Eof => Band::Sentinel,
            Self::Newline => Band::Structural,
            Self::Number | Self::Ident | Self::String => Band::Literal,
            Self::Label
            | Self::Goto
            | Self::Print
            | Self::Input
            | Self::Let
            | Self::If
            | Self::Then
            | Self::EndIf
            | Self::While
            | Self::Repeat
            | Self::EndWhile => Band::Keyword,
            Self::Eq
            | Self::Plus
            | Self::Minus
            | Self::Asterisk
            | Self::Slash
            | Self::EqEq
            | Self::NotEq
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq => Band::Operator,
        }
    }

    pub const fn is_keyword(self) -> bool {
        matches!(self.band(), Band::Keyword)
    }

    /// Opérateurs admis entre deux expressions d’une condition.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::EqEq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }

    /// Nom affiché dans les diagnostics (`ENDIF`, `NEWLINE`, `EQEQ`…).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Newline => "NEWLINE",
            Self::Number => "NUMBER",
            Self::Ident => "IDENT",
            Self::String => "STRING",
            Self::Label => "LABEL",
            Self::Goto => "GOTO",
            Self::Print => "PRINT",
            Self::Input => "INPUT",
            Self::Let => "LET",
            Self::If => "IF",
            Self::Then => "THEN",
            Self::EndIf => "ENDIF",
            Self::While => "WHILE",
            Self::Repeat => "REPEAT",
            Self::EndWhile => "ENDWHILE",
            Self::Eq => "EQ",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Asterisk => "ASTERISK",
            Self::Slash => "SLASH",
            Self::EqEq => "EQEQ",
            Self::NotEq => "NOTEQ",
            Self::Lt => "LT",
            Self::LtEq => "LTEQ",
            Self::Gt => "GT",
            Self::GtEq => "GTEQ",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/* ───────────────────────── Token ───────────────────────── */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexème brut (sans les guillemets pour une chaîne).
    pub text: String,
    pub kind: TokenKind,
    /// Ligne de début, 1-based.
    pub line: u32,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind, line: u32) -> Self {
        Self { text: text.into(), kind, line }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/* ───────────────────────── Tests ───────────────────────── */
