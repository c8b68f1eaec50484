//! teeny-core — compilateur Teeny → C en une passe.
//! - `lexer`   : un token par appel, lookahead d’un caractère
//! - `parser`  : descente récursive, le C est émis pendant la reconnaissance (pas d’AST)
//! - `emitter` : deux tampons (header, body) concaténés une seule fois
//! - `pipeline`: lecture du fichier source, écriture du fichier C
//!
//! API stable orientée outil (CLI, tests) : `translate`, `Compiler`.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

pub mod config;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod token;
mod util;

pub use config::{CompilerConfig, ConfigError, DEFAULT_OUTPUT};
pub use emitter::Emitter;
pub use error::{CompileError, LexError, LexErrorKind, ParseError, ParseErrorKind};
pub use lexer::{tokenize, Lexer};
pub use parser::{translate, Parser};
pub use pipeline::{CompileProduct, Compiler, PipelineError};
pub use token::{Band, Token, TokenKind};
