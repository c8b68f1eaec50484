use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use thiserror::Error;

use crate::config::{CompilerConfig, ConfigError};
use crate::emitter::Emitter;
use crate::error::CompileError;
use crate::lexer::Lexer;
use crate::parser::Parser;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read {path}: {source}")]
    Read { path: Utf8PathBuf, source: std::io::Error },
    #[error("cannot write {path}: {source}")]
    Write { path: Utf8PathBuf, source: std::io::Error },
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Produit compilé : l’émetteur rempli, pas encore sérialisé.
#[derive(Debug, Clone)]
pub struct CompileProduct {
    emitter: Emitter,
}

impl CompileProduct {
    /// Texte C complet (header puis body).
    pub fn into_c_source(self) -> String {
        self.emitter.finalize()
    }

    /// Écrit l’unité de traduction, en une fois.
    pub fn write_to(self, path: &Utf8Path) -> Result<(), PipelineError> {
        self.emitter
            .write_file(path.as_std_path())
            .map_err(|source| PipelineError::Write { path: path.to_owned(), source })
    }
}

/// Orchestrateur principal : lecture, compilation, écriture.
pub struct Compiler {
    cfg: CompilerConfig,
}

impl Compiler {
    pub const fn new(cfg: CompilerConfig) -> Self {
        Self { cfg }
    }

    pub const fn config(&self) -> &CompilerConfig {
        &self.cfg
    }

    /// Compile une chaîne en mémoire.
    pub fn compile_str(&self, source: &str) -> Result<CompileProduct, PipelineError> {
        let parser = Parser::new(Lexer::new(source))?;
        let emitter = parser.parse_program()?;
        Ok(CompileProduct { emitter })
    }

    /// Compile un fichier source.
    pub fn compile_file(&self, input: &Utf8Path) -> Result<CompileProduct, PipelineError> {
        let source = fs::read_to_string(input)
            .map_err(|source| PipelineError::Read { path: input.to_owned(), source })?;
        debug!("{input}: {} octets lus", source.len());
        self.compile_str(&source)
    }

    /// Compile `input` et écrit le C vers la sortie configurée.
    ///
    /// Rien n’est écrit si la compilation échoue.
    pub fn emit(&self, input: &Utf8Path) -> Result<Utf8PathBuf, PipelineError> {
        let product = self.compile_file(input)?;
        product.write_to(&self.cfg.output)?;
        info!("{input} -> {}", self.cfg.output);
        Ok(self.cfg.output.clone())
    }
}
