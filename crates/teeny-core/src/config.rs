use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// Nom de sortie par défaut (un seul fichier C par compilation).
pub const DEFAULT_OUTPUT: &str = "out.c";

/// Configuration du compilateur.
///
/// Fichier TOML optionnel, tous les champs facultatifs :
/// ```toml
/// output = "build/prog.c"
/// quiet = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Fichier C produit
    pub output: Utf8PathBuf,
    /// Pas de lignes de statut sur stderr
    pub quiet: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self { output: Utf8PathBuf::from(DEFAULT_OUTPUT), quiet: false }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io { path: Utf8PathBuf, source: std::io::Error },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CompilerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
        Self::from_toml_str(&text)
    }
}
