//! emitter.rs — Accumulateur de texte C à deux tampons
//!
//! - `header` : `#include`, ouverture de `main`, déclarations de variables.
//! - `body`   : instructions générées au fil du parsing.
//!
//! Tampons en ajout seul ; `finalize` concatène header puis body, une seule
//! fois. Pas de réordonnancement, pas de dédoublonnage, pas de flush partiel.

use std::io;
use std::path::Path;

use log::debug;

use crate::util::fs::write_all;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Emitter {
    header: String,
    body: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /* ────── body ────── */

    pub fn emit(&mut self, code: &str) {
        self.body.push_str(code);
    }

    pub fn emit_line(&mut self, code: &str) {
        self.body.push_str(code);
        self.body.push('\n');
    }

    /* ────── header ────── */

    pub fn header(&mut self, code: &str) {
        self.header.push_str(code);
    }

    pub fn header_line(&mut self, code: &str) {
        self.header.push_str(code);
        self.header.push('\n');
    }

    /* ────── lecture / sortie ────── */

    pub fn header_text(&self) -> &str {
        &self.header
    }

    pub fn body_text(&self) -> &str {
        &self.body
    }

    /// Unité de traduction complète : header puis body.
    pub fn finalize(self) -> String {
        let mut out = self.header;
        out.push_str(&self.body);
        out
    }

    /// Écrit l’unité de traduction dans `path` (répertoires parents créés).
    pub fn write_file(self, path: &Path) -> io::Result<()> {
        let text = self.finalize();
        debug!("écriture de {} octets vers {}", text.len(), path.display());
        write_all(path, &text)
    }
}
