use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::Result;
use log::LevelFilter;
use teeny_core::{Compiler, CompilerConfig};

#[derive(Parser, Debug)]
#[command(name = "teeny", version, about = "Compilateur Teeny → C", long_about = None)]
pub struct Cli {
    /// Fichier source .teeny
    source: Utf8PathBuf,

    /// Fichier C produit (défaut: out.c, ou `output` du fichier de config)
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Écrire le C sur stdout au lieu d’un fichier
    #[arg(long)]
    stdout: bool,

    /// Fichier de configuration TOML
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Pas de lignes de statut
    #[arg(short, long)]
    quiet: bool,

    /// Verbosité (répéter pour plus de bruit)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Config fichier (ou défauts), puis overrides CLI.
    fn resolve_config(&self) -> Result<CompilerConfig> {
        let mut cfg = match &self.config {
            Some(path) => CompilerConfig::from_file(path)?,
            None => CompilerConfig::default(),
        };
        if let Some(out) = &self.output {
            cfg.output = out.clone();
        }
        cfg.quiet |= self.quiet;
        Ok(cfg)
    }
}

const fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // niveau fixé par -v uniquement (pas de RUST_LOG)
    env_logger::Builder::new().filter_level(level(cli.verbose)).init();

    let cfg = cli.resolve_config()?;
    let quiet = cfg.quiet;
    if !quiet {
        eprintln!("Teeny-to-C compiler");
    }

    let compiler = Compiler::new(cfg);
    let written = if cli.stdout {
        let product = compiler.compile_file(&cli.source)?;
        print!("{}", product.into_c_source());
        None
    } else {
        Some(compiler.emit(&cli.source)?)
    };

    if !quiet {
        match written {
            Some(path) => eprintln!("Compiling completed: {path}"),
            None => eprintln!("Compiling completed: <stdout>"),
        }
    }
    Ok(())
}
