//! Tests bout-en-bout du binaire `teeny` (process réel, répertoire temporaire).

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn teeny(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_teeny"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("lancement du binaire teeny")
}

const PROGRAM: &str = "LET a = 3 + 4\nPRINT a\n";

const EXPECTED: &str = "#include <stdio.h>\n\
int main(void){\n\
float a;\n\
a = 3 + 4;\n\
printf(\"%.2f\\n\", (float)(a));\n\
return 0;\n\
}\n";

#[test]
fn writes_out_c_and_reports_status() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prog.teeny"), PROGRAM).unwrap();

    let out = teeny(dir.path(), &["prog.teeny"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(dir.path().join("out.c")).unwrap(), EXPECTED);

    let status = String::from_utf8_lossy(&out.stderr);
    assert!(status.contains("Teeny-to-C compiler"));
    assert!(status.contains("Compiling completed: out.c"));
}

#[test]
fn stdout_mode() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prog.teeny"), PROGRAM).unwrap();

    let out = teeny(dir.path(), &["prog.teeny", "--stdout", "-q"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), EXPECTED);
    assert!(out.stderr.is_empty());
    assert!(!dir.path().join("out.c").exists());
}

#[test]
fn config_file_and_output_override() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prog.teeny"), PROGRAM).unwrap();
    fs::write(dir.path().join("teeny.toml"), "output = \"from_config.c\"\nquiet = true\n").unwrap();

    let out = teeny(dir.path(), &["prog.teeny", "--config", "teeny.toml"]);
    assert!(out.status.success());
    assert!(dir.path().join("from_config.c").exists());
    assert!(out.stderr.is_empty());

    let out = teeny(dir.path(), &["prog.teeny", "--config", "teeny.toml", "-o", "cli.c"]);
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(dir.path().join("cli.c")).unwrap(), EXPECTED);
}

#[test]
fn lex_error_exits_non_zero_without_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.teeny"), "LET a = 3.\n").unwrap();

    let out = teeny(dir.path(), &["bad.teeny"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Lexing error."));
    assert!(!dir.path().join("out.c").exists());
}

#[test]
fn parse_error_exits_non_zero_without_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.teeny"), "LABEL a\nLABEL a\n").unwrap();

    let out = teeny(dir.path(), &["bad.teeny"]);
    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("Parsing error."), "{err}");
    assert!(err.contains("Label already exists: a"), "{err}");
    assert!(!dir.path().join("out.c").exists());
}

#[test]
fn missing_argument_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = teeny(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!dir.path().join("out.c").exists());
}
