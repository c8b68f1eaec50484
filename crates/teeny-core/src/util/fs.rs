use std::fs;
use std::io;
use std::path::Path;

pub fn ensure_parent(p: &Path) -> io::Result<()> {
    if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn write_all(p: &Path, text: &str) -> io::Result<()> {
    ensure_parent(p)?;
    fs::write(p, text)
}
