//! File and stream helpers shared by the commands.
//!
//! Simulation logs may be plain `.jsonl` or zstd-compressed `.jsonl.zst`;
//! [`read_text_auto`] picks the decoder from the file name.

use std::io::BufRead;
use std::path::Path;

/// Next input line with surrounding whitespace removed; `None` at end of input.
pub fn read_stdin_line(input: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// True for file names `stats` aggregates: `*.jsonl` and `*.jsonl.zst`.
pub fn is_log_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|f| f.to_str())
        .is_some_and(|f| f.ends_with(".jsonl") || f.ends_with(".jsonl.zst"))
}

/// Reads a whole text file, decompressing `.zst` files.
///
/// A leading UTF-8 byte order mark is dropped.
///
/// ```rust,no_run
/// # use line98_cli::io_utils::read_text_auto;
/// let plain = read_text_auto("runs/sim.jsonl".as_ref()).unwrap();
/// let packed = read_text_auto("runs/sim.jsonl.zst".as_ref()).unwrap();
/// assert_eq!(plain, packed);
/// ```
pub fn read_text_auto(path: &Path) -> std::io::Result<String> {
    let compressed = path.extension().is_some_and(|ext| ext == "zst");
    let bytes = if compressed {
        let file = std::fs::File::open(path)?;
        zstd::stream::decode_all(file)?
    } else {
        std::fs::read(path)?
    };
    let mut content = String::from_utf8(bytes).map_err(std::io::Error::other)?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Creates the parent directory of `path` when it is missing.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
