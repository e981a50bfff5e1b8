//! Console reporter printing the classic green/red bootstrap messages.

use std::io::Write;
use std::path::Path;

use crossterm::style::Stylize;

use cefup_core::Reporter;

/// Prints `[INFO]` lines in green and `[FATAL]` lines in red, plus a
/// carriage-return percent line while downloading.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Console {
    /// Create a console reporter.
    pub fn new() -> Self {
        Self
    }

    /// Print a fatal diagnostic. The caller decides the exit code.
    pub fn fatal(&self, msg: &str) {
        eprintln!("{}", format!("[FATAL] {msg}").red());
    }
}

impl Reporter for Console {
    fn info(&self, msg: &str) {
        println!("{}", format!("[INFO] {msg}").green());
    }

    fn success(&self, msg: &str) {
        println!("{}", format!("[INFO] {msg}").green());
    }

    fn downloading(&self, file: &str, current: u64, total: Option<u64>) {
        let Some(total) = total.filter(|t| *t > 0) else {
            return;
        };
        let percent = current.saturating_mul(100) / total;
        print!("\r  {file}: {percent}%");
        if current >= total {
            println!();
        }
        let _ = std::io::stdout().flush();
    }

    fn copied(&self, src: &Path, dest: &Path) {
        println!("Copy {} => {}", src.display(), dest.display());
    }
}
