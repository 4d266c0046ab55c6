use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use scour::logging::init_tracing;
use scour::{Config, run_with_config};

/// scour - strip comments in place.
///
/// Walks a directory tree and removes comments from HTML, C/C++, JavaScript
/// and CSS files, rewriting each file in place with tidied whitespace.
#[derive(Parser, Debug)]
#[command(
    name = "scour",
    author,
    version,
    about = "Strip comments from HTML, C/C++, JS and CSS files in place",
    long_about = r#"Recursively strip comments from source files, rewriting them in place.

Handled extensions (case-insensitive):
  • .html                   HTML comments, plus JS/CSS comments in <script>/<style>
  • .h .hpp .cpp .cc        // and /* */ comments
  • .js .css                // and /* */ comments

IE conditional comments and the bodies of <pre>, <textarea>, <code>,
<script>, <style> and <noscript> survive HTML comment removal.
Every other file is left untouched. There is no backup: commit first.

Typical usage:
  scour
  scour firmware/data
"#
)]
struct Args {
    /// Directory to clean. Defaults to the current directory.
    #[arg(value_name = "PATH", default_value = ".")]
    root: PathBuf,
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let cfg = Config { root: args.root };

    run_with_config(cfg)?;
    Ok(())
}
