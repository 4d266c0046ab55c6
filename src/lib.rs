use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, trace};

pub mod comments;
pub mod error;
pub mod html;
pub mod kind;
pub mod logging;
pub mod whitespace;

use crate::comments::strip_c_comments;
use crate::error::CleanError;
use crate::html::HtmlCleaner;
use crate::kind::{Classifier, FileKind};
use crate::whitespace::normalize_whitespace;

/// Configuration passed from the CLI layer (main.rs) into the core logic.
#[derive(Debug)]
pub struct Config {
    pub root: PathBuf,
}

/// Per-run counters, printed as the final line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub cleaned: usize,
    pub failed: usize,
    /// Files with an extension we do not handle. Never opened.
    pub skipped: usize,
}

/// Everything needed to clean one file, built once per run.
#[derive(Debug)]
pub struct Cleaner {
    classifier: Classifier,
    html: HtmlCleaner,
}

impl Cleaner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            classifier: Classifier::new()?,
            html: HtmlCleaner::new()?,
        })
    }

    pub fn classify(&self, path: &Path) -> Option<FileKind> {
        self.classifier.classify(path)
    }

    /// Strip comments the way `kind` calls for, then normalize whitespace.
    pub fn clean_text(&self, kind: FileKind, src: &str) -> String {
        let stripped = match kind {
            FileKind::Html => self.html.clean(src),
            FileKind::Cpp | FileKind::Js | FileKind::Css => strip_c_comments(src),
        };
        normalize_whitespace(&stripped)
    }

    /// Read `path`, clean it and overwrite it in place.
    pub fn clean_file(&self, path: &Path, kind: FileKind) -> Result<(), CleanError> {
        let src = fs::read_to_string(path).map_err(|source| CleanError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let cleaned = self.clean_text(kind, &src);
        trace!(before = src.len(), after = cleaned.len(), "cleaned");

        fs::write(path, cleaned).map_err(|source| CleanError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn run_with_config(cfg: Config) -> Result<Summary> {
    let cleaner = Cleaner::new()?;

    // Canonicalise the root so display paths are stable.
    let canon_root = cfg
        .root
        .canonicalize()
        .with_context(|| format!("Root directory not found: {}", cfg.root.display()))?;
    debug!(root = %canon_root.display(), "walking");

    // No filtering: hidden files, ignored paths and vendored trees are all cleaned.
    let walker = WalkBuilder::new(&canon_root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut summary = Summary::default();

    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                eprintln!("Walk error: {err}");
                continue;
            }
        };

        let path = entry.path();
        if !is_file_entry(&entry) {
            continue;
        }

        let display_path = make_display_path(&canon_root, path);

        let Some(kind) = cleaner.classify(path) else {
            trace!(path = %display_path, "unhandled extension");
            summary.skipped += 1;
            continue;
        };
        debug!(path = %display_path, kind = kind.label(), "cleaning");

        match cleaner.clean_file(path, kind) {
            Ok(()) => {
                println!("Cleaned {}: {}", kind.label(), display_path);
                summary.cleaned += 1;
            }
            Err(err) => {
                eprintln!("Skipping {}: {}", display_path, err);
                summary.failed += 1;
            }
        }
    }

    println!(
        "Done: {} cleaned, {} failed, {} skipped.",
        summary.cleaned, summary.failed, summary.skipped
    );

    Ok(summary)
}

/// Regular files, plus symlinks that resolve to one. Directory links are not
/// descended; a dangling link counts as a file so its read failure is reported.
fn is_file_entry(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_symlink() => fs::metadata(entry.path())
            .map(|meta| meta.is_file())
            .unwrap_or(true),
        Some(ft) => ft.is_file(),
        None => false,
    }
}

/// Produce a display path relative to `root` (stable regardless of current working directory).
pub fn make_display_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);

    // If root is a file and path == root, rel is empty.
    if rel.as_os_str().is_empty() {
        return path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
    }

    rel.to_string_lossy().replace('\\', "/")
}
