use std::path::Path;

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// How a file gets cleaned, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Html,
    Cpp,
    Js,
    Css,
}

impl FileKind {
    /// Short name used in progress output.
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Html => "HTML",
            FileKind::Cpp => "C++",
            FileKind::Js => "JS",
            FileKind::Css => "CSS",
        }
    }
}

/// Fixed, case-insensitive mapping from file name patterns to [`FileKind`].
const PATTERNS: &[(&str, FileKind)] = &[
    ("*.html", FileKind::Html),
    ("*.{h,hpp,cpp,cc}", FileKind::Cpp),
    ("*.js", FileKind::Js),
    ("*.css", FileKind::Css),
];

#[derive(Debug)]
pub struct Classifier {
    set: GlobSet,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for (pat, _) in PATTERNS {
            let glob = GlobBuilder::new(pat)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Invalid file pattern: {pat}"))?;
            builder.add(glob);
        }

        let set = builder
            .build()
            .context("Failed to build file pattern set")?;

        Ok(Self { set })
    }

    /// Classify by file name. `None` means the file is left untouched.
    ///
    /// Names whose only dot is the leading one (`.html`, `.js`) have no
    /// extension and are not matched.
    pub fn classify(&self, path: &Path) -> Option<FileKind> {
        path.extension()?;
        let name = path.file_name()?;
        self.set
            .matches(name)
            .first()
            .map(|&idx| PATTERNS[idx].1)
    }
}
