//! Comment removal for HTML documents.
//!
//! This is text substitution, not an HTML parser. Regions that must survive
//! the blanket `<!-- -->` removal are swapped out for placeholder tokens,
//! the remaining comments are dropped, and the regions are swapped back in.
//! Nested or malformed comments, and comments that straddle a protected
//! element boundary, are not handled specially.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::debug;

use crate::comments::strip_c_comments;

/// Elements whose bodies are never treated as HTML comment context.
const PROTECTED_TAGS: &[&str] = &["pre", "textarea", "code", "script", "style", "noscript"];

/// Elements whose bodies are cleaned with the C-family comment scanner.
const SCANNED_TAGS: &[&str] = &["script", "style"];

/// Compiled patterns for the HTML pipeline. Build once, reuse per file.
#[derive(Debug)]
pub struct HtmlCleaner {
    conditional: Regex,
    protected: Regex,
    comment: Regex,
    scanned: Vec<Regex>,
}

impl HtmlCleaner {
    pub fn new() -> Result<Self> {
        let conditional = Regex::new(r"(?i)<!--\[if[^>]*>[\s\S]*?<!\[endif\]-->")
            .context("Failed to build conditional comment pattern")?;

        let alternatives: Vec<String> = PROTECTED_TAGS.iter().copied().map(element).collect();
        let protected = Regex::new(&format!("(?i){}", alternatives.join("|")))
            .context("Failed to build protected element pattern")?;

        let comment = Regex::new(r"(?s)<!--.*?-->").context("Failed to build comment pattern")?;

        let scanned = SCANNED_TAGS
            .iter()
            .map(|tag| {
                Regex::new(&format!(r"(?i)(<{tag}\b[^>]*>)([\s\S]*?)(</{tag}>)"))
                    .with_context(|| format!("Failed to build <{tag}> body pattern"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            conditional,
            protected,
            comment,
            scanned,
        })
    }

    /// Remove HTML comments, keeping IE conditional comments and anything
    /// inside protected elements, then strip JS/CSS comments from
    /// `<script>` and `<style>` bodies.
    ///
    /// Whitespace is left as is; callers normalize afterwards.
    pub fn clean(&self, src: &str) -> String {
        let mut placeholders = Placeholders::for_source(src);

        // Conditional comments first: they contain `-->` and may sit inside
        // a protected element, which then captures the token as one unit.
        let text = placeholders.protect(&self.conditional, src);
        let text = placeholders.protect(&self.protected, &text);
        debug!(blocks = placeholders.len(), "protected html regions");

        let text = self.comment.replace_all(&text, "");
        let mut text = placeholders.restore(&text);

        for re in &self.scanned {
            text = re
                .replace_all(&text, |caps: &Captures| {
                    format!("{}{}{}", &caps[1], strip_c_comments(&caps[2]), &caps[3])
                })
                .into_owned();
        }

        text
    }
}

/// `<tag ...>body</tag>`, non-greedy, ending at the nearest close of the same tag.
fn element(tag: &str) -> String {
    format!(r"<{tag}\b[^>]*>[\s\S]*?</{tag}>")
}

/// Captured regions for one pipeline run, indexed by token id.
#[derive(Debug)]
struct Placeholders {
    /// Token prefix that does not occur anywhere in the source document.
    prefix: String,
    blocks: Vec<String>,
}

impl Placeholders {
    fn for_source(src: &str) -> Self {
        let mut prefix = String::from("___PROTECTED_");
        let mut salt = 0usize;
        while src.contains(&prefix) {
            salt += 1;
            prefix = format!("___PROTECTED{salt}_");
        }

        Self {
            prefix,
            blocks: Vec::new(),
        }
    }

    fn token(&self, id: usize) -> String {
        format!("{}{id}___", self.prefix)
    }

    fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Replace every match of `re` with a fresh token, remembering the text.
    fn protect(&mut self, re: &Regex, text: &str) -> String {
        re.replace_all(text, |caps: &Captures| {
            let id = self.blocks.len();
            self.blocks.push(caps[0].to_string());
            self.token(id)
        })
        .into_owned()
    }

    /// Put every captured region back.
    ///
    /// Later blocks may contain tokens of earlier ones, so they are restored
    /// newest first.
    fn restore(self, text: &str) -> String {
        let mut out = text.to_string();
        for (id, block) in self.blocks.iter().enumerate().rev() {
            out = out.replace(&self.token(id), block);
        }
        out
    }
}
