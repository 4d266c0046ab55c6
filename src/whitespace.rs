/// Tidy whitespace after comments have been removed.
///
/// - Strips trailing spaces and tabs from every line.
/// - Keeps at most one blank line between content lines.
/// - Trims the whole document and ends it with exactly one `\n`.
///
/// `\r\n` line endings come out as `\n`. An input with no content becomes a
/// single newline.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    let mut blank_run = 0usize;

    for line in text.lines() {
        let line = line.trim_end_matches([' ', '\t']);

        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }

        out.push_str(line);
        out.push('\n');
    }

    let mut result = out.trim().to_string();
    result.push('\n');
    result
}
