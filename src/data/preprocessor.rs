// ============================================================
// Layer 4 — Line Preprocessor
// ============================================================
// Cleans one corpus line before it is checked for blankness
// and paired with its counterpart.
//
// Corpus files exported from spreadsheets or web crawls carry:
//   - Non-breaking spaces (U+00A0)
//   - Zero-width spaces (U+200B)
//   - A byte order mark (U+FEFF) on the first line
//   - Tab characters and stray control characters
//
// Cleaning steps (applied in order):
//   1. Replace those characters with a plain space
//   2. Collapse runs of spaces into one
//   3. Trim both ends
//
// A line that is empty after cleaning counts as blank.
//
// Reference: Rust Book §8 (Strings in Rust)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a single line of corpus text.
    pub fn clean_line(&self, line: &str) -> String {
        let mut out        = String::with_capacity(line.len());
        let mut last_space = true;

        for c in line.chars() {
            let c = match c {
                '\t' | '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_control() => ' ',
                c => c,
            };

            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        // At most one trailing space can remain
        if out.ends_with(' ') {
            out.pop();
        }
        out
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
