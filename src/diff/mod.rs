//! Character-level visualization of a prompt optimization.
//!
//! Classifies every character of the **original** prompt as kept or changed
//! against the optimized counterpart, so the session view can render the
//! original text with the trimmed parts highlighted.

use colored::Colorize;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classification of a single original-prompt character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Survives into the optimized prompt.
    Kept,
    /// Removed or rewritten by the optimization.
    Changed,
}

/// One character of the original prompt with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffChar {
    pub ch: char,
    pub class: CharClass,
}

/// Classify every character of `original` against `optimized`.
///
/// Greedy single-pass forward matcher: a cursor walks the optimized text
/// once and advances only on an exact character match. The output covers
/// exactly the original text, in order — one entry per `char`.
///
/// This is deliberately not an edit-distance diff. Reordered text that
/// reappears later in the optimized prompt is reported as changed, because
/// the cursor never looks ahead or backtracks. The backend's own
/// visualization uses the same matcher, and the two must agree.
pub fn classify(original: &str, optimized: &str) -> Vec<DiffChar> {
    let optimized: Vec<char> = optimized.chars().collect();
    let mut cursor = 0;

    original
        .chars()
        .map(|ch| {
            let class = if cursor < optimized.len() && ch == optimized[cursor] {
                cursor += 1;
                CharClass::Kept
            } else {
                CharClass::Changed
            };
            DiffChar { ch, class }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the original prompt with changed characters on a red background.
///
/// Consecutive characters of the same class are grouped into a single
/// colored span so the output doesn't wrap every character in its own
/// escape sequence.
pub fn render_highlighted(original: &str, optimized: &str) -> String {
    let mut out = String::new();
    let mut run = String::new();
    let mut run_class = None;

    for diff_char in classify(original, optimized) {
        if run_class != Some(diff_char.class) {
            flush_run(&mut out, &run, run_class);
            run.clear();
            run_class = Some(diff_char.class);
        }
        run.push(diff_char.ch);
    }
    flush_run(&mut out, &run, run_class);

    out
}

fn flush_run(out: &mut String, run: &str, class: Option<CharClass>) {
    if run.is_empty() {
        return;
    }
    match class {
        Some(CharClass::Changed) => out.push_str(&run.on_red().to_string()),
        _ => out.push_str(run),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
