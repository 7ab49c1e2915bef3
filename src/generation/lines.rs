/*!
 * Splitting generator output into dialogue and translation lines.
 *
 * The generator is asked for exactly eight lines: four dialogue lines in
 * speaker order, then their four translations in the same order. Pairing is
 * purely positional: line `i` goes with line `i + 4`.
 */

use log::warn;

use crate::errors::GenerationError;

/// Number of dialogue lines in one cycle
pub const DIALOGUE_LINES: usize = 4;

/// Number of non-blank lines the generator must return
pub const EXPECTED_LINES: usize = DIALOGUE_LINES * 2;

/// One dialogue line with its translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialoguePair<'a> {
    /// Position of the line in the dialogue (0-based)
    pub index: usize,
    /// Ruby-annotated Japanese line
    pub annotated: &'a str,
    /// Translation of the line
    pub translation: &'a str,
}

/// Split fully buffered output into its non-blank lines
pub fn non_blank_lines(output: &str) -> Vec<&str> {
    output
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Pair dialogue lines 0-3 with translation lines 4-7.
///
/// Fewer than eight lines is an error; extra lines are ignored.
pub fn pair_dialogue<'a>(lines: &[&'a str]) -> Result<Vec<DialoguePair<'a>>, GenerationError> {
    if lines.len() < EXPECTED_LINES {
        return Err(GenerationError::MissingLines {
            expected: EXPECTED_LINES,
            found: lines.len(),
        });
    }
    if lines.len() > EXPECTED_LINES {
        warn!(
            "Generator returned {} non-blank lines, ignoring the last {}",
            lines.len(),
            lines.len() - EXPECTED_LINES
        );
    }

    Ok((0..DIALOGUE_LINES)
        .map(|index| DialoguePair {
            index,
            annotated: lines[index],
            translation: lines[index + DIALOGUE_LINES],
        })
        .collect())
}
