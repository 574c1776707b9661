//! Unicode block tables used to decide how a run of text must be rendered.
//!
//! Scripts listed in [`SHAPED_UNIT_SCRIPTS`] form ligatures and conjuncts
//! through contextual shaping; rendering their characters one by one produces
//! wrong glyphs, so runs containing them are rendered as a single unit. The
//! check is a heuristic over code point blocks, not a script itemiser. Add a
//! block to the table to opt another script in.

use std::ops::RangeInclusive;

/// A named, inclusive range of code points
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptBlock {
    pub name: &'static str,
    pub range: RangeInclusive<char>,
}

impl ScriptBlock {
    pub const fn new(name: &'static str, range: RangeInclusive<char>) -> ScriptBlock {
        ScriptBlock { name, range }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.range.contains(&ch)
    }
}

/// Blocks whose text must be rendered as one shaped unit
pub const SHAPED_UNIT_SCRIPTS: &[ScriptBlock] = &[
    ScriptBlock::new("Devanagari", '\u{0900}'..='\u{097F}'),
    ScriptBlock::new("Arabic", '\u{0600}'..='\u{06FF}'),
];

/// Nonspacing combining marks that cannot start a run on their own
pub const COMBINING_MARKS: &[ScriptBlock] = &[
    ScriptBlock::new("Combining Diacritical Marks", '\u{0300}'..='\u{036F}'),
    ScriptBlock::new("Cyrillic combining", '\u{0483}'..='\u{0489}'),
    ScriptBlock::new("Hebrew points", '\u{0591}'..='\u{05BD}'),
    ScriptBlock::new("Arabic harakat", '\u{064B}'..='\u{065F}'),
    ScriptBlock::new("Arabic superscript alef", '\u{0670}'..='\u{0670}'),
    ScriptBlock::new("Devanagari signs", '\u{0900}'..='\u{0902}'),
    ScriptBlock::new("Devanagari nukta", '\u{093C}'..='\u{093C}'),
    ScriptBlock::new("Devanagari vowel signs", '\u{0941}'..='\u{0948}'),
    ScriptBlock::new("Devanagari virama", '\u{094D}'..='\u{094D}'),
    ScriptBlock::new("Devanagari stress signs", '\u{0951}'..='\u{0957}'),
    ScriptBlock::new("Combining Diacritical Marks Supplement", '\u{1DC0}'..='\u{1DFF}'),
    ScriptBlock::new("Combining Half Marks", '\u{FE20}'..='\u{FE2F}'),
];

/// The shaped-unit block `ch` falls in, if any
pub fn shaped_unit_script(ch: char) -> Option<&'static ScriptBlock> {
    SHAPED_UNIT_SCRIPTS.iter().find(|block| block.contains(ch))
}

/// Whether any character of `text` belongs to a script that must be rendered
/// as a single shaped unit
pub fn is_complex(text: &str) -> bool {
    text.chars().any(|ch| shaped_unit_script(ch).is_some())
}

pub fn is_combining_mark(ch: char) -> bool {
    COMBINING_MARKS.iter().any(|block| block.contains(ch))
}

/// Carriage returns and line feeds end a single-line run
pub fn is_line_break(ch: char) -> bool {
    ch == '\r' || ch == '\n'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devanagari_and_arabic_are_complex() {
        assert!(is_complex("क्ष"));
        assert!(is_complex("abc سلام"));
        assert!(!is_complex("Hello, world"));
        assert!(!is_complex(""));
    }

    #[test]
    fn block_edges_are_inclusive() {
        assert_eq!(shaped_unit_script('\u{0900}').map(|b| b.name), Some("Devanagari"));
        assert_eq!(shaped_unit_script('\u{097F}').map(|b| b.name), Some("Devanagari"));
        assert_eq!(shaped_unit_script('\u{06FF}').map(|b| b.name), Some("Arabic"));
        assert!(shaped_unit_script('\u{0980}').is_none());
        assert!(shaped_unit_script('\u{05FF}').is_none());
    }

    #[test]
    fn virama_is_a_combining_mark() {
        assert!(is_combining_mark('\u{094D}'));
        assert!(is_combining_mark('\u{0301}'));
        assert!(!is_combining_mark('क'));
        assert!(!is_combining_mark('a'));
    }

    #[test]
    fn only_cr_and_lf_break_lines() {
        assert!(is_line_break('\n'));
        assert!(is_line_break('\r'));
        assert!(!is_line_break('\t'));
        assert!(!is_line_break(' '));
    }
}
