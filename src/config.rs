/// A single syllable in numbered pinyin enclosed in square brackets, e.g. `[ma3]`.
/// Exactly one digit is allowed, directly followed by the closing bracket.
pub const ANNOTATION_PATTERN: &str = r"\[([a-zA-ZüÜ]+[0-9])\]";

/// Syllables starting with one of these are separated from the previous syllable of a word
pub const APOSTROPHE_VOWELS: &[char] = &['a', 'e', 'o'];
pub const APOSTROPHE: char = '\'';

pub const APPROX_LINE_LEN: usize = 256;
