use crate::config;

/// Tone of a syllable as written with a trailing digit in numbered pinyin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    First,
    Second,
    Third,
    Fourth,
    Neutral,
}

const MARKED_TONES: [Tone; 4] = [Tone::First, Tone::Second, Tone::Third, Tone::Fourth];

impl Tone {
    /// '1' to '4' are the marked tones, both '5' and '0' are used for the neutral tone
    pub const fn from_digit(digit: char) -> Option<Self> {
        Some(match digit {
            '1' => Self::First,
            '2' => Self::Second,
            '3' => Self::Third,
            '4' => Self::Fourth,
            '0' | '5' => Self::Neutral,
            _ => {
                return None;
            }
        })
    }

    /// Column in [`TONE_MARKS`], `None` for the neutral tone which has no mark
    pub const fn mark_index(self) -> Option<usize> {
        match self {
            Self::First => Some(0),
            Self::Second => Some(1),
            Self::Third => Some(2),
            Self::Fourth => Some(3),
            Self::Neutral => None,
        }
    }

    pub const fn digit(self) -> char {
        match self {
            Self::First => '1',
            Self::Second => '2',
            Self::Third => '3',
            Self::Fourth => '4',
            Self::Neutral => '5',
        }
    }
}

/// Marked variants of every vowel for tones 1 to 4. `v` is written for `ü` and uses its row.
pub const TONE_MARKS: [(char, [char; 4]); 6] = [
    ('a', ['ā', 'á', 'ǎ', 'à']),
    ('e', ['ē', 'é', 'ě', 'è']),
    ('i', ['ī', 'í', 'ǐ', 'ì']),
    ('o', ['ō', 'ó', 'ǒ', 'ò']),
    ('u', ['ū', 'ú', 'ǔ', 'ù']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
];

/// Vowels that take the mark whenever they occur, tried in this order.
/// Letters in the same group are checked jointly.
pub const MARK_PRIORITY: [&[char]; 4] = [&['ü', 'v'], &['a'], &['e'], &['o']];

pub fn tone_mark_char(vowel: char, tone: Tone) -> Option<char> {
    let tone_idx = tone.mark_index()?;
    let vowel = if vowel == 'v' { 'ü' } else { vowel };
    TONE_MARKS
        .iter()
        .find(|(base, _)| *base == vowel)
        .map(|(_, marks)| marks[tone_idx])
}

/// Base vowel and tone of a marked vowel, e.g. 'ǎ' -> ('a', Third)
fn unmark_char(ch: char) -> Option<(char, Tone)> {
    TONE_MARKS.iter().find_map(|(base, marks)| {
        marks
            .iter()
            .position(|m| *m == ch)
            .map(|tone_idx| (*base, MARKED_TONES[tone_idx]))
    })
}

/// Byte index and char of the vowel which receives the tone mark in a lowercase syllable
fn vowel_to_mark(pinyin: &str) -> Option<(usize, char)> {
    for vowels in MARK_PRIORITY {
        if let Some(found) = pinyin.char_indices().find(|(_, c)| vowels.contains(c)) {
            return Some(found);
        }
    }
    // "iu" is marked on the u, "ui" on the i
    let last = pinyin.chars().rev().find(|c| matches!(c, 'i' | 'u'))?;
    pinyin.find(last).map(|idx| (idx, last))
}

/// Convert one syllable in numbered pinyin to pinyin with tone marks, e.g. "hao3" -> "hǎo".
///
/// The result is always lowercase. Input without a trailing digit is returned as is,
/// digits other than 1 to 4 are dropped without adding a mark, as is the digit of a
/// syllable without any vowel.
pub fn pinyin_syllable_mark_from_num(pinyin_num: &str) -> String {
    let mut chars = pinyin_num.chars();
    let Some(last) = chars.next_back() else {
        return String::new();
    };
    if !last.is_ascii_digit() {
        return pinyin_num.to_lowercase();
    }
    let pinyin = chars.as_str().to_lowercase();
    let Some(tone) = Tone::from_digit(last) else {
        return pinyin;
    };

    let Some((idx, vowel)) = vowel_to_mark(&pinyin) else {
        return pinyin;
    };
    let Some(marked) = tone_mark_char(vowel, tone) else {
        return pinyin;
    };
    let mut pinyin_mark = String::with_capacity(pinyin.len() + marked.len_utf8());
    pinyin_mark.push_str(&pinyin[..idx]);
    pinyin_mark.push(marked);
    pinyin_mark.push_str(&pinyin[idx + vowel.len_utf8()..]);
    pinyin_mark
}

/// Convert a word in numbered pinyin to tone marks, e.g. "ni3hao3" -> "nǐhǎo".
/// Syllables after the first one which start with a, e or o are separated by an apostrophe.
pub fn pinyin_mark_from_num(pinyin_num: &str) -> String {
    let split_pattern = |c: char| ('0'..='5').contains(&c);
    let mut pinyin_mark = String::with_capacity(pinyin_num.len() + 4);
    for (i, syllable) in pinyin_num.split_inclusive(split_pattern).enumerate() {
        if i > 0 && syllable.to_lowercase().starts_with(config::APOSTROPHE_VOWELS) {
            pinyin_mark.push(config::APOSTROPHE);
        }
        pinyin_mark.push_str(&pinyin_syllable_mark_from_num(syllable));
    }
    pinyin_mark
}

/// Convert one syllable with a tone mark back to numbered pinyin, e.g. "hǎo" -> "hao3".
///
/// A syllable without any mark gets the neutral tone digit 5. Input that already ends
/// with a digit is only lowercased.
pub fn pinyin_syllable_num_from_mark(pinyin_mark: &str) -> String {
    let pinyin = pinyin_mark.to_lowercase();
    match pinyin.chars().next_back() {
        None => return pinyin,
        Some(c) if c.is_ascii_digit() => return pinyin,
        Some(_) => {}
    }
    let marked = pinyin
        .char_indices()
        .find_map(|(idx, c)| unmark_char(c).map(|(base, tone)| (idx, c, base, tone)));
    let Some((idx, ch, base, tone)) = marked else {
        let mut pinyin_num = pinyin;
        pinyin_num.push(Tone::Neutral.digit());
        return pinyin_num;
    };
    let mut pinyin_num = String::with_capacity(pinyin.len() + 1);
    pinyin_num.push_str(&pinyin[..idx]);
    pinyin_num.push(base);
    pinyin_num.push_str(&pinyin[idx + ch.len_utf8()..]);
    pinyin_num.push(tone.digit());
    pinyin_num
}

/// True for a syllable with tone 1 to 4 which has no vowel that could carry the mark, e.g. "m2"
pub fn is_missing_tone_mark(pinyin_num: &str) -> bool {
    let mut chars = pinyin_num.chars();
    let marked_tone = chars
        .next_back()
        .and_then(Tone::from_digit)
        .and_then(Tone::mark_index)
        .is_some();
    marked_tone && vowel_to_mark(&chars.as_str().to_lowercase()).is_none()
}
