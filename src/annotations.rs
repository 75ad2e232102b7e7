//! Pinyin annotations embedded in free text, e.g. the `[ma3]` in "horse [ma3]"

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config;
use crate::pinyin::{is_missing_tone_mark, pinyin_syllable_mark_from_num};

static ANNOTATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(config::ANNOTATION_PATTERN).expect("annotation pattern is a valid regex")
});

/// One bracketed syllable found in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation<'t> {
    /// Byte range of the whole annotation, including the brackets
    pub range: Range<usize>,
    /// Syllable with its tone digit, without the brackets
    pub syllable: &'t str,
}

impl Annotation<'_> {
    pub fn marked(&self) -> String {
        pinyin_syllable_mark_from_num(self.syllable)
    }

    pub fn is_missing_tone_mark(&self) -> bool {
        is_missing_tone_mark(self.syllable)
    }
}

/// All annotations of `text` from left to right, matches never overlap
pub fn annotations(text: &str) -> impl Iterator<Item = Annotation<'_>> {
    ANNOTATION_REGEX.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let syllable = caps.get(1)?;
        Some(Annotation {
            range: whole.range(),
            syllable: syllable.as_str(),
        })
    })
}

/// Replace every annotation in `text` by its tone mark form, "horse [ma3]" -> "horse [mǎ]".
/// Text without annotations is returned borrowed and unchanged.
pub fn rewrite_annotations(text: &str) -> Cow<'_, str> {
    ANNOTATION_REGEX.replace_all(text, |caps: &Captures| {
        let marked = pinyin_syllable_mark_from_num(&caps[1]);
        tracing::trace!(annotation = &caps[0], %marked, "rewriting annotation");
        format!("[{marked}]")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_single() {
        assert_eq!(rewrite_annotations("horse [ma3]"), "horse [mǎ]");
        assert_eq!(rewrite_annotations("[lv4]"), "[lǜ]");
        assert_eq!(rewrite_annotations("[LÜ4]"), "[lǜ]");
        assert_eq!(rewrite_annotations("particle [ma5]"), "particle [ma]");
    }

    #[test]
    fn test_rewrite_multiple() {
        assert_eq!(rewrite_annotations("[ba1] and [ma3]"), "[bā] and [mǎ]");
        assert_eq!(
            rewrite_annotations("variant of 好[hao3], see 好[hao4]"),
            "variant of 好[hǎo], see 好[hào]"
        );
        assert_eq!(rewrite_annotations("[ma3][ma3]"), "[mǎ][mǎ]");
        assert_eq!(rewrite_annotations("[[ma3]]"), "[[mǎ]]");
    }

    #[test]
    fn test_unchanged() {
        assert!(matches!(
            rewrite_annotations("no brackets here"),
            Cow::Borrowed("no brackets here")
        ));
        assert_eq!(rewrite_annotations("[ba12]"), "[ba12]");
        assert_eq!(rewrite_annotations("[ma3 ]"), "[ma3 ]");
        assert_eq!(rewrite_annotations("[ma]"), "[ma]");
        assert_eq!(rewrite_annotations("[3]"), "[3]");
        assert_eq!(rewrite_annotations("[ni3hao3]"), "[ni3hao3]");
        assert_eq!(rewrite_annotations("ma3"), "ma3");
        assert_eq!(rewrite_annotations(""), "");
    }

    #[test]
    fn test_deterministic() {
        let text = "to ride [qi2] a horse [ma3]";
        let first = rewrite_annotations(text).into_owned();
        for _ in 0..3 {
            assert_eq!(rewrite_annotations(text), first);
        }
    }

    #[test]
    fn test_find_annotations() {
        let text = "abc [m2] def [hao3] [ba12]";
        let found: Vec<Annotation> = annotations(text).collect();
        assert_eq!(
            found,
            vec![
                Annotation {
                    range: 4..8,
                    syllable: "m2",
                },
                Annotation {
                    range: 13..19,
                    syllable: "hao3",
                },
            ]
        );
        assert!(found[0].is_missing_tone_mark());
        assert!(!found[1].is_missing_tone_mark());
        assert_eq!(found[1].marked(), "hǎo");
        assert_eq!(&text[found[1].range.clone()], "[hao3]");
    }
}
