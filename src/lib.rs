//! Numbered pinyin ("ma3") to pinyin with tone marks ("mǎ"), for single syllables,
//! whole words and syllables annotated in brackets inside free text.

pub mod annotations;
pub mod config;
pub mod json;
pub mod pinyin;
