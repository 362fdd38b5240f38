//! Нормализация и нечёткий поиск по тексту

pub mod fuzzy;
pub mod transliteration;

pub use fuzzy::{fuzzy_match, fuzzy_match_with_transliteration, levenshtein, max_distance, Searchable};
pub use transliteration::transliterate;
