//! Транслитерация кириллицы (русский и узбекский алфавиты) в латиницу.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Таблица соответствия строчных кириллических букв латинице
const CYRILLIC_TO_LATIN: &[(char, &str)] = &[
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ё', "yo"),
    ('ж', "j"),
    ('з', "z"),
    ('и', "i"),
    ('й', "y"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "h"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "sch"),
    ('ъ', ""),
    ('ы', "y"),
    ('ь', ""),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
    // узбекские буквы
    ('ў', "o'"),
    ('қ', "q"),
    ('ғ', "g'"),
    ('ҳ', "h"),
];

static TABLE: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| CYRILLIC_TO_LATIN.iter().copied().collect());

/// Транслитерирует строку посимвольно.
///
/// Заглавная буква даёт расширение с заглавной первой буквой (`Ш` → `Sh`).
/// Символы вне таблицы (латиница, цифры, пунктуация) возвращаются без изменений.
pub fn transliterate(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for ch in text.chars() {
        let lower = lowercase_char(ch);
        match TABLE.get(&lower) {
            Some(latin) if lower != ch => {
                let mut chars = latin.chars();
                if let Some(first) = chars.next() {
                    result.extend(first.to_uppercase());
                    result.extend(chars);
                }
            }
            Some(latin) => result.push_str(latin),
            None => result.push(ch),
        }
    }

    result
}

/// Строчная форма символа, если она однозначна
fn lowercase_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(c), None) => c,
        _ => ch,
    }
}
