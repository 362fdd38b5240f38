//! Нечёткий поиск кандидатов по текстовым полям.
//!
//! Кандидат получает оценку 0, если запрос входит подстрокой в одно из полей,
//! иначе минимальное расстояние Левенштейна до полей. Чем меньше, тем лучше.

use super::transliteration::transliterate;
use contracts::domain::a001_client::{Client, ClientField};

/// Объект, по полям которого можно искать
pub trait Searchable {
    type Field: Copy;

    /// Текст поля; пустая строка, если поле не заполнено
    fn field_text(&self, field: Self::Field) -> &str;

    /// Ключ для устранения дублей; `None` - сравнение по значению
    fn dedup_key(&self) -> Option<&str> {
        None
    }
}

impl Searchable for Client {
    type Field = ClientField;

    fn field_text(&self, field: ClientField) -> &str {
        Client::field_text(self, field)
    }

    fn dedup_key(&self) -> Option<&str> {
        Some(self.id.value())
    }
}

/// Расстояние Левенштейна в символах (вставка, удаление, замена)
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Допустимое расстояние для запроса длиной `query_len` символов:
/// `max(3, floor(query_len * 0.4))`
pub fn max_distance(query_len: usize) -> usize {
    (query_len * 2 / 5).max(3)
}

/// Оценка кандидата для уже нормализованного (lowercase) запроса
fn score<T: Searchable>(candidate: &T, query: &str, fields: &[T::Field]) -> usize {
    let mut best: Option<usize> = None;

    for &field in fields {
        let text = candidate.field_text(field).to_lowercase();
        if !text.is_empty() && text.contains(query) {
            return 0;
        }
        let distance = levenshtein(query, &text);
        best = Some(best.map_or(distance, |b| b.min(distance)));
    }

    best.unwrap_or_else(|| query.chars().count())
}

/// Нечёткий поиск: кандидаты, прошедшие порог, отсортированные по оценке.
///
/// Пустой запрос возвращает коллекцию без изменений. При равной оценке
/// сохраняется исходный порядок.
pub fn fuzzy_match<T: Searchable + Clone>(
    candidates: &[T],
    query: &str,
    fields: &[T::Field],
) -> Vec<T> {
    let query = query.trim();
    if query.is_empty() {
        return candidates.to_vec();
    }

    let query = query.to_lowercase();
    let threshold = max_distance(query.chars().count());

    let mut scored: Vec<(usize, &T)> = candidates
        .iter()
        .map(|c| (score(c, &query, fields), c))
        .filter(|(s, _)| *s <= threshold)
        .collect();

    // sort_by_key стабильна
    scored.sort_by_key(|(s, _)| *s);

    scored.into_iter().map(|(_, c)| c.clone()).collect()
}

/// Поиск по исходному и транслитерированному запросу с объединением результатов.
///
/// Сначала идут результаты по исходному запросу, затем новые результаты
/// по транслитерации.
pub fn fuzzy_match_with_transliteration<T: Searchable + Clone + PartialEq>(
    candidates: &[T],
    query: &str,
    fields: &[T::Field],
) -> Vec<T> {
    if query.trim().is_empty() {
        return candidates.to_vec();
    }

    let mut result = fuzzy_match(candidates, query, fields);

    let transliterated = transliterate(query);
    if transliterated == query {
        return result;
    }

    for candidate in fuzzy_match(candidates, &transliterated, fields) {
        if !result.iter().any(|existing| same_candidate(existing, &candidate)) {
            result.push(candidate);
        }
    }

    result
}

fn same_candidate<T: Searchable + PartialEq>(a: &T, b: &T) -> bool {
    match (a.dedup_key(), b.dedup_key()) {
        (Some(ka), Some(kb)) => ka == kb,
        _ => a == b,
    }
}
