//! Тексты сообщений бота.

use crate::shared::format::truncate_label;
use contracts::domain::a001_client::Client;

pub const WELCOME: &str = "Здравствуйте! Я помогу найти ресторан и посмотреть его рулоны.\n\
                           Нажмите кнопку ниже, чтобы начать поиск.";
pub const ENTRY_BUTTON: &str = "🔍 Найти ресторан";
pub const ASK_QUERY: &str = "Введите название ресторана:";
pub const CHOOSE_ONE: &str = "Найдено несколько вариантов. Выберите нужный:";
pub const CHOOSE_FROM_LIST: &str =
    "Выберите вариант из списка выше или отправьте /cancel, чтобы начать заново.";
pub const SESSION_EXPIRED: &str = "Сессия устарела. Начните поиск заново: /start";
pub const HELP: &str = "Отправьте /start, чтобы начать поиск ресторана.\n\
                        /search - сразу ввести название\n\
                        /cancel - отменить текущий поиск";
pub const GUIDANCE: &str =
    "Не удалось распознать сообщение. Отправьте название ресторана текстом или /start.";
pub const CANCELLED: &str = "Поиск отменён.";
pub const SERVICE_UNAVAILABLE: &str = "Сервис временно недоступен. Попробуйте позже.";

/// Заглушка для значений, которые не удалось получить
pub const NOT_SPECIFIED: &str = "не указано";

pub fn not_found(query: &str) -> String {
    format!(
        "Ресторан «{}» не найден. Попробуйте ввести название иначе.",
        query.trim()
    )
}

/// Пояснение к обрезанному списку вариантов
pub fn too_many_choices(shown: usize, total: usize) -> String {
    format!(
        "{}\nПоказаны первые {} из {}. Чтобы сузить поиск, отправьте /search и уточните название.",
        CHOOSE_ONE, shown, total
    )
}

/// Подпись кнопки выбора: название и уточнение (филиал или адрес)
pub fn choice_label(client: &Client, max_chars: usize) -> String {
    let title = client.title();
    let detail = client
        .branch_name
        .as_deref()
        .or(client.address.as_deref())
        .filter(|d| !d.trim().is_empty());

    let label = match detail {
        Some(detail) => format!("{} ({})", title, detail.trim()),
        None => title.to_string(),
    };
    truncate_label(&label, max_chars)
}
