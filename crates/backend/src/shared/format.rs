/// Форматирует целое число с разделителями тысяч (пробелами)
///
/// # Примеры
/// ```ignore
/// assert_eq!(format_thousands(1234567), "1 234 567");
/// assert_eq!(format_thousands(42), "42");
/// ```
pub fn format_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(' ');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Форматирует вес/граммаж: до двух знаков после точки, без хвостовых нулей
pub fn format_weight(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let hundredths = (value.abs() * 100.0).round() as u64;
    let whole = hundredths / 100;
    let fraction = hundredths % 100;

    let mut result = format!("{}{}", sign, format_thousands(whole));
    if fraction != 0 {
        let digits = format!("{:02}", fraction);
        result.push('.');
        result.push_str(digits.trim_end_matches('0'));
    }
    result
}

/// Обрезает подпись кнопки до `max_chars` символов (не байтов)
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    let label = label.trim();
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut truncated: String = label.chars().take(max_chars - 1).collect();
    truncated = truncated.trim_end().to_string();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(42), "42");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1 000");
        assert_eq!(format_thousands(1234567), "1 234 567");
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(12.0), "12");
        assert_eq!(format_weight(12.5), "12.5");
        assert_eq!(format_weight(12.346), "12.35");
        assert_eq!(format_weight(1250.05), "1 250.05");
        assert_eq!(format_weight(0.0), "0");
        assert_eq!(format_weight(f64::NAN), "0");
    }

    #[test]
    fn test_truncate_label_counts_chars() {
        assert_eq!(truncate_label("Кафе Доно", 60), "Кафе Доно");
        let long = "Ресторан ".repeat(10);
        let truncated = truncate_label(&long, 20);
        assert_eq!(truncated, "Ресторан Ресторан Р…");
        assert_eq!(truncated.chars().count(), 20);
        assert_eq!(truncate_label("Cafe Dono Chilonzor", 10), "Cafe Dono…");
    }
}
