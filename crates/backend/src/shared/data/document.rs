use contracts::domain::common::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Документ внешнего хранилища: ID и произвольные поля
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Документ из JSON-объекта; не-объект даёт документ без полей
    pub fn from_value(id: impl Into<String>, value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::new(id, fields),
            _ => Self::new(id, Map::new()),
        }
    }

    /// Первое непустое строковое значение среди ключей (числа приводятся к строке)
    pub fn str_field(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| match self.fields.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Числовое значение: число или строка с числом (допускается запятая)
    pub fn number_field(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|key| match self.fields.get(*key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            _ => None,
        })
        .filter(|v| v.is_finite())
    }

    /// Ссылка на другой документ: ID или путь, от которого берётся последний сегмент
    pub fn ref_field(&self, keys: &[&str]) -> Option<String> {
        let raw = self.str_field(keys)?;
        let id = raw.rsplit('/').next().unwrap_or(&raw).trim();
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }

    /// Координаты: `{lat, lng}` или `{latitude, longitude}`
    pub fn geo_field(&self, keys: &[&str]) -> Option<GeoPoint> {
        keys.iter().find_map(|key| {
            let obj = self.fields.get(*key)?.as_object()?;
            let lat = obj.get("latitude").or_else(|| obj.get("lat"))?.as_f64()?;
            let lng = obj
                .get("longitude")
                .or_else(|| obj.get("lng"))
                .or_else(|| obj.get("lon"))?
                .as_f64()?;
            Some(GeoPoint::new(lat, lng)).filter(GeoPoint::is_valid)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value("d1", value)
    }

    #[test]
    fn test_str_field_takes_first_non_empty() {
        let d = doc(json!({"name": "  ", "restaurant": "Cafe Dono", "code": 12}));
        assert_eq!(d.str_field(&["name", "restaurant"]).as_deref(), Some("Cafe Dono"));
        assert_eq!(d.str_field(&["code"]).as_deref(), Some("12"));
        assert_eq!(d.str_field(&["missing"]), None);
    }

    #[test]
    fn test_number_field_accepts_strings() {
        let d = doc(json!({"a": 12.5, "b": "18,5", "c": "abc"}));
        assert_eq!(d.number_field(&["a"]), Some(12.5));
        assert_eq!(d.number_field(&["b"]), Some(18.5));
        assert_eq!(d.number_field(&["c"]), None);
        assert_eq!(d.number_field(&["c", "a"]), Some(12.5));
    }

    #[test]
    fn test_ref_field_strips_path() {
        let d = doc(json!({
            "productId": "projects/p/databases/(default)/documents/products/p42",
            "packageType": "k1"
        }));
        assert_eq!(d.ref_field(&["productId"]).as_deref(), Some("p42"));
        assert_eq!(d.ref_field(&["packageType"]).as_deref(), Some("k1"));
    }

    #[test]
    fn test_geo_field_variants() {
        let d = doc(json!({"location": {"lat": 41.3, "lng": 69.2}}));
        assert_eq!(d.geo_field(&["location"]), Some(GeoPoint::new(41.3, 69.2)));

        let d = doc(json!({"location": {"latitude": 41.3, "longitude": 69.2}}));
        assert_eq!(d.geo_field(&["location"]), Some(GeoPoint::new(41.3, 69.2)));

        let d = doc(json!({"location": {"lat": 141.3, "lng": 69.2}}));
        assert_eq!(d.geo_field(&["location"]), None);
    }
}
