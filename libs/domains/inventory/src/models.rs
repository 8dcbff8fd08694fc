use core_config::{ConfigError, FromEnv, env_parse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Item entity, stored verbatim as one document per item.
///
/// Only `id` is interpreted: it is the lookup key for get and delete.
/// MongoDB's own `_id` is assigned on insert and ignored when reading.
/// Missing fields decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub price: f64,
    pub category: String,
    pub tags: Vec<String>,
    pub attributes: HashMap<String, String>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Document field a `StreamItems` request value is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreamFilterField {
    #[default]
    Id,
    Name,
}

impl StreamFilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamFilterField::Id => "id",
            StreamFilterField::Name => "name",
        }
    }

    /// Whether `item` matches `value` on this field.
    pub fn matches(&self, item: &Item, value: &str) -> bool {
        match self {
            StreamFilterField::Id => item.id == value,
            StreamFilterField::Name => item.name == value,
        }
    }
}

impl fmt::Display for StreamFilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamFilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(StreamFilterField::Id),
            "name" => Ok(StreamFilterField::Name),
            other => Err(format!("unknown stream filter field '{}', expected id or name", other)),
        }
    }
}

pub const DEFAULT_STREAM_PACING: Duration = Duration::from_secs(1);

/// How `StreamItems` selects and paces items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSettings {
    /// Delay after each emitted item
    pub pacing: Duration,
    pub filter_field: StreamFilterField,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            pacing: DEFAULT_STREAM_PACING,
            filter_field: StreamFilterField::default(),
        }
    }
}

impl StreamSettings {
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_filter_field(mut self, filter_field: StreamFilterField) -> Self {
        self.filter_field = filter_field;
        self
    }
}

impl FromEnv for StreamSettings {
    /// Reads:
    /// - `INVENTORY_STREAM_PACING_MS` (default: 1000)
    /// - `INVENTORY_STREAM_FILTER` (`id` or `name`, default: `id`)
    fn from_env() -> Result<Self, ConfigError> {
        let pacing_ms: u64 = env_parse("INVENTORY_STREAM_PACING_MS", 1000)?;
        let filter_field = env_parse("INVENTORY_STREAM_FILTER", StreamFilterField::default())?;

        Ok(Self {
            pacing: Duration::from_millis(pacing_ms),
            filter_field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_item_ignores_mongo_object_id() {
        let document = doc! {
            "_id": bson::oid::ObjectId::new(),
            "id": "a1",
            "name": "widget",
            "quantity": 3,
        };

        let item: Item = bson::from_document(document).unwrap();
        assert_eq!(item, Item::new("a1", "widget").with_quantity(3));
    }

    #[test]
    fn test_item_serializes_lookup_key_as_id() {
        let document = bson::to_document(&Item::new("a1", "widget")).unwrap();
        assert_eq!(document.get_str("id").unwrap(), "a1");
        assert!(!document.contains_key("_id"));
    }

    #[test]
    fn test_item_rejects_mistyped_field() {
        let document = doc! { "id": "a1", "quantity": "three" };
        assert!(bson::from_document::<Item>(document).is_err());
    }

    #[test]
    fn test_stream_filter_field_parse() {
        assert_eq!("id".parse::<StreamFilterField>(), Ok(StreamFilterField::Id));
        assert_eq!("Name".parse::<StreamFilterField>(), Ok(StreamFilterField::Name));
        assert!("category".parse::<StreamFilterField>().is_err());
    }

    #[test]
    fn test_stream_filter_field_matches() {
        let item = Item::new("a1", "widget");
        assert!(StreamFilterField::Id.matches(&item, "a1"));
        assert!(!StreamFilterField::Id.matches(&item, "widget"));
        assert!(StreamFilterField::Name.matches(&item, "widget"));
    }

    #[test]
    fn test_stream_settings_defaults() {
        temp_env::with_vars_unset(["INVENTORY_STREAM_PACING_MS", "INVENTORY_STREAM_FILTER"], || {
            let settings = StreamSettings::from_env().unwrap();
            assert_eq!(settings, StreamSettings::default());
            assert_eq!(settings.pacing, Duration::from_secs(1));
            assert_eq!(settings.filter_field, StreamFilterField::Id);
        });
    }

    #[test]
    fn test_stream_settings_from_env() {
        temp_env::with_vars(
            [
                ("INVENTORY_STREAM_PACING_MS", Some("250")),
                ("INVENTORY_STREAM_FILTER", Some("name")),
            ],
            || {
                let settings = StreamSettings::from_env().unwrap();
                assert_eq!(settings.pacing, Duration::from_millis(250));
                assert_eq!(settings.filter_field, StreamFilterField::Name);
            },
        );
    }

    #[test]
    fn test_stream_settings_rejects_unknown_filter() {
        temp_env::with_var("INVENTORY_STREAM_FILTER", Some("sku"), || {
            let err = StreamSettings::from_env().unwrap_err();
            assert!(err.to_string().contains("INVENTORY_STREAM_FILTER"));
        });
    }
}
