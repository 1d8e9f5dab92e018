//! Widget Entity
//!
//! A dashboard applet occupying a rectangle of grid cells. The per-type
//! settings are a tagged union; on the wire the tag is `type` and the body is
//! `config`, next to the common fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::impl_entity;

/// Top-left cell of a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

impl GridCell {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Widget size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Weather,
    News,
    Calculator,
    Clock,
    Todo,
    Calendar,
    Notes,
    Chart,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 8] = [
        WidgetKind::Weather,
        WidgetKind::News,
        WidgetKind::Calculator,
        WidgetKind::Clock,
        WidgetKind::Todo,
        WidgetKind::Calendar,
        WidgetKind::Notes,
        WidgetKind::Chart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Weather => "weather",
            WidgetKind::News => "news",
            WidgetKind::Calculator => "calculator",
            WidgetKind::Clock => "clock",
            WidgetKind::Todo => "todo",
            WidgetKind::Calendar => "calendar",
            WidgetKind::Notes => "notes",
            WidgetKind::Chart => "chart",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            WidgetKind::Weather => "Weather",
            WidgetKind::News => "Latest News",
            WidgetKind::Calculator => "Calculator",
            WidgetKind::Clock => "Clock",
            WidgetKind::Todo => "Todo List",
            WidgetKind::Calendar => "Calendar",
            WidgetKind::Notes => "Sticky Notes",
            WidgetKind::Chart => "Chart",
        }
    }

    pub fn default_size(&self) -> GridSize {
        match self {
            WidgetKind::Calculator | WidgetKind::Todo => GridSize::new(2, 3),
            WidgetKind::Calendar => GridSize::new(3, 3),
            WidgetKind::Chart => GridSize::new(3, 2),
            _ => GridSize::new(2, 2),
        }
    }

    pub fn default_config(&self) -> WidgetConfig {
        match self {
            WidgetKind::Weather => WidgetConfig::Weather(WeatherConfig::default()),
            WidgetKind::News => WidgetConfig::News(NewsConfig::default()),
            WidgetKind::Calculator => WidgetConfig::Calculator(CalculatorConfig::default()),
            WidgetKind::Clock => WidgetConfig::Clock(ClockConfig::default()),
            WidgetKind::Todo => WidgetConfig::Todo(TodoConfig::default()),
            WidgetKind::Calendar => WidgetConfig::Calendar(CalendarConfig::default()),
            WidgetKind::Notes => WidgetConfig::Notes(NotesConfig::default()),
            WidgetKind::Chart => WidgetConfig::Chart(ChartConfig::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherConfig {
    pub location: String,
    pub units: String,
    pub show_forecast: bool,
    pub refresh_interval: u32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            location: "New York".to_string(),
            units: "metric".to_string(),
            show_forecast: true,
            refresh_interval: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsConfig {
    pub category: String,
    pub sources: Vec<String>,
    pub max_items: u32,
    pub show_images: bool,
    pub show_source: bool,
    pub refresh_interval: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            category: "general".to_string(),
            sources: Vec::new(),
            max_items: 5,
            show_images: true,
            show_source: true,
            refresh_interval: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorConfig {
    pub scientific: bool,
    pub theme: String,
    pub precision: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            scientific: false,
            theme: "light".to_string(),
            precision: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClockConfig {
    pub timezone: String,
    pub format: String,
    pub show_date: bool,
    pub show_seconds: bool,
    pub theme: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timezone: "local".to_string(),
            format: "12h".to_string(),
            show_date: true,
            show_seconds: true,
            theme: "analog".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TodoConfig {
    pub max_items: u32,
    pub show_completed: bool,
    pub categories: Vec<String>,
    pub sort_by: String,
    pub default_priority: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            max_items: 10,
            show_completed: true,
            categories: vec!["work".to_string(), "personal".to_string()],
            sort_by: "created".to_string(),
            default_priority: "medium".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarConfig {
    pub view: String,
    pub show_weekends: bool,
    pub first_day_of_week: u8,
    pub show_event_colors: bool,
    pub time_format: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            view: "month".to_string(),
            show_weekends: true,
            first_day_of_week: 0,
            show_event_colors: true,
            time_format: "12h".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotesConfig {
    pub background_color: String,
    pub font_size: u32,
    pub font_family: String,
    pub auto_save: bool,
    pub word_wrap: bool,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            background_color: "#fff59d".to_string(),
            font_size: 14,
            font_family: "Arial".to_string(),
            auto_save: true,
            word_wrap: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    pub chart_type: String,
    pub data_source: String,
    pub refresh_interval: u32,
    pub show_legend: bool,
    pub show_grid: bool,
    pub animation_duration: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: "line".to_string(),
            data_source: "sample".to_string(),
            refresh_interval: 60,
            show_legend: true,
            show_grid: true,
            animation_duration: 1000,
        }
    }
}

/// Per-type widget settings
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetConfig {
    Weather(WeatherConfig),
    News(NewsConfig),
    Calculator(CalculatorConfig),
    Clock(ClockConfig),
    Todo(TodoConfig),
    Calendar(CalendarConfig),
    Notes(NotesConfig),
    Chart(ChartConfig),
}

impl WidgetConfig {
    /// Parse the stored settings object of a `kind` widget; `null` means all defaults
    pub fn from_value(kind: WidgetKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            WidgetKind::Weather => WidgetConfig::Weather(parse_config(value)?),
            WidgetKind::News => WidgetConfig::News(parse_config(value)?),
            WidgetKind::Calculator => WidgetConfig::Calculator(parse_config(value)?),
            WidgetKind::Clock => WidgetConfig::Clock(parse_config(value)?),
            WidgetKind::Todo => WidgetConfig::Todo(parse_config(value)?),
            WidgetKind::Calendar => WidgetConfig::Calendar(parse_config(value)?),
            WidgetKind::Notes => WidgetConfig::Notes(parse_config(value)?),
            WidgetKind::Chart => WidgetConfig::Chart(parse_config(value)?),
        })
    }

    /// Settings as a JSON object
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            WidgetConfig::Weather(c) => serde_json::to_value(c),
            WidgetConfig::News(c) => serde_json::to_value(c),
            WidgetConfig::Calculator(c) => serde_json::to_value(c),
            WidgetConfig::Clock(c) => serde_json::to_value(c),
            WidgetConfig::Todo(c) => serde_json::to_value(c),
            WidgetConfig::Calendar(c) => serde_json::to_value(c),
            WidgetConfig::Notes(c) => serde_json::to_value(c),
            WidgetConfig::Chart(c) => serde_json::to_value(c),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetConfig::Weather(_) => WidgetKind::Weather,
            WidgetConfig::News(_) => WidgetKind::News,
            WidgetConfig::Calculator(_) => WidgetKind::Calculator,
            WidgetConfig::Clock(_) => WidgetKind::Clock,
            WidgetConfig::Todo(_) => WidgetKind::Todo,
            WidgetConfig::Calendar(_) => WidgetKind::Calendar,
            WidgetConfig::Notes(_) => WidgetKind::Notes,
            WidgetConfig::Chart(_) => WidgetKind::Chart,
        }
    }
}

/// A dashboard widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WidgetWire", into = "WidgetWire")]
pub struct Widget {
    pub id: String,
    pub title: String,
    pub position: GridCell,
    pub size: GridSize,
    pub config: WidgetConfig,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Widget {
    /// New widget of `kind` with its default title, size and config, placed at (0,0)
    pub fn new(kind: WidgetKind, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: kind.default_title().to_string(),
            position: GridCell::default(),
            size: kind.default_size(),
            config: kind.default_config(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.config.kind()
    }
}

impl_entity!(Widget);

/// Storage shape: `type` and `config` sit beside the common fields
#[doc(hidden)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetWire {
    id: String,
    #[serde(rename = "type")]
    kind: WidgetKind,
    #[serde(default)]
    title: String,
    #[serde(default)]
    position: GridCell,
    #[serde(default)]
    size: GridSize,
    #[serde(default)]
    config: serde_json::Value,
    #[serde(default, with = "crate::repository::dates")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::repository::dates")]
    updated_at: Option<DateTime<Utc>>,
}

fn parse_config<T>(value: serde_json::Value) -> Result<T, serde_json::Error>
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_null() {
        Ok(T::default())
    } else {
        serde_json::from_value(value)
    }
}

impl TryFrom<WidgetWire> for Widget {
    type Error = serde_json::Error;

    fn try_from(wire: WidgetWire) -> Result<Self, Self::Error> {
        let config = WidgetConfig::from_value(wire.kind, wire.config)?;
        let title = if wire.title.is_empty() {
            wire.kind.default_title().to_string()
        } else {
            wire.title
        };
        Ok(Widget {
            id: wire.id,
            title,
            position: wire.position,
            size: wire.size,
            config,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        })
    }
}

impl From<Widget> for WidgetWire {
    fn from(widget: Widget) -> Self {
        let kind = widget.kind();
        let config = widget.config.to_value().unwrap_or_default();
        WidgetWire {
            id: widget.id,
            kind,
            title: widget.title,
            position: widget.position,
            size: widget.size,
            config,
            created_at: widget.created_at,
            updated_at: widget.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_per_kind() {
        let now = Utc::now();
        let calc = Widget::new(WidgetKind::Calculator, now);
        assert_eq!(calc.size, GridSize::new(2, 3));
        assert_eq!(calc.title, "Calculator");
        assert_eq!(Widget::new(WidgetKind::Calendar, now).size, GridSize::new(3, 3));
        assert_eq!(Widget::new(WidgetKind::Clock, now).size, GridSize::new(2, 2));
    }

    #[test]
    fn test_wire_shape() {
        let widget = Widget::new(WidgetKind::Notes, Utc::now());
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["type"], "notes");
        assert_eq!(json["config"]["backgroundColor"], "#fff59d");
        assert_eq!(json["size"]["width"], 2);
        assert!(json["createdAt"].is_string());

        let back: Widget = serde_json::from_value(json).unwrap();
        assert_eq!(back.config, widget.config);
    }

    #[test]
    fn test_partial_config_is_defaulted() {
        let json = r#"{"id":"w1","type":"clock","config":{"format":"24h"}}"#;
        let widget: Widget = serde_json::from_str(json).unwrap();
        match widget.config {
            WidgetConfig::Clock(c) => {
                assert_eq!(c.format, "24h");
                assert_eq!(c.timezone, "local");
            }
            other => panic!("unexpected config {:?}", other),
        }
        assert_eq!(widget.title, "Clock");
        assert_eq!(widget.position, GridCell::new(0, 0));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"id":"w1","type":"stocks","config":{}}"#;
        assert!(serde_json::from_str::<Widget>(json).is_err());
    }

    #[test]
    fn test_config_value_round_trip() {
        let mut value = WidgetKind::Clock.default_config().to_value().unwrap();
        value["format"] = serde_json::json!("24h");
        let config = WidgetConfig::from_value(WidgetKind::Clock, value).unwrap();
        match config {
            WidgetConfig::Clock(clock) => {
                assert_eq!(clock.format, "24h");
                assert!(clock.show_seconds);
            }
            other => panic!("unexpected config {:?}", other),
        }
        assert!(WidgetConfig::from_value(WidgetKind::Todo, serde_json::json!({"maxItems": "ten"})).is_err());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(WidgetKind::from_str("chart"), Some(WidgetKind::Chart));
        assert_eq!(WidgetKind::from_str("nope"), None);
    }
}
