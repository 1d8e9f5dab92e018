//! Widget Settings Component
//!
//! Properties panel form for a widget: title, grid position and the settings
//! of its type. Settings are edited field by field and type-checked on save.

use leptos::prelude::*;
use serde_json::{Map, Value};

use deskboard_core::dashboard::DashboardCommand;
use deskboard_core::domain::{GridCell, WidgetConfig};

use crate::context::use_app_context;
use crate::store::{store_close_editor, use_app_store};

/// `showForecast` -> `Show forecast`
fn field_label(key: &str) -> String {
    let mut label = String::new();
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.extend(ch.to_lowercase());
        } else {
            label.push(ch);
        }
    }
    label
}

/// Parse an edited input back into the JSON shape of the field it replaces
fn parse_field(previous: &Value, input: &str) -> Value {
    match previous {
        Value::Number(_) => input
            .trim()
            .parse::<u64>()
            .map(Value::from)
            .or_else(|_| input.trim().parse::<f64>().map(Value::from))
            .unwrap_or(Value::Null),
        Value::Array(_) => Value::Array(
            input
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        ),
        _ => Value::String(input.to_string()),
    }
}

fn display_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[component]
pub fn WidgetSettings(widget_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let Some(widget) = ctx.dashboard.with_untracked(|s| s.state().widgets.get(&widget_id).cloned()) else {
        return view! { <p class="editor-context">"This widget no longer exists"</p> }.into_any();
    };
    let kind = widget.kind();
    let id = StoredValue::new(widget_id);

    let title = RwSignal::new(widget.title.clone());
    let x = RwSignal::new(widget.position.x.to_string());
    let y = RwSignal::new(widget.position.y.to_string());
    let fields = match widget.config.to_value() {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    let draft = RwSignal::new(fields.clone());
    let (error, set_error) = signal::<Option<String>>(None);
    let original_position = widget.position;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let config = match WidgetConfig::from_value(kind, Value::Object(draft.get_untracked())) {
            Ok(config) => config,
            Err(e) => {
                set_error.set(Some(format!("Invalid settings: {}", e)));
                return;
            }
        };
        let position = match (x.get_untracked().trim().parse(), y.get_untracked().trim().parse()) {
            (Ok(x), Ok(y)) => GridCell::new(x, y),
            _ => {
                set_error.set(Some("Position must be two whole numbers".to_string()));
                return;
            }
        };
        if position != original_position
            && !ctx.dispatch_dashboard(DashboardCommand::MoveWidget {
                id: id.get_value(),
                position,
            })
        {
            set_error.set(Some("That position overlaps another widget or leaves the grid".to_string()));
            return;
        }
        ctx.dispatch_dashboard(DashboardCommand::UpdateWidget {
            id: id.get_value(),
            title: Some(title.get_untracked()),
            config: Some(config),
        });
        store_close_editor(&store);
    };

    view! {
        <form class="widget-settings" on:submit=on_submit>
            <h2>{format!("{} settings", kind.default_title())}</h2>

            <label>"Title"
                <input type="text" prop:value=move || title.get() on:input=move |ev| title.set(event_target_value(&ev)) />
            </label>
            <div class="editor-row">
                <label>"Column"
                    <input type="number" min="0" prop:value=move || x.get() on:input=move |ev| x.set(event_target_value(&ev)) />
                </label>
                <label>"Row"
                    <input type="number" min="0" prop:value=move || y.get() on:input=move |ev| y.set(event_target_value(&ev)) />
                </label>
            </div>

            {fields.into_iter().map(|(key, initial)| {
                let label = field_label(&key);
                let key = StoredValue::new(key);
                match initial {
                    Value::Bool(_) => view! {
                        <label class="checkbox-field">
                            <input
                                type="checkbox"
                                prop:checked=move || draft.with(|d| d.get(&key.get_value()).and_then(Value::as_bool).unwrap_or(false))
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    draft.update(|d| { d.insert(key.get_value(), Value::Bool(checked)); });
                                }
                            />
                            {label}
                        </label>
                    }.into_any(),
                    other => {
                        let input_type = if other.is_number() { "number" } else { "text" };
                        view! {
                            <label>{label}
                                <input
                                    type=input_type
                                    prop:value=move || draft.with(|d| d.get(&key.get_value()).map(display_field).unwrap_or_default())
                                    on:change=move |ev| {
                                        let value = parse_field(&other, &event_target_value(&ev));
                                        draft.update(|d| { d.insert(key.get_value(), value); });
                                    }
                                />
                            </label>
                        }.into_any()
                    }
                }
            }).collect_view()}

            {move || error.get().map(|e| view! { <p class="editor-error">{e}</p> })}

            <div class="editor-actions">
                <button type="submit">"Save"</button>
                <button type="button" on:click=move |_| store_close_editor(&store)>"Cancel"</button>
            </div>
        </form>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("showForecast"), "Show forecast");
        assert_eq!(field_label("units"), "Units");
    }

    #[test]
    fn test_parse_field_keeps_shape() {
        assert_eq!(parse_field(&json!(5), "12"), json!(12));
        assert_eq!(parse_field(&json!(["a"]), "work, home ,"), json!(["work", "home"]));
        assert_eq!(parse_field(&json!("light"), "dark"), json!("dark"));
        assert_eq!(parse_field(&json!(1), "ten"), Value::Null);
    }
}
