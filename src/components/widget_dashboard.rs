//! Widget Dashboard Component
//!
//! Layout toolbar, widget palette and the grid.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use deskboard_core::dashboard::DashboardCommand;
use deskboard_core::domain::now;
use deskboard_core::repository::{self, read_layout};
use deskboard_core::Applet;

use crate::commands;
use crate::components::{WidgetGrid, WidgetPalette};
use crate::context::use_app_context;
use crate::store::{store_close_editor, use_app_store};

#[component]
pub fn WidgetDashboard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (notice, set_notice) = signal::<Option<String>>(None);

    let report = move |result: Result<String, String>| match result {
        Ok(message) => {
            log::info!("[GRID] {}", message);
            set_notice.set(Some(message));
        }
        Err(e) => {
            log::error!("[GRID] {}", e);
            set_notice.set(Some(e));
        }
    };

    let on_save = move |_| {
        let result = ctx
            .dashboard
            .try_update(|s| {
                let dashboard = s.state().clone();
                let config = s.config().clone();
                dashboard.save(s.store_mut(), &config)
            })
            .unwrap_or(Ok(()));
        report(result.map(|_| "Layout saved".to_string()).map_err(|e| e.to_string()));
    };

    let on_load = move |_| {
        let stored = ctx.dashboard.with_untracked(|s| read_layout(s.store(), s.config()));
        let result = match stored {
            Ok(Some(widgets)) => {
                let count = widgets.len();
                ctx.dispatch_dashboard(DashboardCommand::ReplaceAll(widgets));
                Ok(format!("Loaded {} widgets", count))
            }
            Ok(None) => Err("No saved layout".to_string()),
            Err(e) => Err(e.to_string()),
        };
        store_close_editor(&store);
        report(result);
    };

    let on_export = move |_| {
        let stamp = now();
        let result = ctx.dashboard.with_untracked(|s| {
            repository::export_layout(&s.state().widgets.to_vec(), &s.config().layout_version, stamp)
                .map_err(|e| e.to_string())
        });
        let result = result.and_then(|doc| {
            let name = repository::export_file_name(stamp);
            commands::download_json(&name, &doc).map(|_| format!("Exported {}", name))
        });
        report(result);
    };

    let on_import = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = commands::picked_file(&input) else {
            return;
        };
        // allow picking the same file again
        input.set_value("");
        spawn_local(async move {
            let result = match commands::read_file_text(&file).await {
                Ok(text) => repository::import_layout(&text).map_err(|e| e.to_string()),
                Err(e) => Err(e),
            };
            let result = result.map(|widgets| {
                let count = widgets.len();
                ctx.dispatch_dashboard(DashboardCommand::ReplaceAll(widgets));
                store_close_editor(&store);
                format!("Imported {} widgets", count)
            });
            report(result.map_err(|e| format!("Import failed: {}", e)));
        });
    };

    let on_clear = move |_| {
        if commands::confirm("Remove every widget from the dashboard?").unwrap_or(false)
            && ctx.dispatch_dashboard(DashboardCommand::Clear)
        {
            store_close_editor(&store);
            report(Ok("Dashboard cleared".to_string()));
        }
    };

    let is_empty = move || ctx.dashboard.with(|s| s.state().widgets.is_empty());

    view! {
        <div class="widget-dashboard">
            <header class="dashboard-toolbar">
                <h1>"Dashboard"</h1>
                <div class="toolbar-actions">
                    <button on:click=on_save>"Save layout"</button>
                    <button on:click=on_load>"Load layout"</button>
                    <button on:click=on_export>"Export"</button>
                    <label class="import-btn">
                        "Import"
                        <input type="file" accept="application/json,.json" class="hidden" on:change=on_import />
                    </label>
                    <button class="danger" on:click=on_clear disabled=is_empty>"Clear"</button>
                </div>
                {move || notice.get().map(|n| view! {
                    <span class="toolbar-notice" on:click=move |_| set_notice.set(None)>{n}</span>
                })}
            </header>

            <div class="dashboard-body">
                <WidgetPalette />
                <WidgetGrid />
            </div>
        </div>
    }
}
