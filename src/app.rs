//! Deskboard Frontend App
//!
//! Tab bar over the three applets, with the properties panel as a right column.

use leptos::error::Errors;
use leptos::prelude::*;
use leptos::task::spawn_local_scoped;
use reactive_stores::Store;

use crate::commands;
use crate::components::{AppTabBar, BoardView, PropertiesPanel, WidgetDashboard, WorkflowBuilder};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields, AppTab};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    // Sessions are read from local storage once, before the applets render
    let (ctx, set_ctx) = signal(None::<AppContext>);
    spawn_local_scoped(async move {
        let ctx = AppContext::new(commands::load_config());
        ctx.bind_drag_handlers();
        set_ctx.set(Some(ctx));
    });

    // Applets stay mounted; the tab bar only toggles visibility
    let shown = move |tab: AppTab| move || if store.active_tab().get() == tab { "applet" } else { "applet hidden" };

    move || match ctx.get() {
        None => view! { <div class="app-loading">"Loading..."</div> }.into_any(),
        Some(ctx) => {
            provide_context(ctx);
            view! {
                <div class="app-layout">
                    <main class="main-content">
                        <AppTabBar />

                        <section class=shown(AppTab::Board)>
                            <AppletFrame name="Backlog">
                                <BoardView />
                            </AppletFrame>
                        </section>
                        <section class=shown(AppTab::Widgets)>
                            <AppletFrame name="Widgets">
                                <WidgetDashboard />
                            </AppletFrame>
                        </section>
                        <section class=shown(AppTab::Workflow)>
                            <AppletFrame name="Workflow">
                                <WorkflowBuilder />
                            </AppletFrame>
                        </section>
                    </main>

                    // Right: properties panel (shown when editing)
                    <PropertiesPanel />
                </div>
            }
            .into_any()
        }
    }
}

/// Error boundary around one applet: a failure replaces only this subtree
#[component]
fn AppletFrame(name: &'static str, children: ChildrenFn) -> impl IntoView {
    let (attempt, set_attempt) = signal(0u32);

    view! {
        <ErrorBoundary fallback={move |errors: ArcRwSignal<Errors>| {
            let reset = errors.clone();
            view! {
                <div class="applet-error">
                    <h2>{format!("{} could not be displayed", name)}</h2>
                    <ul>
                        {move || errors
                            .get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button on:click=move |_| {
                        log::info!("[APP] Retrying {}", name);
                        *reset.write() = Errors::default();
                        set_attempt.update(|n| *n += 1);
                    }>"Retry"</button>
                </div>
            }
        }}>
            {move || {
                attempt.track();
                children()
            }}
        </ErrorBoundary>
    }
}
