//! Repository Integration Tests
//!
//! Round trips through MemoryStore for all three applets.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use crate::command::{Applet, Session};
    use crate::config::SuiteConfig;
    use crate::dashboard::{Dashboard, DashboardCommand};
    use crate::domain::{
        template_for, Board, CanvasPoint, GridCell, NodeKind, Task, User, WidgetKind,
    };
    use crate::board::BoardCommand;
    use crate::repository::*;
    use crate::workflow::{Workflow, WorkflowCommand};

    fn setup_store() -> MemoryStore {
        MemoryStore::new()
    }

    #[test]
    fn test_board_falls_back_to_sample() {
        let store = setup_store();
        let board = load_board(&store, &SuiteConfig::default());
        assert_eq!(board.columns.len(), 5);
        assert_eq!(board.tasks.len(), 5);
    }

    #[test]
    fn test_garbage_board_falls_back_to_sample() {
        let mut store = setup_store();
        let config = SuiteConfig::default();
        store.set(&config.board_key, "{\"columns\": 12").unwrap();
        let board = load_board(&store, &config);
        assert_eq!(board.id, "board-1");
    }

    #[test]
    fn test_board_round_trip() {
        let mut store = setup_store();
        let config = SuiteConfig::default();
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
        let mut board = Board::sample(now);
        board.tasks.get_mut("task-3").unwrap().due_date = Some(Utc.with_ymd_and_hms(2024, 2, 15, 17, 45, 12).unwrap());

        save_board(&mut store, &config, &board).unwrap();
        let back = load_board(&store, &config);
        assert_eq!(back, board);
    }

    #[test]
    fn test_bad_due_date_becomes_none() {
        let mut store = setup_store();
        let config = SuiteConfig::default();
        let board = Board::sample(Utc::now());
        let mut json: serde_json::Value = serde_json::to_value(&board).unwrap();
        json["tasks"]["task-3"]["dueDate"] = serde_json::json!("not-a-date");
        store.set(&config.board_key, &json.to_string()).unwrap();

        let back = load_board(&store, &config);
        let task = back.tasks.get("task-3").unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.title, "Implement API endpoints");
    }

    #[test]
    fn test_board_session_persists_on_change_only() {
        let config = SuiteConfig::default();
        let mut session: Session<Board, _> = Session::open(setup_store(), config.clone());
        assert!(session.store().is_empty());

        let task = Task::new("Ship it", User::new("1", "John Doe", "john@example.com"), Utc::now());
        let id = task.id.clone();
        assert!(session.dispatch(BoardCommand::AddTask {
            column_id: "todo".into(),
            task
        }));
        let stored = load_board(session.store(), &config);
        assert!(stored.tasks.contains(&id));

        // a no-op leaves storage alone
        let mut session = Session::with_state(session.state().clone(), setup_store(), config);
        assert!(!session.dispatch(BoardCommand::DeleteTask("ghost".into())));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_layout_round_trip() {
        let mut store = setup_store();
        let config = SuiteConfig::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut dashboard = Dashboard::new(config.grid);
        dashboard.apply(DashboardCommand::AddWidget(WidgetKind::Clock), now);
        dashboard.apply(DashboardCommand::AddWidget(WidgetKind::Chart), now);
        dashboard.save(&mut store, &config).unwrap();

        let raw = store.get(&config.layout_key).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], "1.0");
        assert!(json["savedAt"].is_string());

        let loaded = Dashboard::load(&store, &config);
        assert_eq!(loaded.widgets, dashboard.widgets);
        assert_eq!(read_layout(&setup_store(), &config).unwrap(), None);
    }

    #[test]
    fn test_import_skips_bad_entries() {
        let raw = r#"{
            "widgets": [
                {"id": "a", "type": "clock", "title": "Clock", "position": {"x": 0, "y": 0}, "size": {"width": 2, "height": 2}, "config": {}},
                {"id": "b", "type": "hologram"},
                {"id": "c", "type": "notes", "config": null, "createdAt": "yesterday"}
            ],
            "version": "1.0",
            "exportedAt": "2024-03-01T08:00:00.000Z"
        }"#;
        let widgets = import_layout(raw).unwrap();
        let ids: Vec<_> = widgets.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(widgets[1].created_at, None);
        assert_eq!(widgets[1].title, "Sticky Notes");

        assert!(import_layout("{}").unwrap().is_empty());
        assert!(import_layout("[1, 2]").is_err());
    }

    #[test]
    fn test_export_document() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 0).unwrap();
        let mut dashboard = Dashboard::new(SuiteConfig::default().grid);
        dashboard.add_widget(WidgetKind::Todo, now);
        let doc = export_layout(&dashboard.widgets.to_vec(), "1.0", now).unwrap();
        assert!(doc.contains("\n  \"widgets\""));
        assert!(doc.contains("\"exportedAt\": \"2024-03-01T23:59:00.000Z\""));
        assert!(!doc.contains("savedAt"));
        assert_eq!(export_file_name(now), "widget-layout-2024-03-01.json");

        let back = import_layout(&doc).unwrap();
        assert_eq!(back, dashboard.widgets.to_vec());
    }

    #[test]
    fn test_workflow_save_list_load() {
        let config = SuiteConfig::default();
        let mut session: Session<Workflow, _> = Session::open(setup_store(), config.clone());
        let t = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();
        session.dispatch_at(
            WorkflowCommand::AddNode {
                template: template_for(NodeKind::Start).unwrap(),
                position: CanvasPoint::new(10.0, 10.0),
            },
            t,
        );
        session.dispatch_at(WorkflowCommand::Save, t);
        let id = session.state().id.clone().unwrap();

        let (workflow, mut store) = session.into_parts();
        assert!(store.keys().unwrap().contains(&format!("workflow-{}", id)));

        let summaries = list_workflows(&store, &config).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, id);
        assert_eq!(summaries[0].nodes, 1);

        let loaded = load_workflow(&store, &config, &id).unwrap();
        assert_eq!(loaded, workflow);

        delete_workflow(&mut store, &config, &id).unwrap();
        assert!(list_workflows(&store, &config).unwrap().is_empty());
        assert_eq!(load_workflow(&store, &config, &id), None);
    }

    #[test]
    fn test_unsaved_workflow_cannot_be_written() {
        let mut store = setup_store();
        let err = save_workflow(&mut store, &SuiteConfig::default(), &Workflow::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_widget_position_survives() {
        let config = SuiteConfig::default();
        let mut session: Session<Dashboard, _> = Session::open(setup_store(), config.clone());
        session.dispatch(DashboardCommand::AddWidget(WidgetKind::Weather));
        let id = session.state().widgets.ids().next().unwrap().to_string();
        session.dispatch(DashboardCommand::MoveWidget {
            id: id.clone(),
            position: GridCell::new(4, 3),
        });
        let (_, store) = session.into_parts();
        let loaded = load_layout(&store, &config);
        assert_eq!(loaded[0].position, GridCell::new(4, 3));
    }
}
