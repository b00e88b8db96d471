//! End-to-end editor flow against the in-memory layout store.

use gardenplot_core::remote::block_on;
use gardenplot_core::{
    Editor, MemoryRemote, Modifiers, PersistenceBridge, PlantingDrop, SaveStatus, ToolKind,
};
use kurbo::Point;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn draw_rect(editor: &mut Editor, from: Point, to: Point, now: Instant) {
    editor.set_tool(ToolKind::Rect);
    editor.pointer_down(from, Modifiers::NONE, now);
    editor.pointer_move(to);
    editor.pointer_up(now);
}

#[test]
fn hydrate_edit_save_round_trip() {
    let now = Instant::now();
    let store = Arc::new(MemoryRemote::new());
    let bridge = PersistenceBridge::new(Arc::clone(&store), "garden-1");
    let mut editor = Editor::new();

    // Nothing saved yet, start blank.
    assert!(block_on(bridge.load()).unwrap().is_none());

    draw_rect(&mut editor, Point::new(20.0, 20.0), Point::new(120.0, 80.0), now);
    block_on(bridge.save(&editor.document())).unwrap();
    assert_eq!(bridge.status(), SaveStatus::Saved);

    // A second session hydrates from what the first one saved.
    let loaded = block_on(bridge.load()).unwrap().expect("layout saved");
    let mut second = Editor::new();
    second.hydrate(loaded);
    assert_eq!(
        second.scene.snapshot_json().unwrap(),
        editor.scene.snapshot_json().unwrap()
    );
}

#[test]
fn undo_redo_round_trip_law() {
    let now = Instant::now();
    let mut editor = Editor::new();
    editor.hydrate(Default::default());
    let initial = editor.scene.snapshot_json().unwrap();

    let mutations = 8;
    for i in 0..mutations {
        let origin = Point::new(i as f64 * 30.0, 0.0);
        draw_rect(&mut editor, origin, origin + kurbo::Vec2::new(20.0, 20.0), now);
    }
    let final_state = editor.scene.snapshot_json().unwrap();

    for _ in 0..mutations {
        assert!(editor.undo(now));
    }
    assert_eq!(editor.scene.snapshot_json().unwrap(), initial);
    assert!(!editor.undo(now));

    for _ in 0..mutations {
        assert!(editor.redo(now));
    }
    assert_eq!(editor.scene.snapshot_json().unwrap(), final_state);
    assert!(!editor.redo(now));
}

#[test]
fn branch_truncation_blocks_old_future() {
    let now = Instant::now();
    let mut editor = Editor::new();
    editor.hydrate(Default::default());
    draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(10.0, 10.0), now);
    draw_rect(&mut editor, Point::new(30.0, 0.0), Point::new(40.0, 10.0), now);
    let pre_undo_future = editor.scene.snapshot_json().unwrap();

    editor.undo(now);
    draw_rect(&mut editor, Point::new(60.0, 0.0), Point::new(70.0, 10.0), now);
    assert!(!editor.can_redo());
    assert_ne!(editor.scene.snapshot_json().unwrap(), pre_undo_future);
}

#[test]
fn save_payload_never_contains_overlays() {
    let now = Instant::now();
    let store = Arc::new(MemoryRemote::new());
    let bridge = PersistenceBridge::new(Arc::clone(&store), "garden-1");
    let mut editor = Editor::new();
    editor.set_grid_enabled(true);
    draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(40.0, 40.0), now);

    block_on(bridge.save(&editor.document())).unwrap();
    let saved = store.layout("garden-1").unwrap();
    assert_eq!(saved.objects.len(), 1);
    assert!(saved.objects.iter().all(|obj| !obj.grid_line));
}

#[test]
fn burst_of_edits_collapses_to_one_save() {
    let t0 = Instant::now();
    let store = Arc::new(MemoryRemote::new());
    let bridge = PersistenceBridge::new(Arc::clone(&store), "garden-1");
    let mut editor = Editor::new();

    // Three mutations within a second.
    for i in 0..3 {
        let at = t0 + Duration::from_millis(i * 400);
        let origin = Point::new(i as f64 * 30.0, 0.0);
        draw_rect(&mut editor, origin, origin + kurbo::Vec2::new(20.0, 20.0), at);
        if editor.autosave_due(at) {
            block_on(bridge.save(&editor.document())).unwrap();
        }
    }
    let last_edit = t0 + Duration::from_millis(800);
    assert!(!editor.autosave_due(last_edit + Duration::from_millis(2900)));
    assert!(editor.autosave_due(last_edit + Duration::from_secs(3)));
    block_on(bridge.save(&editor.document())).unwrap();
    assert_eq!(store.save_count(), 1);
    assert!(!editor.autosave_due(last_edit + Duration::from_secs(10)));
}

#[test]
fn palette_drop_places_icon_and_reports_position_once() {
    let now = Instant::now();
    let store = Arc::new(MemoryRemote::new());
    let bridge = PersistenceBridge::new(Arc::clone(&store), "garden-1");
    let mut editor = Editor::new();

    let drop = PlantingDrop {
        crop_id: "5".into(),
        location_crop_id: "12".into(),
        crop_name: "Tomato".into(),
        planted_date: "2024-05-01".into(),
    };
    let update = editor
        .drop_planting(&drop, Point::new(200.0, 150.0), now)
        .expect("drop carries a placement id");
    block_on(bridge.push_position(&update));

    let updates = store.position_updates();
    assert_eq!(updates.len(), 1);
    let (context, update) = &updates[0];
    assert_eq!(context, "garden-1");
    assert_eq!(update.location_crop_id, "12");
    assert!((update.x - 200.0).abs() < f64::EPSILON);
    assert!((update.y - 150.0).abs() < f64::EPSILON);

    // The placed icon keeps its annotations through a save round trip.
    block_on(bridge.save(&editor.document())).unwrap();
    let saved = store.layout("garden-1").unwrap();
    let planting = saved.objects[0].planting.as_ref().unwrap();
    assert_eq!(planting.crop_name, "Tomato");
    assert_eq!(planting.planted_date.as_deref(), Some("2024-05-01"));
}
