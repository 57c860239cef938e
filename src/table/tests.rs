use super::*;
use crate::Component;
use bubbletea_rs::{KeyMsg, MouseMsg};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};

#[derive(Debug, Clone)]
struct Person {
    name: &'static str,
    email: &'static str,
}

fn columns() -> Vec<ColumnDef<Person>> {
    vec![
        ColumnDef::accessor("name", "Name", |p: &Person| p.name.to_string()),
        ColumnDef::accessor("email", "Email", |p: &Person| p.email.to_string()),
    ]
}

fn people(n: usize) -> Vec<Person> {
    const NAMES: [&str; 5] = ["ann", "bob", "cyd", "dee", "eve"];
    (0..n)
        .map(|i| Person {
            name: NAMES[i % NAMES.len()],
            email: "x@example.com",
        })
        .collect()
}

fn table(n: usize) -> Model<Person> {
    Model::new(columns(), people(n)).unwrap()
}

fn plain(s: &str) -> String {
    strip_ansi_escapes::strip_str(s)
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn mouse(button: MouseEventKind, x: u16, y: u16) -> Msg {
    Box::new(MouseMsg {
        x,
        y,
        button,
        modifiers: KeyModifiers::NONE,
    })
}

// Selection

#[test]
fn test_selecting_same_row_twice_clears_selection() {
    let mut t = table(3);
    t.handle_row_selection("1");
    assert_eq!(t.selected_row(), Some("1"));
    t.handle_row_selection("1");
    assert_eq!(t.selected_row(), None);
    assert!(t.render().selected_row_ids().is_empty());
}

#[test]
fn test_selecting_another_row_moves_selection() {
    let mut t = table(3);
    t.handle_row_selection("0");
    t.handle_row_selection("2");
    assert_eq!(t.render().selected_row_ids(), vec!["2"]);

    let view = t.render();
    let rows = view.rows();
    assert!(!rows[0].selected);
    assert!(!rows[0].checkbox.checked);
    assert!(rows[2].checkbox.checked);
}

#[test]
fn test_at_most_one_row_selected_over_any_toggle_sequence() {
    let mut t = table(5);
    for id in ["0", "3", "3", "4", "1", "1", "1", "2"] {
        t.handle_row_selection(id);
        assert!(t.render().selected_row_ids().len() <= 1);
    }
    assert_eq!(t.selected_row(), Some("2"));
}

#[test]
fn test_selection_survives_page_change() {
    let mut t = table(25);
    t.handle_row_selection("3");
    t.table_model_mut().next_page();
    assert_eq!(t.selected_row(), Some("3"));
    assert!(t.render().selected_row_ids().is_empty());
    t.table_model_mut().previous_page();
    assert_eq!(t.render().selected_row_ids(), vec!["3"]);
}

// Rendering

#[test]
fn test_empty_data_renders_no_results_row() {
    let t = table(0);
    let view = t.render();
    assert_eq!(view.body_lines(), 1);
    assert_eq!(
        view.body,
        BodyView::Empty {
            col_span: 3,
            message: NO_RESULTS.to_string(),
        }
    );
    assert!(plain(&t.view()).contains("No results."));
}

#[test]
fn test_zero_columns_render_checkbox_header_and_one_column_placeholder() {
    let t: Model<Person> = Model::new(Vec::new(), people(3)).unwrap();
    let view = t.render();
    assert_eq!(view.header_rows.len(), 1);
    assert_eq!(view.header_rows[0].cell_count(), 1);
    assert!(view.header_rows[0].select_all.is_some());
    // Rows exist but have no cells.
    assert_eq!(view.rows().len(), 3);
    assert!(view.rows()[0].cells.is_empty());
}

#[test]
fn test_zero_columns_and_no_data_placeholder_spans_one_column() {
    let t: Model<Person> = Model::new(Vec::new(), Vec::new()).unwrap();
    match t.render().body {
        BodyView::Empty { col_span, .. } => assert_eq!(col_span, 1),
        other => panic!("expected empty body, got {:?}", other),
    }
}

#[test]
fn test_select_all_checkbox_is_inert() {
    let mut t = table(3).with_origin(0, 0);
    let view = t.render();
    let select_all = view.header_rows[0].select_all.unwrap();
    assert!(!select_all.interactive);
    assert!(!select_all.checked);

    // Pressing it changes nothing.
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 2, 1));
    assert_eq!(t.selected_row(), None);
    assert!(!t.is_resizing());
}

#[test]
fn test_five_rows_fit_default_page() {
    let t = table(5);
    assert_eq!(t.render().rows().len(), 5);
    assert_eq!(t.table_model().page_count(), 1);
}

#[test]
fn test_later_pages_show_remaining_rows() {
    let mut t = table(5).with_page_size(2);
    assert_eq!(t.render().rows().len(), 2);
    t.table_model_mut().next_page();
    assert_eq!(t.render().rows().len(), 2);
    t.table_model_mut().next_page();
    let view = t.render();
    assert_eq!(view.rows().len(), 1);
    assert_eq!(view.rows()[0].id, "4");
}

#[test]
fn test_view_draws_bordered_table_and_pagination() {
    let t = table(2);
    let out = plain(&t.view());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], format!("╭{}╮", "─".repeat(28)));
    assert_eq!(lines[1], "│ [ ] │ Name │ Email         │");
    assert_eq!(lines[2], "├─────┼──────┼───────────────┤");
    assert_eq!(lines[3], "│ [ ] │ ann  │ x@example.com │");
    assert_eq!(lines[4], "│ [ ] │ bob  │ x@example.com │");
    assert_eq!(lines[5], "╰────────────────────────────╯");
    assert!(lines[6].contains("Page 1 of 1"));
}

#[test]
fn test_selected_row_checkbox_is_ticked_in_view() {
    let mut t = table(2);
    t.handle_row_selection("1");
    let out = plain(&t.view());
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[3].starts_with("│ [ ] │"));
    assert!(lines[4].starts_with("│ [x] │"));
}

#[test]
fn test_stored_width_truncates_with_ellipsis() {
    let mut t = table(1);
    t.handle_mouse_down("email");
    t.handle_mouse_move(6);
    t.handle_mouse_up();
    assert_eq!(t.column_width("email"), Some(5));

    let view = t.render();
    assert_eq!(view.header_rows[0].cells[1].width, Some(5));
    assert_eq!(view.rows()[0].cells[1].width, Some(5));

    let out = plain(&t.view());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[1], "│ [ ] │ Name │ Email │");
    assert_eq!(lines[3], "│ [ ] │ ann  │ x@ex… │");
}

// Resizing

#[test]
fn test_resize_gesture_sets_width_from_table_edge() {
    let mut t = table(3).with_origin(10, 4);
    assert!(!t.is_resizing());

    t.handle_mouse_down("name");
    assert_eq!(t.resizing_column_id(), Some("name"));
    assert!(t.column_widths().is_empty());

    // Table left edge is one cell inside the container border.
    t.handle_mouse_move(10 + 1 + 120);
    assert_eq!(t.column_width("name"), Some(120));

    t.handle_mouse_up();
    assert_eq!(t.resizing_column_id(), None);
    assert_eq!(t.column_width("name"), Some(120));

    t.handle_mouse_move(10 + 1 + 30);
    assert_eq!(t.column_width("name"), Some(120));
    assert_eq!(t.column_widths().len(), 1);
}

#[test]
fn test_move_while_idle_changes_nothing() {
    let mut t = table(3);
    t.handle_mouse_move(40);
    assert!(t.column_widths().is_empty());
}

#[test]
fn test_resize_uses_absolute_offset_not_delta() {
    let mut t = table(3);
    t.handle_mouse_down("email");
    t.handle_mouse_move(16);
    assert_eq!(t.column_width("email"), Some(15));
    t.handle_mouse_move(21);
    assert_eq!(t.column_width("email"), Some(20));
}

#[test]
fn test_pointer_left_of_table_edge_gives_zero_width() {
    let mut t = table(3).with_origin(5, 0);
    t.handle_mouse_down("name");
    t.handle_mouse_move(2);
    assert_eq!(t.column_width("name"), Some(0));
}

#[test]
fn test_widths_survive_selection_and_page_changes() {
    let mut t = table(25);
    t.handle_mouse_down("name");
    t.handle_mouse_move(9);
    t.handle_row_selection("2");
    t.handle_row_selection("2");
    assert_eq!(t.column_width("name"), Some(8));

    t.table_model_mut().next_page();
    assert_eq!(t.column_width("name"), Some(8));
    assert_eq!(t.resizing_column_id(), Some("name"));
}

// Pointer routing

#[test]
fn test_press_on_header_starts_resize_and_drag_updates_width() {
    let mut t = table(3).with_origin(2, 1);
    // Header line is y = origin + 1; "Name" content starts 7 cells into the table.
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 2 + 1 + 7, 2));
    assert_eq!(t.resizing_column_id(), Some("name"));

    t.handle_pointer(PointerEvent::new(PointerKind::Drag, 2 + 1 + 12, 5));
    assert_eq!(t.column_width("name"), Some(12));

    t.handle_pointer(PointerEvent::new(PointerKind::Up, 2 + 1 + 12, 5));
    assert!(!t.is_resizing());
    assert_eq!(t.column_width("name"), Some(12));
}

#[test]
fn test_release_outside_container_keeps_gesture() {
    let mut t = table(3);
    t.handle_mouse_down("name");
    t.handle_pointer(PointerEvent::new(PointerKind::Up, 200, 200));
    assert!(t.is_resizing());
    t.handle_pointer(PointerEvent::new(PointerKind::Moved, 200, 2));
    assert!(t.column_widths().is_empty());
}

#[test]
fn test_press_on_row_checkbox_toggles_selection() {
    let mut t = table(3);
    // Lines: border, header, rule, rows...
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 2, 4));
    assert_eq!(t.selected_row(), Some("1"));
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 2, 4));
    assert_eq!(t.selected_row(), None);
}

#[test]
fn test_press_on_body_cell_does_nothing() {
    let mut t = table(3);
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 9, 4));
    assert_eq!(t.selected_row(), None);
    assert!(!t.is_resizing());
}

#[test]
fn test_press_on_grouped_header_uses_header_id() {
    let columns = vec![ColumnDef::group(
        "person",
        "Person",
        vec![
            ColumnDef::accessor("name", "Name", |p: &Person| p.name.to_string()),
            ColumnDef::accessor("email", "Email", |p: &Person| p.email.to_string()),
        ],
    )];
    let mut t = Model::new(columns, people(2)).unwrap();
    assert_eq!(t.render().header_rows.len(), 2);
    assert_eq!(t.render().header_rows[1].select_all, None);

    t.handle_pointer(PointerEvent::new(PointerKind::Down, 20, 1));
    assert_eq!(t.resizing_column_id(), Some("person"));
    t.handle_pointer(PointerEvent::new(PointerKind::Up, 20, 1));

    t.handle_pointer(PointerEvent::new(PointerKind::Down, 8, 2));
    assert_eq!(t.resizing_column_id(), Some("name"));
}

#[test]
fn test_press_on_placeholder_header_is_ignored() {
    let columns = vec![
        ColumnDef::accessor("id", "Id", |p: &Person| p.name.to_string()),
        ColumnDef::group(
            "g",
            "Contact",
            vec![
                ColumnDef::accessor("name", "Name", |p: &Person| p.name.to_string()),
                ColumnDef::accessor("email", "Email", |p: &Person| p.email.to_string()),
            ],
        ),
    ];
    let mut t = Model::new(columns, people(2)).unwrap();
    assert!(t.render().header_rows[0].cells[0].is_placeholder);

    // Top header line, over the "id" column.
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 8, 1));
    assert!(!t.is_resizing());
    t.handle_pointer(PointerEvent::new(PointerKind::Drag, 30, 1));
    assert!(t.column_widths().is_empty());

    // The leaf header underneath still starts a resize.
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 8, 2));
    assert_eq!(t.resizing_column_id(), Some("id"));
}

#[test]
fn test_group_width_widens_last_leaf() {
    let columns = vec![ColumnDef::group(
        "person",
        "Person",
        vec![
            ColumnDef::accessor("a", "A", |p: &Person| p.name.to_string()),
            ColumnDef::accessor("b", "B", |p: &Person| p.name.to_string()),
        ],
    )];
    let mut t = Model::new(columns, people(1)).unwrap();
    t.handle_mouse_down("person");
    t.handle_mouse_move(1 + 20);
    t.handle_mouse_up();

    let out = plain(&t.view());
    let lines: Vec<&str> = out.lines().collect();
    // Group cell content spans 3 + 3 + 14 = 20 columns.
    assert_eq!(lines[1], "│ [ ] │ Person               │");
    assert_eq!(lines[2], "│     │ A   │ B              │");
}

#[test]
fn test_scrolling_with_max_height() {
    let mut t = table(10).with_max_height(4);
    let out = plain(&t.view());
    // Border, 4 table lines, border, pagination.
    assert_eq!(out.lines().count(), 7);

    t.handle_pointer(PointerEvent::new(PointerKind::ScrollDown, 1, 1));
    assert_eq!(t.scroll_offset(), 1);
    for _ in 0..20 {
        t.handle_pointer(PointerEvent::new(PointerKind::ScrollDown, 1, 1));
    }
    // 1 header + rule + 10 rows, 4 visible.
    assert_eq!(t.scroll_offset(), 8);

    // The first visible line is now row 6; its checkbox sits on screen line 1.
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 2, 1));
    assert_eq!(t.selected_row(), Some("6"));

    t.handle_pointer(PointerEvent::new(PointerKind::ScrollUp, 1, 1));
    assert_eq!(t.scroll_offset(), 7);
}

#[test]
fn test_scroll_offset_is_clamped_when_page_shrinks() {
    let mut t = table(10).with_max_height(4);
    for _ in 0..8 {
        t.handle_pointer(PointerEvent::new(PointerKind::ScrollDown, 1, 1));
    }
    t.table_model_mut().set_page_size(2);
    // 1 header + rule + 2 rows fit without scrolling.
    let out = plain(&t.view());
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[1].contains("Name"));
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 2, 3));
    assert_eq!(t.selected_row(), Some("0"));
}

#[test]
fn test_drag_past_table_edge_reaches_container_width() {
    let mut t = table(3).with_width(80);
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 8, 1));
    assert_eq!(t.resizing_column_id(), Some("name"));

    // The bordered table is 30 wide; the container is 80.
    t.handle_pointer(PointerEvent::new(PointerKind::Drag, 45, 3));
    assert_eq!(t.column_width("name"), Some(44));

    t.handle_pointer(PointerEvent::new(PointerKind::Up, 79, 3));
    assert!(!t.is_resizing());
}

#[test]
fn test_container_defaults_to_table_width() {
    let mut t = table(3);
    t.handle_mouse_down("name");
    t.handle_pointer(PointerEvent::new(PointerKind::Drag, 45, 3));
    assert!(t.column_widths().is_empty());

    // A container narrower than the table does not clip it.
    let mut t = table(3).with_width(10);
    t.handle_mouse_down("name");
    t.handle_pointer(PointerEvent::new(PointerKind::Drag, 29, 3));
    assert_eq!(t.column_width("name"), Some(28));
}

#[test]
fn test_events_below_container_are_ignored() {
    let mut t = table(2);
    // Container is 6 lines tall (border, header, rule, 2 rows, border); line 6 is pagination.
    t.handle_pointer(PointerEvent::new(PointerKind::Down, 2, 6));
    assert_eq!(t.selected_row(), None);
}

// Keys and focus

#[test]
fn test_paging_keys_need_focus() {
    let mut t = table(25);
    t.update(&key(KeyCode::Right));
    assert_eq!(t.table_model().page_index(), 0);

    t.focus();
    t.update(&key(KeyCode::Right));
    assert_eq!(t.table_model().page_index(), 1);

    t.blur();
    t.update(&key(KeyCode::Right));
    assert_eq!(t.table_model().page_index(), 1);
}

#[test]
fn test_page_change_keeps_widths_and_gesture() {
    let mut t = table(25);
    t.focus();
    t.handle_mouse_down("email");
    t.handle_mouse_move(30);
    t.update(&key(KeyCode::Char('l')));
    assert_eq!(t.table_model().page_index(), 1);
    assert_eq!(t.column_width("email"), Some(29));
    assert_eq!(t.resizing_column_id(), Some("email"));
}

#[test]
fn test_mouse_messages_resize_through_update() {
    let mut t = table(3).with_width(60);
    assert!(!t.focused());

    t.update(&mouse(MouseEventKind::Down(MouseButton::Left), 8, 1));
    assert_eq!(t.resizing_column_id(), Some("name"));

    t.update(&mouse(MouseEventKind::Drag(MouseButton::Left), 41, 3));
    assert_eq!(t.column_width("name"), Some(40));

    t.update(&mouse(MouseEventKind::Up(MouseButton::Left), 41, 3));
    assert!(!t.is_resizing());
    assert_eq!(t.column_width("name"), Some(40));
}

#[test]
fn test_mouse_messages_select_rows_while_blurred() {
    let mut t = table(3);
    t.focus();
    t.blur();
    t.update(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 3));
    assert_eq!(t.selected_row(), Some("0"));

    // Other buttons are ignored.
    t.update(&mouse(MouseEventKind::Down(MouseButton::Right), 2, 3));
    assert_eq!(t.selected_row(), Some("0"));
}

#[test]
fn test_from_mouse_ignores_other_buttons() {
    assert_eq!(
        PointerEvent::from_mouse(MouseEventKind::Down(MouseButton::Left), 3, 4),
        Some(PointerEvent::new(PointerKind::Down, 3, 4))
    );
    assert_eq!(
        PointerEvent::from_mouse(MouseEventKind::Down(MouseButton::Right), 3, 4),
        None
    );
}

#[test]
fn test_malformed_columns_fail_construction() {
    let mut cols = columns();
    cols.push(ColumnDef::accessor("name", "Again", |p: &Person| p.name.to_string()));
    let err = Model::new(cols, people(1)).unwrap_err();
    assert_eq!(err.to_string(), "duplicate column id 'name'");
}
