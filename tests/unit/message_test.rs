//! Unit tests for screen parsing: markers, alignment, popups

use ttyr::message::{
    AlignmentPath, MarkerKind, MarkerScanner, MessageAligner, MessageState, PopupExtractor,
};
use ttyr::ReplayError;

fn screen(rows: &[&str]) -> Vec<String> {
    let mut lines: Vec<String> = rows.iter().map(|r| format!("{:<80}", r)).collect();
    lines.resize(25, " ".repeat(80));
    lines
}

#[test]
fn single_line_message_with_more() {
    let lines = screen(&["Hello--More--"]);
    let marker = MarkerScanner::scan(&lines).unwrap().unwrap();
    assert_eq!((marker.row, marker.col), (0, 5));

    let alignment = MessageAligner::default().align("Hello", &lines, &marker).unwrap();
    assert_eq!(alignment.rows, 1);
    assert_eq!(alignment.path, AlignmentPath::Aligned);
    assert!(PopupExtractor::extract(&lines, alignment.rows, marker.row, marker.col).is_empty());

    let state = MessageState::parse("Hello", &lines, &MessageAligner::default()).unwrap();
    assert_eq!(state.text(), "Hello\n--More--");
}

#[test]
fn paged_menu_without_message() {
    let lines = screen(&[
        "",
        "                              Weapons",
        "                              a - a +1 long sword (weapon in hand)",
        "",
        "                              b - 2 daggers",
        "                              (1 of 3)",
    ]);
    let state = MessageState::parse("", &lines, &MessageAligner::default()).unwrap();
    assert_eq!(
        state.popup,
        vec![
            "Weapons".to_string(),
            "a - a +1 long sword (weapon in hand)".to_string(),
            "b - 2 daggers".to_string(),
        ]
    );
    let marker = state.marker.unwrap();
    assert_eq!(marker.kind, MarkerKind::Page { index: 1, total: 3 });
    assert_eq!((marker.row, marker.col), (5, 30));
}

#[test]
fn two_markers_are_an_error() {
    let lines = screen(&["Really attack?--More--", "", "(end)"]);
    let err = MarkerScanner::scan(&lines).unwrap_err();
    match err {
        ReplayError::MultipleMarkers { found } => {
            assert_eq!(found.len(), 2);
            assert_eq!(found[0], (0, 14, MarkerKind::Continue));
            assert_eq!(found[1], (2, 0, MarkerKind::End));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn multi_row_message_sets_boundary_below_it() {
    let lines = screen(&[
        "You hear the footsteps of a guard on patrol. You hear bubbling water. You",
        "hear a door open.--More--",
    ]);
    let message =
        "You hear the footsteps of a guard on patrol. You hear bubbling water. You hear a door open.";
    let state = MessageState::parse(message, &lines, &MessageAligner::default()).unwrap();
    assert!(state.popup.is_empty());
    assert_eq!(state.segment(), message);
}

#[test]
fn strict_aligner_rejects_row_zero_fusion() {
    // The top row still shows an earlier message in front of the current one.
    let lines = screen(&["You kill the newt! Welcome to experience level 2.--More--"]);
    let message = "Welcome to experience level 2.";
    let marker = MarkerScanner::scan(&lines).unwrap().unwrap();

    let lenient = MessageAligner::default().align(message, &lines, &marker).unwrap();
    assert_eq!(lenient.rows, 1);
    assert_eq!(lenient.path, AlignmentPath::RowZeroFusion);

    let strict = MessageState::parse(message, &lines, &MessageAligner::strict());
    assert!(matches!(
        strict,
        Err(ReplayError::MessageScreenMismatch { .. })
    ));
}

#[test]
fn marker_free_screen_is_message_only() {
    let lines = screen(&["You see here a scroll labeled FOOBIE BLETCH."]);
    let state = MessageState::parse(
        "You see here a scroll labeled FOOBIE BLETCH.",
        &lines,
        &MessageAligner::default(),
    )
    .unwrap();
    assert!(state.marker.is_none());
    assert!(state.popup.is_empty());
    assert_eq!(state.text(), "You see here a scroll labeled FOOBIE BLETCH.");
}
