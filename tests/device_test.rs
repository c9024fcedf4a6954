mod common;
use basic::lang::ErrorCode;
use common::*;

#[test]
fn test_graphics_calls() {
    let (mut r, rec) = recording(
        "
CLS
COLOR 4, 1
PSET 10, 20 WITH 3
LINE FROM 0, 0 TO 100, 50
RECTANGLE FROM 1, 1 TO 5, 5 WITH 2 FILLED
OVAL AT 50, 50 RADII 20, 10
CIRCLE AT 1, 2 RADIUS 3 FILLED
TRIANGLE 0, 0, 10, 0, 5, 8 WITH 1
ARC AT 0, 0 RADIUS 5 FROM 0 TO 90
PAINT AT 3, 3 WITH 4",
    );
    assert_eq!(exec(&mut r), "");
    assert_eq!(
        rec.log(),
        vec![
            "tab Graphics",
            "cls",
            "color 4 1",
            "pset 10 20 WITH 3",
            "line 0 0 100 50",
            "rect 1 1 5 5 WITH 2 FILLED",
            "oval 50 50 20 10",
            "circle 1 2 3 FILLED",
            "triangle 0 0 10 0 5 8 WITH 1",
            "arc 0 0 5 0 90",
            "paint 3 3 4",
        ]
    );
}

#[test]
fn test_sprites_and_turtle() {
    let (mut r, rec) = recording(
        "GET s$ FROM 0, 0 TO 7, 3\nPUT s$ AT 10, 10\nTURTLE \"FD 10 RT 90\"\nPRINT s$",
    );
    assert_eq!(exec(&mut r), "sprite:8x4\n");
    assert_eq!(
        rec.log(),
        vec![
            "tab Graphics",
            "get 0 0 7 3",
            "put sprite:8x4 10 10",
            "turtle FD 10 RT 90",
        ]
    );
}

#[test]
fn test_audio_calls() {
    let (mut r, rec) = recording(
        "
TEMPO 120
VOLUME 0.5
VOICE 1, \"PIANO\"
VOICE 2, \"SQUARE\" WITH 0.1, 0.2, 0.7, 0.3
PLAY 1, \"CDEFG\"
SET AUDIO OFF",
    );
    assert_eq!(exec(&mut r), "");
    assert_eq!(
        rec.log(),
        vec![
            "tempo 120",
            "volume 0.5",
            "voice 1 PIANO",
            "voice 2 SQUARE 0.1 0.2 0.7 0.3",
            "play 1 CDEFG",
            "mute true",
        ]
    );
}

#[test]
fn test_envelope_needs_four_values() {
    let (mut r, _rec) = recording("VOICE 1, \"PIANO\" WITH 0.1, 0.2");
    let out = exec(&mut r);
    assert!(out.starts_with(ErrorCode::IllegalFunctionCall.name()));
    assert!(out.contains("VOICE envelope needs 4 values, got 2"));
}

#[test]
fn test_console_help_and_tabs() {
    let (mut r, rec) = recording(
        "
CONSOLE \"debug: \" + STR$(7)
HELP PSET
PSET 1, 1
HELP
SET LINE SPACING ON
SET TEXT WRAP OFF",
    );
    assert_eq!(exec(&mut r), "");
    let log = rec.log();
    assert_eq!(log[0], "console debug: 7");
    assert_eq!(log[1], "console PSET x, y [WITH c]");
    assert_eq!(log[2], "tab Help");
    assert_eq!(log[3], "tab Graphics");
    assert_eq!(log[4], "pset 1 1");
    assert!(log[5].starts_with("console HELP topics: ARC, CALL"));
    assert_eq!(log[6], "tab Help");
    assert_eq!(log[7], "set LINE SPACING true");
    assert_eq!(log[8], "set TEXT WRAP false");
    assert_eq!(log.len(), 9);
}

#[test]
fn test_uncaught_error_goes_to_console() {
    let (mut r, rec) = recording("CONSOLE \"start\"\nTHROW \"boom\"");
    assert_eq!(exec(&mut r), "EXCEPTION IN 1; boom [THROW \"boom\"]\n");
    assert_eq!(
        rec.log(),
        vec![
            "console start".to_string(),
            "console error EXCEPTION IN 1; boom [THROW \"boom\"]".to_string(),
        ]
    );
}

#[test]
fn test_null_devices_accept_everything() {
    assert_eq!(run("CLS\nCIRCLE AT 1, 1 RADIUS 2\nPLAY 1, \"C\"\nPRINT \"ok\""), "ok\n");
}

#[test]
fn test_graphics_type_errors() {
    let (mut r, rec) = recording("PSET \"x\", 1");
    assert!(exec(&mut r).starts_with(ErrorCode::TypeMismatch.name()));
    let log = rec.log();
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("console error TYPE MISMATCH"));
}
