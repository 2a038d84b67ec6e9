//! Golden tests for the escape filter
//!
//! Each test replays a captured session and compares the rendered screen
//! against the exact text a terminal would have left behind.

use escape_filter::core::{Cursor, Screen};
use escape_filter::parser::CharReader;
use escape_filter::{filter_str, EscapeFilter, Error};

fn render(input: &str) -> String {
    filter_str(input).expect("session should replay")
}

#[test]
fn test_recorded_session() {
    let source = [
        "plain text\r",
        "\x1b[01;32mcolored text\x1b[00m\r",
        "this is erased\x08\x1b[K\x08\x1b[K\x08\x1b[K\x08\x1b[K\x08\x1b[K\x08\x1b[Koverwritten\r",
        "this is erased\r\x1b[13C\x1b[K\r\x1b[12C\x1b[K\r\x1b[11C\x1b[K\r\x1b[10C\x1b[K\r\x1b[9C\x1b[K\r\x1b[8C\x1b[Koverwritten\r",
        "\r",
        "\x1b[Aone line raised above\r",
        "\x1b[8;3Habsolute positioning\r",
        "plain text again",
        "",
        "",
    ]
    .join("\n");

    let expected = [
        "plain text",
        "colored text",
        "this is overwritten",
        "this is overwritten",
        "one line raised above",
        "",
        "",
        "  absolute positioning",
        "plain text again",
        "",
        "",
    ]
    .join("\n");

    assert_eq!(render(&source), expected);
}

#[test]
fn test_progress_bar() {
    let source = "Downloading\n\
                  [#         ] 10%\r\
                  [#####     ] 50%\r\
                  [##########] 100%\n\
                  done\n";
    assert_eq!(render(source), "Downloading\n[##########] 100%\ndone\n");
}

#[test]
fn test_spinner_with_erase_line() {
    let source = "building |\x1b[2K\rbuilding /\x1b[2K\rbuilding -\x1b[2K\rbuilt\n";
    assert_eq!(render(source), "built\n");
}

#[test]
fn test_clear_screen_and_home() {
    let source = "old output\nmore output\n\x1b[2J\x1b[;Hfresh";
    assert_eq!(render(source), "fresh");
}

#[test]
fn test_erase_below_cursor() {
    let source = "one\ntwo\nthree\n\x1b[2;1H\x1b[J";
    assert_eq!(render(source), "one\n");
}

#[test]
fn test_erase_above_cursor() {
    let source = "one\ntwo\nthree\x1b[3;3H\x1b[1J";
    assert_eq!(render(source), "\n\n   ee");
}

#[test]
fn test_erase_tail_trims_trailing_blank_lines() {
    // Line 3 was never written; clearing line 2 leaves both blank
    let mut filter = EscapeFilter::new();
    filter.load_str("first\nsecond\n\x07\x1b[2;1H\x1b[K").unwrap();
    assert_eq!(filter.screen().lines().len(), 1);
    assert_eq!(filter.render(), "first\n");
}

#[test]
fn test_wide_characters() {
    assert_eq!(render("こんにちは\r\x1b[3CX"), "こ Xにちは");
    // The right half of 界 is left behind as a space
    assert_eq!(render("世界\x1b[2GAB"), " AB ");
}

#[test]
fn test_tabs() {
    assert_eq!(render("a\tb\tc"), "a       b       c");
    assert_eq!(render("abcdefghij\x1b[Zx"), "abcdefghxj");
    assert_eq!(render("ab\x1b[2Ic"), "ab              c");
}

#[test]
fn test_vertical_tab_keeps_column() {
    assert_eq!(render("ab\x0bcd"), "ab\n  cd");
}

#[test]
fn test_title_and_hyperlink_osc_leave_no_trace() {
    let source = "\x1b]0;user@host: ~\x07$ ls\n\
                  \x1b]8;;https://example.com\x1b\\link\x1b]8;;\x1b\\\n";
    assert_eq!(render(source), "$ ls\nlink\n");
}

#[test]
fn test_cursor_parked_below_content() {
    assert_eq!(render("top\x1b[5;1H"), "top\n\n\n\n");
}

#[test]
fn test_cursor_padding_on_last_line() {
    assert_eq!(render("abc\x1b[8G"), "abc    ");
}

#[test]
fn test_unterminated_sequences_abort() {
    assert!(matches!(
        filter_str("text\x1b[1;3"),
        Err(Error::UnexpectedEof { .. })
    ));
    assert!(matches!(
        filter_str("text\x1b]2;title\x1b"),
        Err(Error::UnexpectedEof { .. })
    ));
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let mut filter = EscapeFilter::new();
    filter.load(&b"ok \xff\xfe done"[..]).unwrap();
    assert_eq!(filter.render(), "ok \u{FFFD}\u{FFFD} done");

    // A cut-short sequence takes one column per byte
    let mut filter = EscapeFilter::new();
    filter.load(&b"\xe3\x81AB\r\x1b[3CX"[..]).unwrap();
    assert_eq!(filter.render(), "\u{FFFD}\u{FFFD}AX");
}

#[test]
fn test_huge_counts_saturate() {
    let max = usize::MAX;
    let cursor_after = |input: String| {
        let mut filter = EscapeFilter::new();
        filter.load_str(&input).unwrap();
        filter.screen().cursor()
    };

    assert_eq!(cursor_after(format!("a\x1b[{max}I")), Cursor::new(1, max));
    assert_eq!(cursor_after(format!("\x1b[{}I\t", max / 8 + 1)), Cursor::new(1, max));
    assert_eq!(cursor_after(format!("\x1b[{max}C\t")), Cursor::new(1, max));
    assert_eq!(cursor_after(format!("\x1b[{max}C\x1b[{max}Z\t")), Cursor::new(1, 9));
    assert_eq!(cursor_after(format!("\x1b[{max}B\x0b")), Cursor::new(max, 1));
    assert_eq!(cursor_after(format!("\x1b[{max}B\n")), Cursor::new(max, 1));
    assert_eq!(cursor_after(format!("ab\x1b[{max}E\x0b\n")), Cursor::new(max, 1));
}

#[test]
fn test_process_from_char_source() {
    let mut filter = EscapeFilter::new();
    let mut src = CharReader::new("ab\x1b[Dc".as_bytes());
    filter.process(&mut src).unwrap();
    assert_eq!(filter.render(), "ac");
    assert_eq!(filter.screen().cursor(), Cursor::new(1, 3));
}

#[test]
fn test_screen_is_reusable_after_into_screen() {
    let mut filter = EscapeFilter::new();
    filter.load_str("abc").unwrap();
    let screen: Screen = filter.into_screen();
    assert_eq!(screen.render(), "abc");
}
