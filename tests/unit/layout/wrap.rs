use super::*;

fn chars(s: &str) -> CalwallResult<f64> {
    Ok(s.chars().count() as f64)
}

#[test]
fn one_word_per_line_when_only_one_fits() {
    let lines = wrap_text("a b c", 1.0, chars).unwrap();
    assert_eq!(lines, vec!["a", "b", "c"]);
}

#[test]
fn blank_paragraphs_are_preserved() {
    let lines = wrap_text("line1\n\nline3", 100.0, chars).unwrap();
    assert_eq!(lines, vec!["line1", "", "line3"]);
}

#[test]
fn greedy_fill_packs_words_until_overflow() {
    let lines = wrap_text("the quick brown fox jumps", 11.0, chars).unwrap();
    assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
}

#[test]
fn over_wide_word_is_not_split() {
    let lines = wrap_text("hi extraordinarily ok", 5.0, chars).unwrap();
    assert_eq!(lines, vec!["hi", "extraordinarily", "ok"]);
}

#[test]
fn crlf_and_runs_of_spaces_collapse() {
    let lines = wrap_text("one  two\r\nthree", 100.0, chars).unwrap();
    assert_eq!(lines, vec!["one two", "three"]);
}

#[test]
fn empty_input_is_one_blank_line() {
    assert_eq!(wrap_text("", 10.0, chars).unwrap(), vec![String::new()]);
}

#[test]
fn measure_errors_propagate() {
    let err = wrap_text("a b", 10.0, |_| {
        Err(crate::foundation::error::CalwallError::render("no font"))
    })
    .unwrap_err();
    assert!(err.to_string().contains("no font"));
}
