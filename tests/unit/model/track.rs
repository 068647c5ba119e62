use super::*;

fn track(title: Option<&str>, duration: Option<&str>, views: Option<&str>) -> Track {
    Track {
        id: "abc123".to_string(),
        title: title.map(str::to_string),
        thumbnail: "https://i.ytimg.com/vi/abc123/hqdefault.jpg".to_string(),
        duration: duration.map(str::to_string),
        view_count: views.map(str::to_string),
    }
}

#[test]
fn live_markers_classify_as_live() {
    for d in [None, Some(""), Some("   "), Some("Live"), Some("LIVE"), Some("live now"), Some(" Live Now ")] {
        assert_eq!(classify_duration(d), EndLabel::Live, "{d:?}");
    }
}

#[test]
fn regular_durations_are_kept_trimmed() {
    assert_eq!(
        classify_duration(Some("3:45")),
        EndLabel::Duration("3:45".to_string())
    );
    assert_eq!(
        classify_duration(Some(" 1:02:03 ")),
        EndLabel::Duration("1:02:03".to_string())
    );
    assert!(!classify_duration(Some("3:45")).is_live());
}

#[test]
fn durations_without_digits_use_placeholder() {
    assert_eq!(
        classify_duration(Some("n/a")),
        EndLabel::Duration(UNKNOWN_DURATION.to_string())
    );
    assert_eq!(classify_duration(Some("livestream")).text(), UNKNOWN_DURATION);
}

#[test]
fn end_label_text() {
    assert_eq!(EndLabel::Live.text(), "Live");
    assert_eq!(EndLabel::Duration("4:20".into()).text(), "4:20");
}

#[test]
fn title_non_word_runs_collapse_to_single_spaces() {
    assert_eq!(normalize_title(Some("Song!!  Name__Here")), "Song Name Here");
    assert_eq!(normalize_title(Some("  --hello, world!! ")), "Hello World");
}

#[test]
fn title_is_title_cased() {
    assert_eq!(normalize_title(Some("the QUICK brown fox")), "The Quick Brown Fox");
    assert_eq!(normalize_title(Some("don't stop")), "Don T Stop");
    // A letter following a digit starts a new word.
    assert_eq!(normalize_title(Some("2nd ave")), "2Nd Ave");
    assert_eq!(normalize_title(Some("élan vital")), "Élan Vital");
}

#[test]
fn absent_or_empty_title_uses_placeholder() {
    assert_eq!(normalize_title(None), UNSUPPORTED_TITLE);
    assert_eq!(normalize_title(Some("!!!")), UNSUPPORTED_TITLE);
}

#[test]
fn render_request_fills_placeholders() {
    let req = RenderRequest::from_track(&track(None, None, None), Canvas::default());
    assert_eq!(req.title, UNSUPPORTED_TITLE);
    assert_eq!(req.views, UNKNOWN_VIEWS);
    assert!(req.end_label.is_live());
    assert_eq!(req.canvas, Canvas::default());
    assert_eq!(req.meta_line("YouTube"), "YouTube | Unknown Views");
}

#[test]
fn render_request_from_full_track() {
    let req = RenderRequest::from_track(
        &track(Some("lofi hip-hop radio"), Some("3:45"), Some("1.2M views")),
        Canvas::default(),
    );
    assert_eq!(req.title, "Lofi Hip Hop Radio");
    assert_eq!(req.end_label, EndLabel::Duration("3:45".to_string()));
    assert_eq!(req.meta_line("YouTube"), "YouTube | 1.2M views");
}

#[test]
fn track_deserializes_with_optional_fields_missing() {
    let t: Track = serde_json::from_str(r#"{"id":"x","thumbnail":"http://h/x.jpg"}"#).unwrap();
    assert_eq!(t.title, None);
    assert_eq!(t.duration, None);
    assert_eq!(t.view_count, None);
}
