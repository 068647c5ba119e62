use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = ThumbnailConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, ThumbnailConfig::default());
    assert_eq!(cfg.layout_version, "v4");
    assert_eq!(cfg.source_label, "YouTube");
    assert_eq!(cfg.canvas, Canvas::default());
    assert_eq!(cfg.fetch_timeout(), Duration::from_secs(10));
    assert_eq!(cfg.tuning.blur_radius, 10);
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let cfg = ThumbnailConfig::from_json_str(
        r#"{
            "cache_dir": "/var/cache/np",
            "icon_path": "assets/icons.png",
            "layout_version": "v5",
            "tuning": { "panel_alpha": 200 }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.cache_dir, PathBuf::from("/var/cache/np"));
    assert_eq!(cfg.scratch_dir(), PathBuf::from("/var/cache/np/scratch"));
    assert_eq!(cfg.icon_path, Some(PathBuf::from("assets/icons.png")));
    assert_eq!(cfg.layout_version, "v5");
    assert_eq!(cfg.tuning.panel_alpha, 200);
    assert_eq!(cfg.tuning.panel_radius, 50.0);
    assert_eq!(cfg.title_font_path, None);
}

#[test]
fn malformed_json_is_an_error() {
    let err = ThumbnailConfig::from_json_str("{ not json").unwrap_err();
    assert_eq!(err.kind(), "other");
    assert!(format!("{err:#}").contains("parse thumbnail config JSON"));
}
