//! End-to-end export through the public API: config on disk, photos on
//! disk, HTML out.

use embedder::config::{self, CONFIG_FILE, EmbedConfig};
use embedder::export::{ExportError, export};
use embedder::photo::load_photos;
use embedder::placeholders::{Placeholder, PlaceholderMap};
use embedder::sizing::{NaturalSize, SizeProfile, SizingError, plan};
use embedder::template::expand;
use std::fs;
use tempfile::TempDir;

const PHOTOS: &str = r#"[
    {
        "id": "1",
        "title": "Harbor <dusk>",
        "description": "Boats & gulls",
        "width": "1200",
        "height": "800",
        "thumbnail_url": "https://lh3.example.com/u/a/s72/harbor.jpg",
        "published": "2015-06-21T18:04:11.000Z",
        "make": "FUJIFILM"
    },
    {
        "id": "2",
        "title": "Mystery",
        "thumbnail_url": "https://lh3.example.com/u/b/s72/mystery.jpg"
    },
    {
        "id": "3",
        "title": "Tower",
        "width": 800,
        "height": 1200,
        "thumbnail_url": "https://lh3.example.com/u/c/s160-c/tower.jpg"
    }
]"#;

fn write_fixture(config_toml: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(CONFIG_FILE), config_toml).unwrap();
    fs::write(tmp.path().join("photos.json"), PHOTOS).unwrap();
    tmp
}

#[test]
fn export_from_disk_renders_and_isolates_failures() {
    let tmp = write_fixture(
        r#"
template = "$TITLE|$SAFE_TITLE|$SMALL_URL|$SMALL_WIDTH x $SMALL_HEIGHT|$large_url|$PUBLISHED_YYYY-MM-DD|$MAKE\n"

[small]
max_width = 300
max_height = 300
crop = true
scale = 2.0

[large]
max_width = 1000
"#,
    );

    let config = config::load_config(tmp.path()).unwrap();
    let photos = load_photos(&tmp.path().join("photos.json")).unwrap();
    let report = export(&photos, &config);

    assert_eq!(report.selected, 3);
    assert_eq!(report.exported, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(report.failures[0].label, "2");
    assert!(matches!(
        report.failures[0].error,
        ExportError::Sizing(SizingError::InvalidDimension { .. })
    ));

    let lines: Vec<&str> = report.html.lines().collect();
    assert_eq!(
        lines,
        vec![
            // 1200x800 in 300x300 → 300x200, fetched at 2x
            "Harbor <dusk>|Harbor &lt;dusk&gt;|https://lh3.example.com/u/a/w600-h400-c/harbor.jpg|300 x 200|https://lh3.example.com/u/a/w1000/harbor.jpg|2015-06-21|FUJIFILM",
            // 800x1200 in 300x300 → 200x300; large width-only never upscales
            "Tower|Tower|https://lh3.example.com/u/c/w400-h600-c/tower.jpg|200 x 300|https://lh3.example.com/u/c/w800/tower.jpg||",
        ]
    );
}

#[test]
fn export_with_cleared_bounds_uses_original_and_height_codes() {
    let tmp = write_fixture(
        r#"
template = "$SMALL_URL $SMALL_WIDTH | $LARGE_URL $LARGE_WIDTH\n"

[small]
max_width = 0

[large]
max_width = 0
max_height = 300
"#,
    );

    let config = config::load_config(tmp.path()).unwrap();
    assert_eq!(config.small, SizeProfile::default());
    assert_eq!(config.large, SizeProfile::max_height(300));

    let photos = load_photos(&tmp.path().join("photos.json")).unwrap();
    let report = export(&photos, &config);

    // Unsized photo: the unbounded small size passes, the height-bound large size fails.
    assert_eq!(report.exported, 2);
    assert_eq!(report.failures[0].label, "2");

    let lines: Vec<&str> = report.html.lines().collect();
    assert_eq!(
        lines,
        vec![
            "https://lh3.example.com/u/a/d/harbor.jpg 1200 | https://lh3.example.com/u/a/h300/harbor.jpg 450",
            "https://lh3.example.com/u/c/d/tower.jpg 800 | https://lh3.example.com/u/c/h300/tower.jpg 200",
        ]
    );
}

#[test]
fn export_with_stock_config_uses_default_template() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("photos.json"), PHOTOS).unwrap();

    let config = config::load_config(tmp.path()).unwrap();
    assert_eq!(config, EmbedConfig::default());

    let photos = load_photos(&tmp.path().join("photos.json")).unwrap();
    let report = export(&photos, &config);
    assert!(report.html.starts_with(
        "<a href=\"https://lh3.example.com/u/a/w1200/harbor.jpg\"><img src=\"https://lh3.example.com/u/a/w620/harbor.jpg\" width=\"620\" height=\"413\" alt=\"Harbor &lt;dusk&gt;\" title=\"Boats &amp; gulls\"></a>\n\n"
    ));
    assert_eq!(report.html.matches("<a href=").count(), 2);
}

#[test]
fn template_overlay_beats_config_file() {
    let tmp = write_fixture("template = 'file'\n");
    let file = config::load_raw_config(tmp.path()).unwrap();
    let resolved = config::resolve_config(
        config::stock_defaults_value(),
        file.into_iter().chain([config::template_overlay("flag")]),
    )
    .unwrap();
    assert_eq!(resolved.template, "flag");
}

#[test]
fn plan_and_expand_compose() {
    let profile = SizeProfile::max_width(620);
    let result = plan(&profile, NaturalSize::new(1200, 800)).unwrap();

    let mut values = PlaceholderMap::new();
    values.set(Placeholder::SmallWidth, result.target_width.to_string());
    values.set(Placeholder::SmallHeight, result.target_height.to_string());
    assert_eq!(
        expand("<img width=\"$small_width\" height=\"$SMALL_HEIGHT\">", &values),
        "<img width=\"620\" height=\"413\">"
    );
}
