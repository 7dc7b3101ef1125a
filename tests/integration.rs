// SPDX-License-Identifier: MPL-2.0
use orbit_lens::catalog::Product;
use orbit_lens::config::{self, Config};
use orbit_lens::domain::viewer::{FrameAsset, FrameState};
use orbit_lens::infrastructure::{FsFrameFetcher, UrlFrameFetcher};
use orbit_lens::media::FrameSource;
use orbit_lens::viewer::{EngineState, InputKind, ViewerEngine, ViewerEvent, ViewerSettings};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn write_png(path: &Path, width: u32, height: u32) {
    let image = image_rs::RgbaImage::from_pixel(width, height, image_rs::Rgba([0, 80, 160, 255]));
    image
        .save_with_format(path, image_rs::ImageFormat::Png)
        .expect("Failed to write frame");
}

async fn wait_until_settled(engine: &ViewerEngine) {
    let total = engine.total_frames();
    for _ in 0..1_000 {
        let settled = (0..total).all(|index| {
            engine
                .preloader()
                .state(index)
                .is_some_and(FrameState::is_settled)
        });
        if settled {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("frames did not settle in time");
}

#[test]
fn settings_survive_a_config_round_trip() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let saved = Config {
        pointer_sensitivity: Some(6.0),
        touch_sensitivity: Some(2.0),
        auto_rotate_interval_ms: Some(120),
        preload_batch_size: Some(4),
        preload_all: Some(false),
        ..Config::default()
    };
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    assert_eq!(loaded, saved);

    let settings = ViewerSettings::from_config(&loaded);
    assert_eq!(settings.sensitivity(InputKind::Pointer).px(), 6.0);
    assert_eq!(settings.sensitivity(InputKind::Touch).px(), 2.0);
    assert_eq!(settings.auto_rotate_interval.millis(), 120);
    assert_eq!(settings.preload_batch.value(), 4);
    assert!(!settings.preload_all);
}

#[tokio::test]
async fn catalog_product_drives_slider_and_drag() {
    let product: Product = serde_json::from_str(
        r#"{ "id": "grille-001", "name": "Chrome Grille", "sku": "GRL-001", "totalImages": 16 }"#,
    )
    .expect("product JSON should parse");
    let source = product
        .frame_source("https://cdn.example.com/{product}/360/truck_{frame}.png")
        .expect("product should be valid");

    let engine = ViewerEngine::new(source, Arc::new(UrlFrameFetcher), ViewerSettings::default())
        .expect("session should be created");
    let mut events = engine.subscribe().expect("session is live");

    engine.set_external_frame(20).unwrap();
    assert_eq!(engine.current_frame().unwrap(), 4);
    assert_eq!(engine.frame_counter().unwrap(), "04 / 16");

    engine.begin_gesture(100.0).unwrap();
    engine.set_external_frame(9).unwrap();
    engine.update_gesture(92.0, InputKind::Pointer).unwrap();
    engine.end_gesture().unwrap();
    assert_eq!(engine.current_frame().unwrap(), 2);

    let mut frames = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let ViewerEvent::FrameChanged { frame } = event {
            frames.push(frame);
        }
    }
    assert_eq!(frames, vec![4, 2]);

    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
    assert!(matches!(
        engine.displayed_asset().unwrap(),
        Some(FrameAsset::Remote(url)) if url.ends_with("grille-001/360/truck_002.png")
    ));
}

#[tokio::test]
async fn frames_on_disk_load_and_decode() {
    let dir = tempdir().expect("Failed to create temporary directory");
    for frame in 1..=6 {
        write_png(&dir.path().join(format!("frame_{frame:03}.png")), 8, 6);
    }
    let root = dir.path().to_path_buf();
    let source = FrameSource::from_fn(6, move |index| {
        root.join(format!("frame_{:03}.png", index + 1))
            .to_string_lossy()
            .into_owned()
    });

    let engine = ViewerEngine::mount(source, Arc::new(FsFrameFetcher::new()), ViewerSettings::default())
        .expect("session should be created");
    engine.ready().await.expect("priority frames should load");
    assert_eq!(engine.state(), EngineState::Ready);

    wait_until_settled(&engine).await;
    assert!(engine.preloader().is_all_loaded());
    assert_eq!(engine.progress(), 1.0);
    assert_eq!(engine.preloader().memory_usage(), 6 * 8 * 6 * 4);

    let asset = engine.displayed_asset().unwrap().expect("frame 1 is ready");
    let image = asset.as_bitmap().expect("disk frames are decoded");
    assert_eq!((image.width(), image.height()), (8, 6));
}

#[tokio::test]
async fn missing_frame_keeps_progress_below_one() {
    let dir = tempdir().expect("Failed to create temporary directory");
    for frame in [1, 2, 3, 5] {
        write_png(&dir.path().join(format!("{frame}.png")), 2, 2);
    }
    let urls = (1..=5)
        .map(|frame| dir.path().join(format!("{frame}.png")).to_string_lossy().into_owned())
        .collect();

    let engine = ViewerEngine::mount(
        FrameSource::from_urls(urls),
        Arc::new(FsFrameFetcher::new()),
        ViewerSettings::default(),
    )
    .expect("session should be created");
    let mut events = engine.subscribe().expect("session is live");

    wait_until_settled(&engine).await;

    assert_eq!(engine.preloader().loaded_count(), 4);
    assert!(!engine.preloader().is_all_loaded());
    assert!(engine.progress() < 1.0);
    assert_eq!(engine.preloader().state(3), Some(FrameState::Failed));

    engine.set_external_frame(3).unwrap();
    engine.on_gesture_step(1).unwrap();
    assert_eq!(engine.displayed_frame().unwrap(), Some(3));

    let mut failed = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let ViewerEvent::FrameFailed { frame, .. } = event {
            failed.push(frame);
        }
    }
    assert_eq!(failed, vec![4]);
}

#[tokio::test]
async fn dropping_the_engine_ends_the_session() {
    let source = FrameSource::from_fn(8, |index| format!("https://cdn.example.com/{index}.png"));
    let engine = ViewerEngine::mount(source, Arc::new(UrlFrameFetcher), ViewerSettings::default())
        .expect("session should be created");
    let mut events = engine.subscribe().expect("session is live");
    engine.start_auto_rotate(None).unwrap();

    drop(engine);

    let mut remaining = Vec::new();
    while let Some(event) = events.recv().await {
        remaining.push(event);
    }
    assert_eq!(remaining, vec![ViewerEvent::AutoRotateChanged { active: true }]);
}
