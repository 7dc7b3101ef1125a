// SPDX-License-Identifier: MPL-2.0
//! Headless demo: mounts a viewer over a product's frames, waits for the
//! first frames, spins the product and logs every viewer event.

use orbit_lens::application::port::FrameFetcher;
use orbit_lens::catalog::{Product, DEFAULT_TOTAL_IMAGES};
use orbit_lens::config;
use orbit_lens::infrastructure::{FsFrameFetcher, HttpFrameFetcher};
use orbit_lens::media::FrameSource;
use orbit_lens::viewer::{request_timeout, ViewerEngine, ViewerEvent, ViewerSettings};
use std::path::PathBuf;
use std::sync::Arc;

const HELP: &str = "\
orbit_lens - headless 360° product viewer

USAGE:
  orbit_lens [OPTIONS] [URL ...]

OPTIONS:
  --product ID      Product id used by the URL template [default: demo]
  --frames N        Number of frames when no URLs are given [default: 40]
  --template T      URL template with {product} and {frame} placeholders
  --spin TICKS      Auto-rotate for TICKS frames once ready [default: 0]
  --config PATH     Settings file to use instead of the user config
  -h, --help        Print this help
";

struct Args {
    product: String,
    frames: u32,
    template: Option<String>,
    spin: u32,
    config: Option<PathBuf>,
    urls: Vec<String>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    Ok(Some(Args {
        product: args
            .opt_value_from_str("--product")?
            .unwrap_or_else(|| "demo".to_string()),
        frames: args
            .opt_value_from_str("--frames")?
            .unwrap_or(DEFAULT_TOTAL_IMAGES),
        template: args.opt_value_from_str("--template")?,
        spin: args.opt_value_from_str("--spin")?.unwrap_or(0),
        config: args.opt_value_from_str("--config")?,
        urls: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    }))
}

fn init_logging() {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    #[cfg(not(debug_assertions))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn log_event(event: &ViewerEvent) {
    match event {
        ViewerEvent::FrameChanged { frame } => log::info!("Frame {}", frame),
        ViewerEvent::FrameLoaded { frame, progress } => {
            log::debug!("Loaded frame {} ({:.0}%)", frame, progress * 100.0);
        }
        ViewerEvent::FrameFailed { frame, reason } => {
            log::warn!("Frame {} unavailable: {}", frame, reason);
        }
        ViewerEvent::AutoRotateChanged { active } => log::info!("Auto-rotate: {}", active),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let Some(args) = parse_args()? else {
        print!("{HELP}");
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    let settings = ViewerSettings::from_config(&config);

    let source = if args.urls.is_empty() {
        let product = Product {
            id: args.product,
            name: String::new(),
            sku: String::new(),
            description: String::new(),
            total_images: args.frames,
            images_360: Vec::new(),
        };
        let template = args
            .template
            .as_deref()
            .unwrap_or_else(|| config.frame_url_template());
        product.frame_source(template)?
    } else {
        FrameSource::from_urls(args.urls)
    };

    let remote = source
        .url_for(0)
        .is_some_and(|url| HttpFrameFetcher::supports(&url));
    let fetcher: Arc<dyn FrameFetcher> = if remote {
        Arc::new(HttpFrameFetcher::new(request_timeout(&config))?)
    } else {
        Arc::new(FsFrameFetcher::new())
    };

    let engine = ViewerEngine::mount(source, fetcher, settings)?;
    let mut events = engine.subscribe()?;
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            log_event(&event);
        }
    });

    engine.ready().await?;

    if args.spin > 0 {
        let period = settings.auto_rotate_interval.as_duration();
        engine.start_auto_rotate(None)?;
        tokio::time::sleep(period * args.spin + period / 2).await;
        engine.stop_auto_rotate()?;
    }

    log::info!(
        "Stopped at frame {} with {:.0}% of frames loaded",
        engine.frame_counter()?,
        engine.preloader().progress_percent()
    );

    engine.dispose()?;
    printer.await?;
    Ok(())
}
