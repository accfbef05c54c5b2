mod host;

use std::rc::Rc;

use anyhow::{bail, ensure, Context, Result};
use vitrine_gallery::{DecorationGroup, GalleryConfig, GallerySession, SessionPhase};
use vitrine_geometry::{Point, Rect};

use host::{Display, Library, LoggingObserver, ThumbnailGrid};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);
const DEFAULT_ITEM_COUNT: usize = 12;
const START_INDEX: usize = 4;

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let count = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("item count must be a number, got {arg:?}"))?,
        None => DEFAULT_ITEM_COUNT,
    };
    if count <= START_INDEX {
        bail!("need more than {START_INDEX} items, got {count}");
    }

    println!("=== Vitrine Gallery Demo ===");
    println!("Runs a scripted session over {count} generated items:");
    println!("  - thumbnail flight into the viewer");
    println!("  - paging by swipe and by index");
    println!("  - double-tap zoom and chrome toggling");
    println!("  - delete, then swipe to dismiss");
    println!("Set RUST_LOG=debug for engine internals.");
    println!();

    let started = web_time::Instant::now();
    let frames = run_script(count)?;
    println!(
        "Done: {frames} frames simulated in {:?}",
        started.elapsed()
    );
    Ok(())
}

fn run_script(count: usize) -> Result<usize> {
    let library = Rc::new(Library::generate(count));
    let config = GalleryConfig::default().with_video_autoplay(true);
    let session = GallerySession::builder(library.clone())
        .delegate(library.clone())
        .origins(Rc::new(ThumbnailGrid::new(VIEWPORT)))
        .observer(Rc::new(LoggingObserver))
        .config(config)
        .viewport(VIEWPORT)
        .start_index(START_INDEX)
        .build()
        .context("building the gallery session")?;
    let mut display = Display::new(session);
    let center = VIEWPORT.center();

    ensure!(display.session.present(), "present was refused");
    settle(&mut display)?;
    ensure!(
        display.session.phase() == SessionPhase::Presented,
        "gallery did not finish presenting"
    );
    report(&display, &library, "presented");

    display.drag(
        Point::new(center.x + 150.0, center.y),
        Point::new(center.x - 150.0, center.y),
        10,
    );
    settle(&mut display)?;
    report(&display, &library, "swiped forward");

    let last = count - 1;
    if display.session.go_to(last) {
        settle(&mut display)?;
        report(&display, &library, "jumped to the end");
    }
    if display.session.is_video_playing() {
        log::info!("video at {} is playing", display.session.current_index());
    }
    display.session.go_to(START_INDEX);
    settle(&mut display)?;

    display.double_tap(center);
    settle(&mut display)?;
    if let Some(view) = display.session.current_item_view() {
        log::info!("zoomed to {:.2}x", view.zoom_scale);
    }
    display.double_tap(center);
    settle(&mut display)?;

    display.tap(center);
    display.tick(400);
    settle(&mut display)?;
    log::info!(
        "chrome alpha after tap: {:.2}",
        display.session.decoration_alpha(DecorationGroup::Header)
    );
    display.tap(center);
    display.tick(400);
    settle(&mut display)?;

    ensure!(display.session.delete_current(), "delete was refused");
    settle(&mut display)?;
    report(&display, &library, "deleted");

    display.drag(center, Point::new(center.x, center.y - 300.0), 8);
    settle(&mut display)?;
    ensure!(
        display.session.phase() == SessionPhase::Closed,
        "swipe did not dismiss the gallery (phase {:?})",
        display.session.phase()
    );
    println!("Gallery closed after {} items remained", display.session.item_count());
    Ok(display.frames())
}

fn settle(display: &mut Display) -> Result<()> {
    ensure!(display.settle(), "session kept animating");
    Ok(())
}

fn report(display: &Display, library: &Library, step: &str) {
    let index = display.session.current_index();
    let name = library.name(index).unwrap_or_else(|| "?".to_string());
    match display.session.current_item_view() {
        Some(view) => println!(
            "{step:>18}: {name} (index {index}) at {:.0}x{:.0}",
            view.frame.width, view.frame.height
        ),
        None => println!("{step:>18}: {name} (index {index})"),
    }
}
