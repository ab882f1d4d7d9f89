//! Run a gesture session.

use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use facepoint_common::clock::SessionClock;
use facepoint_common::config::{AppConfig, ScreenOverride};
use facepoint_face_model::ActionLogHeader;
use facepoint_gesture_core::{FaceProcessor, ScreenSize};
use facepoint_pointer::backends::{detect_best_backend, detect_screen};
use facepoint_pointer::{ActionDispatcher, ActionWriter, PointerBackend, StubBackend};
use facepoint_session::{EndReason, FrameSource, GestureSession, JsonlFrameSource};

pub struct RunOptions {
    pub input: Option<PathBuf>,
    pub dry_run: bool,
    pub record_actions: Option<PathBuf>,
    pub smooth_factor: Option<f64>,
    pub mirror: bool,
    pub screen: Option<(u32, u32)>,
}

/// Parse a `WIDTHxHEIGHT` screen size.
pub fn parse_screen(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let height: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if width == 0 || height == 0 {
        return Err("screen dimensions must be positive".to_string());
    }
    Ok((width, height))
}

fn apply_overrides(config: &mut AppConfig, options: &RunOptions) {
    if let Some(factor) = options.smooth_factor {
        config.cursor.smooth_factor = factor;
    }
    if options.mirror {
        config.landmarks.mirror_input = true;
    }
    if let Some((width, height)) = options.screen {
        config.cursor.screen = Some(ScreenOverride { width, height });
    }
}

fn open_source(input: Option<&Path>) -> anyhow::Result<Box<dyn FrameSource>> {
    match input.filter(|path| *path != Path::new("-")) {
        None => {
            let stdin = BufReader::new(std::io::stdin());
            Ok(Box::new(JsonlFrameSource::new(stdin, "stdin")))
        }
        Some(path) => {
            let source = JsonlFrameSource::open(path)
                .map_err(|e| anyhow::anyhow!("Failed to open landmark feed: {e}"))?;
            Ok(Box::new(source))
        }
    }
}

pub async fn run(mut config: AppConfig, options: RunOptions) -> anyhow::Result<()> {
    apply_overrides(&mut config, &options);
    config.validate()?;

    let layout = detect_screen();
    let screen = match config.cursor.screen {
        Some(s) => ScreenSize::new(s.width, s.height),
        None => ScreenSize::new(layout.monitor.width, layout.monitor.height),
    };

    let backend: Box<dyn PointerBackend> = if options.dry_run {
        Box::new(StubBackend::new())
    } else {
        detect_best_backend(layout)
    };

    println!("Starting Facepoint session");
    println!(
        "  Input: {}",
        options
            .input
            .as_deref()
            .map_or("stdin".to_string(), |p| p.display().to_string())
    );
    println!("  Screen: {}x{}", screen.width, screen.height);
    println!("  Backend: {}", backend.name());
    println!("  Smoothing: {}", config.cursor.smooth_factor);
    println!();

    let mut dispatcher =
        ActionDispatcher::new(backend, screen.width, screen.height, &config.dispatch);
    if let Some(path) = options.record_actions.clone() {
        let header = ActionLogHeader {
            schema_version: "1.0".to_string(),
            epoch_wall: SessionClock::start().epoch_wall().to_string(),
            screen_width: screen.width,
            screen_height: screen.height,
            backend: dispatcher.backend_name().to_string(),
        };
        dispatcher = dispatcher.with_writer(ActionWriter::new(path, &header)?);
    }

    let source = open_source(options.input.as_deref())?;
    let processor = FaceProcessor::new(&config, screen);
    let mut session = GestureSession::new(source, processor, dispatcher);
    let stop_flag = session.stop_flag();
    tracing::debug!(?screen, dry_run = options.dry_run, "Session configured");

    println!(
        "Close both eyes for {}s or press Ctrl+C to stop...",
        config.gesture.shutdown_hold_secs
    );
    println!();

    // Frame reads block, so the loop runs off the async runtime.
    let mut task = tokio::task::spawn_blocking(move || session.run());
    let summary = tokio::select! {
        result = &mut task => result??,
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("Stopping after the current frame...");
            stop_flag.store(true, Ordering::SeqCst);
            task.await??
        }
    };

    tracing::info!(
        end_reason = ?summary.end_reason,
        frames = summary.frames,
        clicks = summary.clicks,
        "Session finished"
    );

    println!();
    println!("Session ended: {}", describe(summary.end_reason));
    println!("  Frames: {} ({} with a face)", summary.frames, summary.face_frames);
    println!("  Clicks: {}", summary.clicks);
    println!("  Scroll steps: {}", summary.scrolls);
    if let Some(path) = options.record_actions {
        println!("  Action log: {}", path.display());
    }

    Ok(())
}

fn describe(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Shutdown => "shutdown gesture",
        EndReason::Stopped => "stopped by user",
        EndReason::SourceExhausted => "landmark feed ended",
        EndReason::FailSafe => "fail-safe (cursor reached the top-left corner)",
    }
}
