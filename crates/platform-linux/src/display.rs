//! Display server and monitor detection.
//!
//! Monitors are read from `xrandr --query`, which also works under
//! XWayland. When that is unavailable a single 1920x1080 monitor is
//! assumed and a warning is logged.

use std::process::Command;

use facepoint_common::error::{FacepointError, FacepointResult};
pub use facepoint_platform_core::{
    primary_monitor, virtual_desktop_bounds, DesktopBounds, DisplayServer, MonitorInfo,
};

/// Detect connected monitors.
pub fn detect_monitors() -> FacepointResult<Vec<MonitorInfo>> {
    tracing::debug!("Detecting monitors");

    match query_xrandr() {
        Ok(monitors) => Ok(monitors),
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to a single 1920x1080 monitor");
            Ok(vec![MonitorInfo::single(1920, 1080)])
        }
    }
}

fn query_xrandr() -> FacepointResult<Vec<MonitorInfo>> {
    let output = Command::new("xrandr")
        .arg("--query")
        .output()
        .map_err(|e| FacepointError::platform(format!("failed to run xrandr: {e}")))?;
    if !output.status.success() {
        return Err(FacepointError::platform(format!(
            "xrandr exited with {}",
            output.status
        )));
    }
    monitors_from_xrandr(&String::from_utf8_lossy(&output.stdout))
}

fn monitors_from_xrandr(output: &str) -> FacepointResult<Vec<MonitorInfo>> {
    let monitors = parse_xrandr(output);
    if monitors.is_empty() {
        return Err(FacepointError::platform("xrandr reported no connected monitors"));
    }
    Ok(monitors)
}

/// Parse connected outputs and their current mode from `xrandr --query`.
pub fn parse_xrandr(output: &str) -> Vec<MonitorInfo> {
    let mut monitors: Vec<MonitorInfo> = Vec::new();
    let mut in_connected_output = false;

    for line in output.lines() {
        if !line.starts_with(char::is_whitespace) {
            in_connected_output = false;
            let mut tokens = line.split_whitespace();
            let (Some(name), Some("connected")) = (tokens.next(), tokens.next()) else {
                continue;
            };

            let rest: Vec<&str> = tokens.collect();
            let primary = rest.first() == Some(&"primary");
            // Connected but disabled outputs have no geometry token.
            let Some((width, height, x, y)) = rest.iter().find_map(|t| parse_geometry(t)) else {
                continue;
            };

            monitors.push(MonitorInfo {
                name: name.to_string(),
                width,
                height,
                x,
                y,
                refresh_rate_hz: None,
                primary,
            });
            in_connected_output = true;
        } else if in_connected_output {
            let current_rate = line
                .split_whitespace()
                .skip(1)
                .find(|t| t.contains('*'))
                .and_then(|t| t.trim_end_matches(['*', '+']).parse::<f64>().ok());
            if let (Some(rate), Some(monitor)) = (current_rate, monitors.last_mut()) {
                monitor.refresh_rate_hz = Some(rate.round() as u32);
            }
        }
    }

    monitors
}

/// Parse a `WxH+X+Y` geometry token.
fn parse_geometry(token: &str) -> Option<(u32, u32, i32, i32)> {
    let (size, offsets) = token.split_once('+')?;
    let (w, h) = size.split_once('x')?;
    let (x, y) = offsets.split_once('+')?;
    Some((w.parse().ok()?, h.parse().ok()?, x.parse().ok()?, y.parse().ok()?))
}

/// Detect the current display server.
pub fn detect_display_server() -> DisplayServer {
    if std::env::var("WAYLAND_DISPLAY").is_ok() {
        DisplayServer::Wayland
    } else if std::env::var("DISPLAY").is_ok() {
        DisplayServer::X11
    } else {
        DisplayServer::Unknown
    }
}
