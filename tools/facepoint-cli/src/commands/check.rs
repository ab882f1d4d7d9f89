//! Check system capabilities.

#[cfg(target_os = "linux")]
pub fn run() -> anyhow::Result<()> {
    use facepoint_platform_linux::{detect_display_server, DisplayServer};

    println!("Facepoint System Check");
    println!("{}", "=".repeat(50));

    // Display server
    match detect_display_server() {
        DisplayServer::Wayland => println!("[OK] Display server: Wayland"),
        DisplayServer::X11 => println!("[OK] Display server: X11"),
        DisplayServer::Unknown => println!("[WARN] Display server: Unknown"),
    }

    // Monitors
    let monitors = facepoint_platform_linux::detect_monitors()?;
    println!("[OK] Monitors detected: {}", monitors.len());
    for m in &monitors {
        let refresh = m
            .refresh_rate_hz
            .map_or_else(|| "?".to_string(), |hz| hz.to_string());
        println!(
            "     {} {}x{}+{}+{} @ {}Hz {}",
            m.name,
            m.width,
            m.height,
            m.x,
            m.y,
            refresh,
            if m.primary { "(primary)" } else { "" }
        );
    }

    // Permissions
    let capabilities = facepoint_platform_linux::permissions::check_capabilities();
    println!();
    facepoint_platform_linux::permissions::print_capability_report(&capabilities);

    let all_required_ok = capabilities
        .iter()
        .filter(|c| c.required)
        .all(|c| c.available);

    println!();
    if all_required_ok {
        println!("All required capabilities are available. Facepoint is ready.");
    } else {
        println!("Some required capabilities are missing. See above for fixes.");
        println!("`facepoint run --dry-run` still works without them.");
    }

    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn run() -> anyhow::Result<()> {
    println!("Facepoint System Check");
    println!("{}", "=".repeat(50));
    println!("[WARN] No pointer backend for this platform; only --dry-run sessions are supported.");
    Ok(())
}
