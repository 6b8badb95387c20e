//! droid-nav CLI - Map the current Android screen and act on its elements
//!
//! Usage:
//!     droid-nav [OPTIONS]
//!
//! Environment Variables:
//!     DROID_NAV_SERIAL: Device serial for multi-device setups
//!     DROID_NAV_ADB: Path to the adb executable (default: discovered)
//!     DROID_NAV_COMMAND_TIMEOUT: Per-command adb timeout in seconds (default: 10)
//!     DROID_NAV_TAP_DELAY: Pause after each tap in seconds (default: 0)
//!     DROID_NAV_FOCUS_DELAY: Pause between --tap and --enter-text in seconds (default: 0.5)
//!     RUST_LOG: Log filter (default: warn)

use anyhow::{bail, Result};
use clap::Parser;
use droid_nav::{
    AdbChannel, AdbConnection, AdbLocation, KeyCode, NavConfig, Navigator, Selector, TimingConfig,
};
use serde_json::json;
use tracing::debug;

/// droid-nav - Android screen mapping and element navigation
#[derive(Parser, Debug)]
#[command(name = "droid-nav")]
#[command(about = "Map the current Android screen and act on its elements")]
#[command(after_help = r#"Examples:
    # Summarize the current screen
    droid-nav

    # Full element dump as JSON
    droid-nav --json

    # Tap the button labelled "Sign In"
    droid-nav --find-text "sign in" --tap

    # Type into the second text field
    droid-nav --find-class EditText --index 1 --tap --enter-text "hunter2"

    # Tap raw coordinates
    droid-nav --tap-at 540,1200

    # Press a key by name or code
    droid-nav --key back
"#)]
struct Cli {
    // Selector options
    /// Find element by text or content description (case-insensitive substring)
    #[arg(long, value_name = "TEXT")]
    find_text: Option<String>,

    /// Find element by resource id (substring)
    #[arg(long, value_name = "ID")]
    find_id: Option<String>,

    /// Find element by class name (substring)
    #[arg(long, value_name = "CLASS")]
    find_class: Option<String>,

    /// Which match to use, zero-based
    #[arg(long, default_value = "0")]
    index: usize,

    // Action options
    /// Tap the found element
    #[arg(long)]
    tap: bool,

    /// Enter text (into the found element, or the focused field without a selector)
    #[arg(long, value_name = "TEXT")]
    enter_text: Option<String>,

    /// Tap at coordinates, e.g. 540,1200
    #[arg(
        long,
        value_name = "X,Y",
        value_parser = parse_point,
        conflicts_with_all = ["find_text", "find_id", "find_class", "tap", "enter_text", "key"]
    )]
    tap_at: Option<(i32, i32)>,

    /// Press a key: home, back, enter, tab, delete, ... or a numeric keycode
    #[arg(long, value_name = "KEY", conflicts_with_all = ["find_text", "find_id", "find_class", "tap", "enter_text"])]
    key: Option<String>,

    // Device options
    /// Device serial
    #[arg(short = 's', long, env = "DROID_NAV_SERIAL")]
    serial: Option<String>,

    /// Path to the adb executable
    #[arg(long, env = "DROID_NAV_ADB", value_name = "PATH")]
    adb_path: Option<String>,

    /// List attached devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Print the screen size and exit
    #[arg(long)]
    screen_size: bool,

    // Output options
    /// Machine-readable JSON output
    #[arg(long)]
    json: bool,

    /// Detailed output: list interactive elements with bounds
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Debug logging to stderr
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn selector(&self) -> Option<Selector> {
        if self.find_text.is_none() && self.find_id.is_none() && self.find_class.is_none() {
            return None;
        }
        Some(Selector {
            text: self.find_text.clone(),
            resource_id: self.find_id.clone(),
            class_name: self.find_class.clone(),
            index: self.index,
        })
    }
}

/// Parse "x,y" into a coordinate pair
fn parse_point(s: &str) -> std::result::Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x coordinate '{}'", x))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y coordinate '{}'", y))?;
    Ok((x, y))
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print attached devices
async fn list_devices(connection: &AdbConnection, as_json: bool) -> Result<()> {
    let devices = connection.list_devices().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("No devices connected.");
        return Ok(());
    }

    println!("Connected devices:");
    println!("{}", "-".repeat(60));
    for device in devices {
        let status_icon = if device.is_ready() { "\u{2713}" } else { "\u{2717}" };
        let model_info = device
            .model
            .map(|m| format!(" ({})", m))
            .unwrap_or_default();
        println!(
            "  {} {:<30} [{:?}] {}{}",
            status_icon, device.serial, device.connection_type, device.state, model_info
        );
    }
    Ok(())
}

/// Resolve the selector, then tap and/or type as requested
async fn run_selector(
    navigator: &Navigator<AdbChannel>,
    args: &Cli,
    selector: &Selector,
) -> Result<()> {
    let element = navigator.find(selector).await?;
    if !args.json {
        println!("Found: {}", element);
    }

    let mut tapped = None;
    if args.tap {
        let (x, y) = navigator.tap_element(&element).await?;
        if !args.json {
            println!("Tapped at {},{}", x, y);
        }
        tapped = Some([x, y]);
    }

    if let Some(text) = &args.enter_text {
        if args.tap {
            navigator.wait_for_focus().await;
        }
        navigator.enter_text(text).await?;
        if !args.json {
            println!("Entered text: {}", text);
        }
    }

    if args.json {
        let report = json!({
            "selector": selector,
            "element": element,
            "tapped": tapped,
            "entered_text": args.enter_text,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

async fn run(args: Cli) -> Result<()> {
    let adb = match &args.adb_path {
        Some(path) => AdbLocation::explicit(path),
        None => AdbLocation::discover(),
    };
    debug!("adb: {} ({:?})", adb.path.display(), adb.source);

    let timing = TimingConfig::default();
    let connection = AdbConnection::new(&adb, timing.command_timeout());

    if args.list_devices {
        return list_devices(&connection, args.json).await;
    }

    let serial = connection.resolve_serial(args.serial.as_deref()).await?;
    let config = NavConfig::new(adb).with_serial(serial).with_timing(timing);
    let navigator = Navigator::from_config(AdbChannel::new(&config), &config);

    if args.screen_size {
        let size = navigator.channel().screen_size().await;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&size)?);
        } else {
            let note = if size.is_fallback() { " (fallback, lookup failed)" } else { "" };
            println!("Screen size: {}x{}{}", size.width, size.height, note);
        }
        return Ok(());
    }

    if let Some((x, y)) = args.tap_at {
        navigator.tap_at(x, y).await?;
        println!("Tapped at {},{}", x, y);
        return Ok(());
    }

    if let Some(key) = &args.key {
        navigator.press_key(KeyCode::parse(key)?).await?;
        println!("Pressed {}", key);
        return Ok(());
    }

    if let Some(selector) = args.selector() {
        return run_selector(&navigator, &args, &selector).await;
    }

    if args.tap {
        bail!("--tap needs a selector (--find-text, --find-id or --find-class)");
    }

    if let Some(text) = &args.enter_text {
        navigator.enter_text(text).await?;
        println!("Entered text: {}", text);
        return Ok(());
    }

    let screen = navigator.screen().await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&screen.dump())?);
    } else if args.verbose {
        println!("{}", screen.detailed_summary());
    } else {
        println!("{}", screen.summary());
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("540,1200"), Ok((540, 1200)));
        assert_eq!(parse_point(" 1 , 2 "), Ok((1, 2)));
        assert!(parse_point("540").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_selector_from_flags() {
        let cli = Cli::parse_from(["droid-nav", "--find-class", "EditText", "--index", "1"]);
        assert_eq!(
            cli.selector(),
            Some(Selector::new().with_class("EditText").with_index(1))
        );

        let cli = Cli::parse_from(["droid-nav", "--json"]);
        assert_eq!(cli.selector(), None);
    }

    #[test]
    fn test_tap_at_conflicts_with_selector() {
        assert!(Cli::try_parse_from(["droid-nav", "--tap-at", "1,2", "--find-text", "x"]).is_err());
        let cli = Cli::try_parse_from(["droid-nav", "--tap-at", "10,20"]).unwrap();
        assert_eq!(cli.tap_at, Some((10, 20)));
    }
}
