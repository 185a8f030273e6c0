//! One-shot commands: `judge` and `config`.

use crate::analysis::AnalysisClient;
use crate::points::PointStore;
use crate::snapshot;
use anyhow::{bail, Result};
use compass_common::{CompassConfig, Mode, Point, API_KEY_ENV};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Exit code when the analysis exhausts its attempts.
const EXIT_ANALYSIS_FAILED: i32 = 70;

/// Judge a single scenario and print its coordinates.
pub async fn judge(action: &str, intent: &str, mode: Mode, out: Option<&Path>) -> Result<()> {
    if action.trim().is_empty() {
        bail!("--action must not be empty");
    }

    let config = CompassConfig::load_or_default();
    if CompassConfig::api_key().is_none() {
        eprintln!(
            "{}",
            style(format!(
                "warning: {} is not set; the request will fail authentication",
                API_KEY_ENV
            ))
            .yellow()
        );
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Judging under the {} frame...", mode));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let mut client = AnalysisClient::from_config(&config);
    let result = client.analyze(action, intent, mode).await;
    spinner.finish_and_clear();

    let verdict = match result {
        Ok(verdict) => verdict,
        Err(e) => {
            warn!("judge failed: {}", e);
            eprintln!("{}", style(e.user_message()).red());
            std::process::exit(EXIT_ANALYSIS_FAILED);
        }
    };

    let point = Point::from_verdict(action, intent, mode, verdict);

    println!("{}", style(&point.label).bold());
    println!("  mode:   {}", mode);
    println!(
        "  intent: {}  {}",
        format_coord(point.x),
        format_range(point.x_range)
    );
    println!(
        "  action: {}  {}",
        format_coord(point.y),
        format_range(point.y_range)
    );

    if let Some(path) = out {
        let mut store = PointStore::new();
        store.push(point);
        snapshot::write_snapshot(path, &store)?;
        println!("  saved:  {}", path.display());
    }

    Ok(())
}

/// Print the effective configuration. The key itself is never echoed.
pub fn show_config() -> Result<()> {
    let config = CompassConfig::load_or_default();

    match CompassConfig::config_path() {
        Some(path) if path.exists() => println!("config: {}", path.display()),
        Some(path) => println!("config: {} (not present, using defaults)", path.display()),
        None => println!("config: <no config directory>"),
    }

    let key_state = if CompassConfig::api_key().is_some() {
        style("set").green()
    } else {
        style("missing").red()
    };
    println!("{}: {}", API_KEY_ENV, key_state);
    println!();
    print!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}

fn format_coord(value: f64) -> String {
    format!("{:+.2}", value)
}

fn format_range(range: Option<(f64, f64)>) -> String {
    match range {
        Some((lo, hi)) => format!("[{:+.2} .. {:+.2}]", lo, hi),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coord_signs() {
        assert_eq!(format_coord(0.5), "+0.50");
        assert_eq!(format_coord(-0.25), "-0.25");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(Some((-0.1, 0.3))), "[-0.10 .. +0.30]");
        assert_eq!(format_range(None), "");
    }
}
