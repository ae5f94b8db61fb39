use crate::output::{print_fields, print_json};
use anyhow::Context;
use chrono::{DateTime, Utc};
use iss_core::config::Config;
use iss_core::daylight::{local_solar_date, DaylightChecker, SunTimes};
use iss_core::overhead::is_overhead;
use iss_core::position::PositionFetcher;
use iss_core::{http, Coordinates, SatellitePosition};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct StatusReport {
    checked_at: DateTime<Utc>,
    observer: Coordinates,
    satellite: SatellitePosition,
    delta_lat: f64,
    delta_lon: f64,
    tolerance_deg: f64,
    overhead: bool,
    sun: SunTimes,
    dark: bool,
    would_notify: bool,
}

/// `iss-notifier status`: one read-only look at position and darkness.
///
/// Unlike a monitor tick this always fetches sun times, and it never sends
/// mail, so it works before the email settings are filled in.
pub fn run(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let report = super::runtime()?.block_on(collect(&config, Utc::now()))?;

    if json {
        return print_json(&report);
    }

    let yes_no = |b: bool| String::from(if b { "yes" } else { "no" });
    print_fields(&[
        ("observer", report.observer.to_string()),
        ("iss", report.satellite.coordinates.to_string()),
        (
            "offset",
            format!(
                "{:+.3} lat, {:+.3} lon (tolerance {} deg)",
                report.delta_lat, report.delta_lon, report.tolerance_deg
            ),
        ),
        ("overhead", yes_no(report.overhead)),
        ("sunrise", report.sun.sunrise.format("%H:%M UTC").to_string()),
        ("sunset", report.sun.sunset.format("%H:%M UTC").to_string()),
        ("dark", yes_no(report.dark)),
        ("would notify", yes_no(report.would_notify)),
    ]);
    Ok(())
}

async fn collect(config: &Config, now: DateTime<Utc>) -> anyhow::Result<StatusReport> {
    let client = http::client(&config.endpoints)?;
    let position = PositionFetcher::new(client.clone(), config.endpoints.position_url.clone());
    let daylight = DaylightChecker::new(client, config.endpoints.sun_times_url.clone());

    let satellite = position
        .fetch()
        .await
        .with_context(|| format!("failed to fetch ISS position from {}", position.url()))?;
    let sun = daylight
        .sun_times(config.observer, local_solar_date(config.observer, now))
        .await
        .context("failed to fetch sunrise/sunset")?;

    let tolerance_deg = config.poll.tolerance_deg;
    let overhead = is_overhead(satellite.coordinates, config.observer, tolerance_deg);
    let dark = sun.is_dark(now);

    Ok(StatusReport {
        checked_at: now,
        observer: config.observer,
        satellite,
        delta_lat: satellite.coordinates.latitude - config.observer.latitude,
        delta_lon: satellite.coordinates.longitude - config.observer.longitude,
        tolerance_deg,
        overhead,
        sun,
        dark,
        would_notify: overhead && dark,
    })
}
