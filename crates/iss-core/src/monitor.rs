use crate::config::Config;
use crate::daylight::DaylightChecker;
use crate::error::Result;
use crate::http;
use crate::notify::{Mailer, Notification};
use crate::overhead::is_overhead;
use crate::position::PositionFetcher;
use crate::types::TickOutcome;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// The polling loop: position → overhead → darkness → email, then sleep.
///
/// Observer coordinates live in the owned [`Config`] and never change for the
/// lifetime of the monitor. The only state carried between ticks is the time
/// of the last notification, used when a cooldown is configured.
pub struct Monitor<M> {
    config: Config,
    position: PositionFetcher,
    daylight: DaylightChecker,
    mailer: M,
    last_notified: Option<DateTime<Utc>>,
}

impl<M: Mailer> Monitor<M> {
    pub fn new(config: Config, mailer: M) -> Result<Self> {
        let client = http::client(&config.endpoints)?;
        let position = PositionFetcher::new(client.clone(), config.endpoints.position_url.clone());
        let daylight = DaylightChecker::new(client, config.endpoints.sun_times_url.clone());
        Ok(Self {
            config,
            position,
            daylight,
            mailer,
            last_notified: None,
        })
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Run one poll cycle as of `now`. The daylight endpoint is only called
    /// when the satellite is overhead, and mail only goes out when it is
    /// also dark.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> Result<TickOutcome> {
        let observer = self.config.observer;
        let position = self.position.fetch().await?;

        if !is_overhead(position.coordinates, observer, self.config.poll.tolerance_deg) {
            debug!(position = %position.coordinates, "not overhead");
            return Ok(TickOutcome::NotOverhead);
        }
        info!(position = %position.coordinates, "ISS is overhead");

        if !self.daylight.is_dark(observer, now).await? {
            info!("ISS is overhead but it is daytime");
            return Ok(TickOutcome::Daylight);
        }

        if let (Some(cooldown), Some(last)) = (self.config.poll.cooldown(), self.last_notified) {
            if now - last < cooldown {
                info!(last = %last, "skipping notification, cooldown active");
                return Ok(TickOutcome::CoolingDown);
            }
        }

        self.mailer
            .send(&Notification::overhead(observer, now))
            .await?;
        self.last_notified = Some(now);
        info!(recipient = %self.config.email.recipient, "ISS is overhead during darkness, email sent");
        Ok(TickOutcome::Notified)
    }

    /// Tick, sleep, repeat until `cancel` fires. Any tick error ends the loop
    /// and is returned; cancellation (even mid-request) returns `Ok(())`.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        let interval = self.config.poll.interval();
        info!(
            observer = %self.config.observer,
            interval_secs = interval.as_secs(),
            tolerance_deg = self.config.poll.tolerance_deg,
            "monitoring started"
        );

        loop {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                res = self.tick(Utc::now()) => res?,
            };
            debug!(%outcome, "tick complete");

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }

        info!("monitoring stopped");
        Ok(())
    }
}
