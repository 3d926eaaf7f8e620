use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::list::LoadOutcome;
use crate::backend::{BackendClient, Resource, fetch_json};
use crate::config::CounterSettings;
use crate::models::DashboardStats;
use crate::ui::{CounterDisplay, Ui};

pub const STATS_PATH: &str = "/api/dashboard/stats";
pub const CARD_STAGGER: Duration = Duration::from_millis(100);

pub fn counter_id(key: &str) -> String {
    format!("count-{}", key)
}

pub struct DashboardController {
    client: Arc<dyn BackendClient>,
    resource: Resource,
    settings: CounterSettings,
}

impl DashboardController {
    pub fn new(client: Arc<dyn BackendClient>, settings: CounterSettings) -> Self {
        Self::with_resource(client, Resource::new(STATS_PATH), settings)
    }

    pub fn with_resource(client: Arc<dyn BackendClient>, resource: Resource, settings: CounterSettings) -> Self {
        Self {
            client,
            resource,
            settings,
        }
    }

    /// Fetches the aggregate counts once and hands each present counter its animation.
    pub async fn load(&self, ui: &mut dyn Ui) -> LoadOutcome {
        let present: Vec<&str> = DashboardStats::KEYS
            .into_iter()
            .filter(|key| ui.has_element(&counter_id(key)))
            .collect();
        if present.is_empty() {
            debug!("no counters on page, skipping stats load");
            return LoadOutcome::Skipped;
        }

        match fetch_json::<Option<DashboardStats>>(self.client.as_ref(), self.resource.collection()).await {
            Ok(stats) => {
                let stats = stats.unwrap_or_default();
                let mut shown = 0;
                for (key, value) in stats.counters() {
                    if present.contains(&key) {
                        ui.show_counter(&counter_id(key), counter_display(value, self.settings));
                        shown += 1;
                    }
                }
                LoadOutcome::Rendered(shown)
            }
            Err(e) => {
                warn!("failed to load dashboard stats: {}", e);
                LoadOutcome::Failed
            }
        }
    }
}

/// Entrance animation for `count` cards. Purely cosmetic.
pub fn animate_cards(ui: &mut dyn Ui, count: usize) {
    ui.stagger_cards(card_delays(count));
}

pub fn card_delays(count: usize) -> Vec<Duration> {
    (1..=count as u32).map(|i| CARD_STAGGER * i).collect()
}

pub fn counter_display(target: u64, settings: CounterSettings) -> CounterDisplay {
    if target == 0 {
        return CounterDisplay::Immediate(0);
    }
    CounterDisplay::Animated {
        target,
        interval: settings.frame,
        frames: counter_frames(target, settings),
    }
}

/// Values shown at each frame tick; the last one is always `target`.
pub fn counter_frames(target: u64, settings: CounterSettings) -> Vec<u64> {
    let frame_ms = settings.frame.as_millis().max(1);
    let steps = (settings.duration.as_millis() / frame_ms).max(1);
    (1..=steps)
        .map(|step| (u128::from(target) * step / steps) as u64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(duration: u64, frame: u64) -> CounterSettings {
        CounterSettings {
            duration: Duration::from_millis(duration),
            frame: Duration::from_millis(frame),
        }
    }

    #[test]
    fn frames_climb_to_target() {
        let frames = counter_frames(120, settings(1000, 100));
        assert_eq!(frames.len(), 10);
        assert_eq!(frames.first(), Some(&12));
        assert_eq!(frames.last(), Some(&120));
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn small_targets_still_end_exactly() {
        let frames = counter_frames(3, CounterSettings::default());
        assert_eq!(frames.len(), 62);
        assert_eq!(frames.last(), Some(&3));
        assert_eq!(frames[0], 0);
    }

    #[test]
    fn frame_longer_than_duration_is_one_step() {
        assert_eq!(counter_frames(9, settings(10, 50)), vec![9]);
    }

    #[test]
    fn zero_is_immediate() {
        assert_eq!(counter_display(0, CounterSettings::default()), CounterDisplay::Immediate(0));
    }

    #[test]
    fn cards_are_staggered() {
        assert_eq!(
            card_delays(3),
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(300)
            ]
        );
    }
}
