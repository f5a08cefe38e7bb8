//! Throttled item spawning with backpressure.

use crate::catalog::{ItemTemplate, ITEMS};
use crate::item::{ActiveItem, ItemId};
use crate::{GameConfig, SPAWN_Y};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::debug;

/// Spawn timer. Fires are polled from the frame loop; `None` deadline means stopped.
#[derive(Debug)]
pub struct Spawner {
    rng: StdRng,
    templates: &'static [ItemTemplate],
    next_at: Option<Instant>,
    next_id: u64,
}

impl Spawner {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_templates(seed, &ITEMS)
    }

    pub fn with_templates(seed: Option<u64>, templates: &'static [ItemTemplate]) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self {
            rng: StdRng::seed_from_u64(seed),
            templates,
            next_at: None,
            next_id: 1,
        }
    }

    /// Arm the timer for the first spawn.
    pub fn start(&mut self, now: Instant, config: &GameConfig) {
        let delay = self.spawn_delay(config);
        self.next_at = Some(now + delay);
    }

    /// Drop any pending fire.
    pub fn cancel(&mut self) {
        self.next_at = None;
    }

    #[cfg(test)]
    pub fn next_at(&self) -> Option<Instant> {
        self.next_at
    }

    /// Push the pending deadline back by `by` (time spent paused).
    pub fn delay_by(&mut self, by: Duration) {
        if let Some(at) = self.next_at.as_mut() {
            *at += by;
        }
    }

    /// Fire if due. At capacity, re-arm for `spawn_retry` and create nothing.
    pub fn poll(
        &mut self,
        now: Instant,
        active: usize,
        field_width: f32,
        config: &GameConfig,
    ) -> Option<ActiveItem> {
        let due = self.next_at?;
        if now < due {
            return None;
        }
        if active >= config.max_active {
            debug!(active, max = config.max_active, "field full, retrying spawn");
            self.next_at = Some(now + config.spawn_retry);
            return None;
        }
        let item = self.instantiate(now, field_width, config);
        let delay = self.spawn_delay(config);
        self.next_at = Some(now + delay);
        item
    }

    fn instantiate(
        &mut self,
        now: Instant,
        field_width: f32,
        config: &GameConfig,
    ) -> Option<ActiveItem> {
        if self.templates.is_empty() {
            return None;
        }
        let template = &self.templates[self.rng.random_range(0..self.templates.len())];
        let max_x = (field_width - config.item_width).max(0.0);
        let x = self.rng.random_range(0.0..=max_x);
        let id = ItemId(self.next_id);
        self.next_id += 1;
        debug!(%id, item = template.key, x, "spawned");
        Some(ActiveItem::new(
            id,
            template,
            config.difficulty.multiplier(),
            x,
            SPAWN_Y,
            now,
        ))
    }

    /// `U(0, jitter) + base / difficulty`.
    fn spawn_delay(&mut self, config: &GameConfig) -> Duration {
        let jitter_ms = config.spawn_jitter.as_millis() as u64;
        let jitter = Duration::from_millis(self.rng.random_range(0..=jitter_ms));
        jitter + config.spawn_base.div_f32(config.difficulty.multiplier())
    }
}
