//! Session: field, bins, active items, score. All mutation goes through here.
//!
//! Single-threaded: the frame loop calls [`Session::tick`] and forwards pointer and resize
//! events between ticks, so every item update and every resolution runs to completion
//! before the next one starts.

use crate::catalog::{Category, ZoneDef, ZONES};
use crate::collision::{in_bottom_band, score_delta, zone_at};
use crate::drag::{DragController, Placement, PointerId};
use crate::error::CaptureError;
use crate::item::{ActiveItem, ItemId};
use crate::layout::{layout_zones, TargetZone};
use crate::ledger::{Applied, ScoreLedger};
use crate::spawner::Spawner;
use crate::GameConfig;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info};

/// What ended an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Fell into the bottom unassisted.
    Drop,
    /// Released by a pointer.
    Drag,
}

/// A scored resolution, kept for presentation until drained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub id: ItemId,
    pub name: &'static str,
    pub category: Category,
    pub zone: Option<TargetZone>,
    pub delta: i64,
    pub kind: ResolutionKind,
    pub at: Instant,
}

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    width: f32,
    height: f32,
    zone_defs: &'static [ZoneDef],
    zones: Vec<TargetZone>,
    items: BTreeMap<ItemId, ActiveItem>,
    ledger: ScoreLedger,
    spawner: Spawner,
    drag: DragController,
    resolutions: Vec<Resolution>,
    paused_at: Option<Instant>,
}

impl Session {
    pub fn new(config: GameConfig, width: f32, height: f32, now: Instant) -> Self {
        Self::with_zones(config, &ZONES, width, height, now)
    }

    /// Session with a custom bin set; an empty set is valid and makes every item a miss.
    pub fn with_zones(
        config: GameConfig,
        zone_defs: &'static [ZoneDef],
        width: f32,
        height: f32,
        now: Instant,
    ) -> Self {
        let mut spawner = Spawner::new(config.seed);
        spawner.start(now, &config);
        let zones = layout_zones(zone_defs, width, &config);
        Self {
            config,
            width,
            height,
            zone_defs,
            zones,
            items: BTreeMap::new(),
            ledger: ScoreLedger::new(),
            spawner,
            drag: DragController::new(),
            resolutions: Vec::new(),
            paused_at: None,
        }
    }

    #[inline]
    pub fn score(&self) -> i64 {
        self.ledger.score()
    }

    /// Active items, oldest first (newest drawn on top).
    pub fn active_items(&self) -> impl Iterator<Item = &ActiveItem> {
        self.items.values()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn zones(&self) -> &[TargetZone] {
        &self.zones
    }

    #[inline]
    pub fn field_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Resolutions since the last call.
    pub fn drain_resolutions(&mut self) -> Vec<Resolution> {
        std::mem::take(&mut self.resolutions)
    }

    /// Field size changed: lay the bins out again.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.zones = layout_zones(self.zone_defs, width, &self.config);
        info!(width, height, zones = self.zones.len(), "field resized");
    }

    /// One scheduler pass: fire the spawn timer if due, then advance every Falling item.
    pub fn tick(&mut self, now: Instant) {
        if self.is_paused() {
            return;
        }
        if let Some(item) = self
            .spawner
            .poll(now, self.items.len(), self.width, &self.config)
        {
            self.items.insert(item.id, item);
        }

        let floor = self.height - self.config.item_height;
        let landed: Vec<_> = self
            .items
            .values_mut()
            .filter_map(|item| item.advance(now, floor).map(|at| (item.id, at)))
            .collect();
        for (id, at) in landed {
            self.resolve(id, at.x, at.y, ResolutionKind::Drop, now);
        }
    }

    /// Grab the topmost item under the pointer.
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        pos: (f32, f32),
    ) -> Result<ItemId, CaptureError> {
        let (w, h) = (self.config.item_width, self.config.item_height);
        let id = self
            .items
            .values()
            .rev()
            .find(|item| item.contains(pos.0, pos.1, w, h))
            .map(|item| item.id)
            .ok_or(CaptureError::NothingUnderPointer(pointer))?;
        self.capture(pointer, id, pos).map(|()| id)
    }

    /// Capture `id` for `pointer`; only a Falling item can be taken.
    pub fn capture(
        &mut self,
        pointer: PointerId,
        id: ItemId,
        pos: (f32, f32),
    ) -> Result<(), CaptureError> {
        let result = self.try_capture(pointer, id, pos);
        match &result {
            Ok(()) => debug!(?pointer, %id, "captured"),
            Err(e) => debug!(?pointer, %id, error = %e, "capture rejected"),
        }
        result
    }

    fn try_capture(
        &mut self,
        pointer: PointerId,
        id: ItemId,
        pos: (f32, f32),
    ) -> Result<(), CaptureError> {
        if self.is_paused() {
            return Err(CaptureError::Paused);
        }
        let item = self.items.get_mut(&id).ok_or(CaptureError::UnknownItem(id))?;
        if !item.is_falling() {
            return Err(CaptureError::NotFalling(id));
        }
        self.drag.acquire(pointer, id, pos, (item.x, item.y))?;
        item.begin_drag()
    }

    /// Held item follows the pointer, keeping the grab offset.
    pub fn pointer_move(&mut self, pointer: PointerId, pos: (f32, f32)) {
        if self.is_paused() {
            return;
        }
        let Some(p) = self.drag.move_to(pointer, pos) else {
            return;
        };
        if let Some(item) = self.items.get_mut(&p.item) {
            item.x = p.x;
            item.y = p.y;
        }
    }

    /// Release: resolve over a bin or inside the bottom band, otherwise fall again from here.
    pub fn pointer_up(&mut self, pointer: PointerId, now: Instant) {
        if let Some(p) = self.drag.release(pointer) {
            self.finish_drag(p, now);
        }
    }

    /// Every gesture aborted (focus lost); each held item is released where it was last placed.
    pub fn cancel_gestures(&mut self, now: Instant) {
        for p in self.drag.release_all() {
            self.finish_drag(p, now);
        }
    }

    fn finish_drag(&mut self, p: Placement, now: Instant) {
        let (w, h) = (self.config.item_width, self.config.item_height);
        let Some(item) = self.items.get_mut(&p.item) else {
            debug!(id = %p.item, "released item no longer active");
            return;
        };
        item.x = p.x;
        item.y = p.y;
        if self.paused_at.is_some() {
            // frozen: let go without resolving; the fall clock restarts on resume
            item.resume_fall(now);
            debug!(id = %p.item, "released while paused");
            return;
        }
        let center = item.center_x(w);
        let bottom = item.bottom(h);
        let band = self.config.band_height;
        let over_zone = zone_at(center, bottom, &self.zones, self.height, band).is_some();
        if over_zone || in_bottom_band(bottom, self.height, band) {
            self.resolve(p.item, p.x, p.y, ResolutionKind::Drag, now);
        } else {
            item.resume_fall(now);
            debug!(id = %p.item, x = p.x, y = p.y, "released over open field, falling again");
        }
    }

    /// The single path into Resolved. Unknown ids are ignored; ids already scored are
    /// dropped from the active set without a second delta.
    pub(crate) fn resolve(
        &mut self,
        id: ItemId,
        x: f32,
        y: f32,
        kind: ResolutionKind,
        now: Instant,
    ) {
        let Some(item) = self.items.get_mut(&id) else {
            debug!(%id, "resolution for inactive item ignored");
            return;
        };
        let (w, h) = (self.config.item_width, self.config.item_height);
        let zone = zone_at(
            x + w / 2.0,
            y + h,
            &self.zones,
            self.height,
            self.config.band_height,
        )
        .copied();
        let delta = score_delta(item.category(), zone.map(|z| z.category), item.points());
        match self.ledger.resolve(id, delta) {
            Applied::Duplicate => {
                debug!(%id, "already resolved, removing");
            }
            Applied::Scored(score) => {
                item.mark_resolved();
                info!(
                    %id,
                    item = item.template.key,
                    zone = ?zone.map(|z| z.category),
                    ?kind,
                    delta,
                    score,
                    "resolved"
                );
                self.resolutions.push(Resolution {
                    id,
                    name: item.template.name,
                    category: item.category(),
                    zone,
                    delta,
                    kind,
                    at: now,
                });
            }
        }
        self.items.remove(&id);
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
            info!("paused");
        }
    }

    /// Resume: the spawn deadline moves by the paused time and fall clocks restart at `now`.
    pub fn resume(&mut self, now: Instant) {
        let Some(since) = self.paused_at.take() else {
            return;
        };
        self.spawner.delay_by(now.saturating_duration_since(since));
        for item in self.items.values_mut() {
            item.rebase(now);
        }
        info!("resumed");
    }

    /// Cancel every pending timer and capture and empty the field, then start spawning again.
    pub fn restart(&mut self, now: Instant) {
        self.shutdown();
        self.ledger.clear();
        self.resolutions.clear();
        self.paused_at = None;
        self.spawner.start(now, &self.config);
        info!("restarted");
    }

    /// Stop all scheduled work: no spawn fires, no item updates, no captures remain.
    pub fn shutdown(&mut self) {
        self.spawner.cancel();
        let dropped = self.drag.release_all();
        if !dropped.is_empty() {
            debug!(count = dropped.len(), "captures cancelled");
        }
        self.items.clear();
    }

    #[cfg(test)]
    fn insert(&mut self, item: ActiveItem) {
        self.items.insert(item.id, item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemTemplate, ITEMS};
    use proptest::prelude::*;
    use std::time::Duration;

    // 600x600 field: Yellow [50,150) Green [150,250) Brown [250,350) Collection [350,450) Gray [450,550)
    const W: f32 = 600.0;
    const H: f32 = 600.0;
    const LEFT: PointerId = PointerId(0);

    static HEAVY_GLASS: ItemTemplate = ItemTemplate {
        key: "heavy-glass",
        name: "Heavy glass",
        category: Category::Green,
        speed: 1.0,
        points: 3,
    };

    fn quiet(now: Instant) -> Session {
        let mut s = Session::new(GameConfig::default(), W, H, now);
        s.spawner.cancel();
        s
    }

    fn glass(id: u64, x: f32, y: f32, now: Instant) -> ActiveItem {
        ActiveItem::new(ItemId(id), &HEAVY_GLASS, 1.0, x, y, now)
    }

    #[test]
    fn test_drop_into_matching_bin_scores() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        // center 200 → Green
        s.insert(glass(1, 175.0, 540.0, t0));
        s.tick(t0 + Duration::from_secs(1));
        assert_eq!(s.score(), 3);
        assert_eq!(s.active_count(), 0);
        let r = s.drain_resolutions();
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].kind, ResolutionKind::Drop);
        assert_eq!(r[0].zone.map(|z| z.category), Some(Category::Green));
    }

    #[test]
    fn test_drop_into_wrong_bin_costs() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        // center 100 → Yellow
        s.insert(glass(1, 75.0, 540.0, t0));
        s.tick(t0 + Duration::from_secs(1));
        assert_eq!(s.score(), -3);
    }

    #[test]
    fn test_drop_between_bins_costs() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        // center 20, left of every bin
        s.insert(glass(1, -5.0, 540.0, t0));
        s.tick(t0 + Duration::from_secs(1));
        assert_eq!(s.score(), -3);
        assert_eq!(s.active_count(), 0);
    }

    #[test]
    fn test_no_zones_every_landing_is_miss() {
        let t0 = Instant::now();
        let mut s = Session::with_zones(GameConfig::default(), &[], W, H, t0);
        s.spawner.cancel();
        s.insert(glass(1, 175.0, 540.0, t0));
        s.insert(glass(2, 400.0, 545.0, t0));
        s.tick(t0 + Duration::from_secs(1));
        assert_eq!(s.score(), -6);
        assert!(s.zones().is_empty());
    }

    #[test]
    fn test_repeated_resolution_scores_once() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 175.0, 560.0, t0));
        s.resolve(ItemId(1), 175.0, 560.0, ResolutionKind::Drop, t0);
        s.resolve(ItemId(1), 75.0, 560.0, ResolutionKind::Drag, t0);
        // stale duplicate arriving while a fresh copy is still in the set
        s.insert(glass(1, 75.0, 560.0, t0));
        s.resolve(ItemId(1), 75.0, 560.0, ResolutionKind::Drop, t0);
        assert_eq!(s.score(), 3);
        assert_eq!(s.active_count(), 0);
        assert_eq!(s.drain_resolutions().len(), 1);
    }

    #[test]
    fn test_drag_does_not_advance_fall() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 100.0, 100.0, t0));
        s.pointer_down(LEFT, (110.0, 110.0)).unwrap();
        s.tick(t0 + Duration::from_secs(1));
        s.tick(t0 + Duration::from_secs(2));
        let item = s.active_items().next().unwrap();
        assert_eq!(item.y, 100.0);
        assert!(item.is_dragging());
    }

    #[test]
    fn test_release_in_open_field_resumes_from_release_instant() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 100.0, 100.0, t0));
        s.pointer_down(LEFT, (110.0, 110.0)).unwrap();
        s.pointer_move(LEFT, (310.0, 210.0));
        let release = t0 + Duration::from_secs(3);
        s.pointer_up(LEFT, release);
        assert_eq!(s.score(), 0);
        s.tick(release + Duration::from_secs(1));
        let item = s.active_items().next().unwrap();
        assert!(item.is_falling());
        assert_eq!(item.x, 300.0);
        assert!((item.y - 260.0).abs() < 1e-3, "y = {}", item.y);
    }

    #[test]
    fn test_release_over_bin_resolves() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 100.0, 100.0, t0));
        s.pointer_down(LEFT, (100.0, 100.0)).unwrap();
        // top-left (175, 520): center 200, bottom 570 → Green, inside band
        s.pointer_move(LEFT, (175.0, 520.0));
        s.pointer_up(LEFT, t0);
        assert_eq!(s.score(), 3);
        assert_eq!(s.active_count(), 0);
        assert_eq!(s.drain_resolutions()[0].kind, ResolutionKind::Drag);
    }

    #[test]
    fn test_release_just_above_band_keeps_falling() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 100.0, 100.0, t0));
        s.pointer_down(LEFT, (100.0, 100.0)).unwrap();
        // top 450, bottom 500: over the Green bin but 20 units short of the band
        s.pointer_move(LEFT, (175.0, 450.0));
        s.pointer_up(LEFT, t0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.active_count(), 1);
        assert!(s.active_items().next().unwrap().is_falling());
    }

    #[test]
    fn test_release_in_band_without_bin_is_miss() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 100.0, 100.0, t0));
        s.pointer_down(LEFT, (100.0, 100.0)).unwrap();
        s.pointer_move(LEFT, (560.0, 500.0));
        s.pointer_up(LEFT, t0);
        assert_eq!(s.score(), -3);
        assert_eq!(s.active_count(), 0);
    }

    #[test]
    fn test_cancelled_gestures_release_in_place() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 100.0, 100.0, t0));
        s.insert(glass(2, 300.0, 100.0, t0));
        s.pointer_down(LEFT, (100.0, 100.0)).unwrap();
        s.pointer_down(PointerId(1), (300.0, 100.0)).unwrap();
        // first one is over the Green bin, second stays in open field
        s.pointer_move(LEFT, (175.0, 520.0));
        s.cancel_gestures(t0);
        assert_eq!(s.score(), 3);
        let rest: Vec<_> = s.active_items().collect();
        assert_eq!(rest.len(), 1);
        assert!(rest[0].is_falling());
        assert!(s.drag.is_empty());
    }

    #[test]
    fn test_capture_rules() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 100.0, 100.0, t0));
        s.insert(glass(2, 300.0, 100.0, t0));
        assert_eq!(s.pointer_down(LEFT, (110.0, 110.0)), Ok(ItemId(1)));
        assert_eq!(
            s.pointer_down(LEFT, (310.0, 110.0)),
            Err(CaptureError::PointerBusy(LEFT))
        );
        assert_eq!(
            s.capture(PointerId(1), ItemId(1), (110.0, 110.0)),
            Err(CaptureError::NotFalling(ItemId(1)))
        );
        assert_eq!(
            s.capture(PointerId(1), ItemId(9), (0.0, 0.0)),
            Err(CaptureError::UnknownItem(ItemId(9)))
        );
        assert_eq!(
            s.pointer_down(PointerId(1), (5.0, 5.0)),
            Err(CaptureError::NothingUnderPointer(PointerId(1)))
        );
        // a second gesture can hold another item while the first is held
        assert_eq!(s.pointer_down(PointerId(1), (310.0, 110.0)), Ok(ItemId(2)));
    }

    #[test]
    fn test_held_item_does_not_block_others() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 100.0, 100.0, t0));
        s.insert(glass(2, 300.0, 100.0, t0));
        s.pointer_down(LEFT, (110.0, 110.0)).unwrap();
        s.tick(t0 + Duration::from_secs(1));
        let ys: Vec<_> = s.active_items().map(|i| i.y).collect();
        assert_eq!(ys[0], 100.0);
        assert!((ys[1] - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_spawner_respects_capacity() {
        let t0 = Instant::now();
        let config = GameConfig {
            max_active: 3,
            spawn_base: Duration::from_millis(10),
            spawn_jitter: Duration::ZERO,
            spawn_retry: Duration::from_millis(5),
            seed: Some(11),
            ..GameConfig::default()
        };
        // tall field so nothing lands during the test
        let mut s = Session::new(config, W, 1e9, t0);
        for ms in 0..500 {
            s.tick(t0 + Duration::from_millis(ms));
            assert!(s.active_count() <= 3);
        }
        assert_eq!(s.active_count(), 3);
    }

    #[test]
    fn test_landing_frees_capacity() {
        let t0 = Instant::now();
        let config = GameConfig {
            max_active: 1,
            spawn_base: Duration::from_millis(10),
            spawn_jitter: Duration::ZERO,
            spawn_retry: Duration::from_millis(10),
            seed: Some(12),
            ..GameConfig::default()
        };
        let mut s = Session::new(config, W, 200.0, t0);
        let mut resolved = 0;
        for ms in (0..60_000).step_by(16) {
            s.tick(t0 + Duration::from_millis(ms));
            resolved += s.drain_resolutions().len();
            assert!(s.active_count() <= 1);
        }
        assert!(resolved > 1, "resolved {resolved}");
    }

    #[test]
    fn test_restart_clears_everything() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 175.0, 540.0, t0));
        s.insert(glass(2, 100.0, 100.0, t0));
        s.pointer_down(LEFT, (110.0, 110.0)).unwrap();
        s.tick(t0 + Duration::from_secs(1));
        assert_eq!(s.score(), 3);
        s.restart(t0 + Duration::from_secs(1));
        assert_eq!(s.score(), 0);
        assert_eq!(s.active_count(), 0);
        assert!(s.drag.is_empty());
        assert!(!s.ledger.is_resolved(ItemId(1)));
        assert!(s.spawner.next_at().is_some());
        // release after restart refers to nothing
        s.pointer_up(LEFT, t0 + Duration::from_secs(2));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_shutdown_stops_all_work() {
        let t0 = Instant::now();
        let mut s = Session::new(GameConfig::default(), W, H, t0);
        s.insert(glass(1, 175.0, 540.0, t0));
        s.shutdown();
        s.tick(t0 + Duration::from_secs(60));
        assert_eq!(s.active_count(), 0);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_pause_freezes_fall_and_spawns() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 100.0, 100.0, t0));
        s.pause(t0);
        s.tick(t0 + Duration::from_secs(5));
        assert_eq!(s.active_items().next().unwrap().y, 100.0);
        assert!(s.pointer_down(LEFT, (110.0, 110.0)).is_err());
        let back = t0 + Duration::from_secs(5);
        s.resume(back);
        s.tick(back + Duration::from_secs(1));
        assert!((s.active_items().next().unwrap().y - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_pause_freezes_held_item() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        s.insert(glass(1, 100.0, 100.0, t0));
        s.pointer_down(LEFT, (100.0, 100.0)).unwrap();
        s.pause(t0);
        // over the Green bin inside the band, but the field is frozen
        s.pointer_move(LEFT, (175.0, 520.0));
        s.pointer_up(LEFT, t0 + Duration::from_secs(1));
        assert_eq!(s.score(), 0);
        assert_eq!(s.active_count(), 1);
        assert!(s.drain_resolutions().is_empty());
        let item = s.active_items().next().unwrap();
        assert_eq!((item.x, item.y), (100.0, 100.0));
        assert!(item.is_falling());
        assert!(s.drag.is_empty());

        let back = t0 + Duration::from_secs(10);
        s.resume(back);
        s.tick(back + Duration::from_secs(1));
        assert!((s.active_items().next().unwrap().y - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_resize_relayouts_zones() {
        let t0 = Instant::now();
        let mut s = quiet(t0);
        let before = s.zones()[0];
        s.resize(1200.0, H);
        assert_ne!(s.zones()[0], before);
        assert_eq!(s.zones()[0].width(), s.config().zone_width_max);
        assert_eq!(s.field_size(), (1200.0, H));
    }

    #[test]
    fn test_catalog_items_spawn_with_unit_points() {
        let t0 = Instant::now();
        let config = GameConfig {
            spawn_base: Duration::ZERO,
            spawn_jitter: Duration::ZERO,
            seed: Some(3),
            ..GameConfig::default()
        };
        let mut s = Session::new(config, W, H, t0);
        s.tick(t0);
        let item = s.active_items().next().unwrap();
        assert!(ITEMS.iter().any(|t| t.key == item.template.key));
        assert_eq!(item.points(), 1);
    }

    proptest! {
        #[test]
        fn prop_active_never_exceeds_cap(
            cap in 1usize..6,
            steps in prop::collection::vec(0u64..400, 1..200),
            seed in any::<u64>(),
        ) {
            let t0 = Instant::now();
            let config = GameConfig {
                max_active: cap,
                spawn_base: Duration::from_millis(1),
                spawn_jitter: Duration::from_millis(3),
                spawn_retry: Duration::from_millis(1),
                seed: Some(seed),
                ..GameConfig::default()
            };
            let mut s = Session::new(config, W, H, t0);
            let mut now = t0;
            for step in steps {
                now += Duration::from_millis(step);
                s.tick(now);
                prop_assert!(s.active_count() <= cap);
            }
        }

        #[test]
        fn prop_each_item_scored_at_most_once(
            events in prop::collection::vec((0u64..4, 0.0f32..600.0, 400.0f32..600.0), 1..50),
        ) {
            let t0 = Instant::now();
            let mut s = quiet(t0);
            for id in 0..4 {
                s.insert(glass(id, 0.0, 0.0, t0));
            }
            for (id, x, y) in events {
                s.resolve(ItemId(id), x, y, ResolutionKind::Drop, t0);
            }
            let deltas: i64 = s.drain_resolutions().iter().map(|r| r.delta).sum();
            prop_assert!(s.ledger.resolved_count() <= 4);
            prop_assert_eq!(s.score(), deltas);
        }
    }
}
