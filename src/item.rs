//! Active items and their fall simulation.

use crate::catalog::{Category, ItemTemplate};
use crate::error::CaptureError;
use crate::FALL_UNITS_PER_SEC;
use std::fmt;
use std::time::Instant;

/// Unique per spawn, even for two spawns of the same template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Falling → (Dragging → Falling)* → Resolved. Resolved is terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lifecycle {
    /// Integrating from `last_update`.
    Falling { last_update: Instant },
    /// Position is driven by a pointer.
    Dragging,
    Resolved,
}

/// Terminal condition reached by the fall integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landed {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct ActiveItem {
    pub id: ItemId,
    pub template: &'static ItemTemplate,
    /// Template speed times the difficulty multiplier.
    pub speed: f32,
    /// Top-left corner in logical units.
    pub x: f32,
    pub y: f32,
    pub state: Lifecycle,
}

impl ActiveItem {
    pub fn new(
        id: ItemId,
        template: &'static ItemTemplate,
        multiplier: f32,
        x: f32,
        y: f32,
        now: Instant,
    ) -> Self {
        Self {
            id,
            template,
            speed: template.speed * multiplier,
            x,
            y,
            state: Lifecycle::Falling { last_update: now },
        }
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.template.category
    }

    #[inline]
    pub fn points(&self) -> i64 {
        self.template.points
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        matches!(self.state, Lifecycle::Falling { .. })
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state == Lifecycle::Dragging
    }

    /// Advance by the real time since the last update. Returns the landing position once the
    /// top edge passes `floor` (field height minus item height); only Falling items move.
    pub fn advance(&mut self, now: Instant, floor: f32) -> Option<Landed> {
        let Lifecycle::Falling { last_update } = self.state else {
            return None;
        };
        let dt = now.saturating_duration_since(last_update).as_secs_f32();
        self.state = Lifecycle::Falling { last_update: now };
        self.y += self.speed * dt * FALL_UNITS_PER_SEC;
        (self.y > floor).then_some(Landed {
            x: self.x,
            y: self.y,
        })
    }

    pub fn begin_drag(&mut self) -> Result<(), CaptureError> {
        if !self.is_falling() {
            return Err(CaptureError::NotFalling(self.id));
        }
        self.state = Lifecycle::Dragging;
        Ok(())
    }

    /// Back to Falling with the clock restarted at `now`, so time spent held is not integrated.
    pub fn resume_fall(&mut self, now: Instant) {
        if self.is_dragging() {
            self.state = Lifecycle::Falling { last_update: now };
        }
    }

    /// Restart the fall clock without changing state (pause/resume).
    pub fn rebase(&mut self, now: Instant) {
        if self.is_falling() {
            self.state = Lifecycle::Falling { last_update: now };
        }
    }

    /// Returns false if already resolved.
    pub fn mark_resolved(&mut self) -> bool {
        if self.state == Lifecycle::Resolved {
            return false;
        }
        self.state = Lifecycle::Resolved;
        true
    }

    #[inline]
    pub fn center_x(&self, width: f32) -> f32 {
        self.x + width / 2.0
    }

    #[inline]
    pub fn bottom(&self, height: f32) -> f32 {
        self.y + height
    }

    #[inline]
    pub fn contains(&self, px: f32, py: f32, width: f32, height: f32) -> bool {
        px >= self.x && px < self.x + width && py >= self.y && py < self.y + height
    }
}
