//! Bin placement from field width.

use crate::GameConfig;
use crate::catalog::{Category, ZoneDef};

/// A bin's catch interval `[left, right)` along the x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetZone {
    pub category: Category,
    pub name: &'static str,
    pub left: f32,
    pub right: f32,
}

impl TargetZone {
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.left && x < self.right
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// Spread `defs` evenly across `field_width`, keeping their order left to right.
/// Each bin is centred on `spacing * (i + 1)` where `spacing = field_width / (n + 1)`.
pub fn layout_zones(defs: &[ZoneDef], field_width: f32, config: &GameConfig) -> Vec<TargetZone> {
    let zone_width = (field_width / config.zone_divisor)
        .min(config.zone_width_max)
        .max(config.zone_width_min);
    let spacing = field_width / (defs.len() as f32 + 1.0);
    defs.iter()
        .enumerate()
        .map(|(i, def)| {
            let left = spacing * (i as f32 + 1.0) - zone_width / 2.0;
            TargetZone {
                category: def.category,
                name: def.name,
                left,
                right: left + zone_width,
            }
        })
        .collect()
}
