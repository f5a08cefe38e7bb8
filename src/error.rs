//! Error kinds. None of these end a session; callers log and discard them.

use crate::drag::PointerId;
use crate::item::ItemId;
use thiserror::Error;

/// Why a pointer capture request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("pointer {0:?} already holds an item")]
    PointerBusy(PointerId),
    #[error("item {0} is not falling")]
    NotFalling(ItemId),
    #[error("item {0} is not active")]
    UnknownItem(ItemId),
    #[error("no item under pointer {0:?}")]
    NothingUnderPointer(PointerId),
    #[error("session is paused")]
    Paused,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max active items must be at least 1")]
    NoCapacity,
    #[error("zone width bounds inverted: min {min} > max {max}")]
    ZoneWidth { min: f32, max: f32 },
    #[error("bottom band height must be positive, got {0}")]
    BandHeight(f32),
    #[error("item size must be positive, got {0}x{1}")]
    ItemSize(f32, f32),
}
