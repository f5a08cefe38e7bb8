//! Pointer capture: one item per pointer, grab offset preserved while moving.

use crate::error::CaptureError;
use crate::item::ItemId;
use std::collections::HashMap;

/// One concurrent gesture (a mouse button, a touch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capture {
    pub item: ItemId,
    /// Pointer position minus item top-left at grab time.
    pub offset: (f32, f32),
    /// Last item position written by this capture.
    pub last: (f32, f32),
}

/// Item position to apply, or the final position on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub item: ItemId,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Default)]
pub struct DragController {
    captures: HashMap<PointerId, Capture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take `item` for `pointer`. The caller has already checked the item is Falling.
    pub fn acquire(
        &mut self,
        pointer: PointerId,
        item: ItemId,
        pointer_pos: (f32, f32),
        item_pos: (f32, f32),
    ) -> Result<(), CaptureError> {
        if self.captures.contains_key(&pointer) {
            return Err(CaptureError::PointerBusy(pointer));
        }
        if self.holder_of(item).is_some() {
            return Err(CaptureError::NotFalling(item));
        }
        self.captures.insert(
            pointer,
            Capture {
                item,
                offset: (pointer_pos.0 - item_pos.0, pointer_pos.1 - item_pos.1),
                last: item_pos,
            },
        );
        Ok(())
    }

    /// New item position for a pointer move, `None` if this pointer holds nothing.
    pub fn move_to(&mut self, pointer: PointerId, pointer_pos: (f32, f32)) -> Option<Placement> {
        let cap = self.captures.get_mut(&pointer)?;
        cap.last = (pointer_pos.0 - cap.offset.0, pointer_pos.1 - cap.offset.1);
        Some(Placement {
            item: cap.item,
            x: cap.last.0,
            y: cap.last.1,
        })
    }

    /// End the gesture; yields the last known item position.
    pub fn release(&mut self, pointer: PointerId) -> Option<Placement> {
        self.captures.remove(&pointer).map(|cap| Placement {
            item: cap.item,
            x: cap.last.0,
            y: cap.last.1,
        })
    }

    /// End every gesture (teardown), yielding each last known position.
    pub fn release_all(&mut self) -> Vec<Placement> {
        self.captures
            .drain()
            .map(|(_, cap)| Placement {
                item: cap.item,
                x: cap.last.0,
                y: cap.last.1,
            })
            .collect()
    }

    pub fn holder_of(&self, item: ItemId) -> Option<PointerId> {
        self.captures
            .iter()
            .find_map(|(p, cap)| (cap.item == item).then_some(*p))
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}
