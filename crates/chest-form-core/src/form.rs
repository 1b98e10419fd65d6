//! A chest form: a titled grid of slot items, some of them clickable.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chest_form_nbt::NbtTag;

use crate::error::FormError;
use crate::host::PlayerId;
use crate::item::{encode_slot, SlotItem, CHEST_SLOTS};

/// Slots reserved by every form, whatever its layout.
pub const MAX_SLOTS: usize = CHEST_SLOTS * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChestLayout {
    /// One chest, 27 slots.
    Single,
    /// Two paired chests, 54 slots.
    Double,
}

impl ChestLayout {
    pub fn slot_count(self) -> usize {
        self.block_count() * CHEST_SLOTS
    }

    pub fn block_count(self) -> usize {
        match self {
            ChestLayout::Single => 1,
            ChestLayout::Double => 2,
        }
    }
}

/// Called when a player takes from a clickable slot.
pub trait SlotHandler: Send + Sync {
    fn invoke(&self, player: PlayerId, slot: usize);
}

impl<F> SlotHandler for F
where
    F: Fn(PlayerId, usize) + Send + Sync,
{
    fn invoke(&self, player: PlayerId, slot: usize) {
        self(player, slot)
    }
}

pub struct ChestForm {
    title: String,
    layout: ChestLayout,
    slots: Vec<Option<SlotItem>>,
    handlers: HashMap<usize, Arc<dyn SlotHandler>>,
}

impl ChestForm {
    pub fn new(title: impl Into<String>, layout: ChestLayout) -> Self {
        Self {
            title: title.into(),
            layout,
            slots: vec![None; MAX_SLOTS],
            handlers: HashMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn layout(&self) -> ChestLayout {
        self.layout
    }

    /// Place `item` in `slot`, replacing whatever was there. A `Some`
    /// handler makes the slot clickable; `None` clears any earlier handler.
    pub fn set_slot(
        &mut self,
        slot: usize,
        item: SlotItem,
        handler: Option<Arc<dyn SlotHandler>>,
    ) -> Result<(), FormError> {
        let size = self.layout.slot_count();
        if slot >= size {
            return Err(FormError::SlotOutOfRange { slot, size });
        }
        self.slots[slot] = (!item.is_empty()).then_some(item);
        match handler {
            Some(handler) => {
                self.handlers.insert(slot, handler);
            }
            None => {
                self.handlers.remove(&slot);
            }
        }
        Ok(())
    }

    /// Shorthand for [`set_slot`](Self::set_slot) with a closure handler.
    pub fn set_button<F>(&mut self, slot: usize, item: SlotItem, handler: F) -> Result<(), FormError>
    where
        F: Fn(PlayerId, usize) + Send + Sync + 'static,
    {
        self.set_slot(slot, item, Some(Arc::new(handler) as Arc<dyn SlotHandler>))
    }

    /// Put `item` in every reserved slot and drop all handlers.
    pub fn fill_all(&mut self, item: SlotItem) {
        let content = (!item.is_empty()).then_some(item);
        self.slots.iter_mut().for_each(|s| *s = content.clone());
        self.handlers.clear();
    }

    pub fn slot(&self, slot: usize) -> Option<&SlotItem> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn handler(&self, slot: usize) -> Option<Arc<dyn SlotHandler>> {
        self.handlers.get(&slot).cloned()
    }

    pub fn has_handler(&self, slot: usize) -> bool {
        self.handlers.contains_key(&slot)
    }

    /// `Items` list for the chest block at `block` (0 or 1): 27 entries,
    /// empty compounds for empty slots.
    pub fn block_items(&self, block: usize) -> Vec<NbtTag> {
        let start = block * CHEST_SLOTS;
        let end = (start + CHEST_SLOTS).min(self.slots.len());
        (start..end)
            .map(|raw| NbtTag::Compound(encode_slot(self.slots[raw].as_ref(), raw)))
            .collect()
    }
}

impl fmt::Debug for ChestForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clickable: Vec<_> = self.handlers.keys().copied().collect();
        clickable.sort_unstable();
        f.debug_struct("ChestForm")
            .field("title", &self.title)
            .field("layout", &self.layout)
            .field("filled", &self.slots.iter().filter(|s| s.is_some()).count())
            .field("clickable", &clickable)
            .finish()
    }
}
