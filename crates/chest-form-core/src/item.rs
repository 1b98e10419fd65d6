//! Slot contents and their chest NBT encoding.

use chest_form_nbt::{NbtCompound, NbtTag};
use tracing::debug;

use crate::enchantment::enchantment_id;

/// Slots held by a single chest block.
pub const CHEST_SLOTS: usize = 27;

/// Description of an item shown in a form slot.
///
/// Built with chained setters:
///
/// ```
/// use chest_form_core::SlotItem;
///
/// let sword = SlotItem::new("diamond_sword")
///     .display_name("Excalibur")
///     .lore(["Legendary"])
///     .enchant("sharpness", 5);
/// assert_eq!(sword.item_type(), "minecraft:diamond_sword");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SlotItem {
    item_type: String,
    amount: u8,
    data: u16,
    display_name: Option<String>,
    lore: Vec<String>,
    enchants: Vec<(String, i16)>,
    extra_tag: Option<NbtCompound>,
}

impl SlotItem {
    /// A single item of `item_type`. Bare names get the `minecraft:` namespace.
    pub fn new(item_type: impl Into<String>) -> Self {
        let item_type = item_type.into();
        let item_type = if item_type.contains(':') {
            item_type
        } else {
            format!("minecraft:{item_type}")
        };
        Self {
            item_type,
            amount: 1,
            data: 0,
            display_name: None,
            lore: Vec::new(),
            enchants: Vec::new(),
            extra_tag: None,
        }
    }

    pub fn amount(mut self, amount: u8) -> Self {
        self.amount = amount;
        self
    }

    /// Aux value, sent as `Damage`.
    pub fn data(mut self, data: u16) -> Self {
        self.data = data;
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn lore<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lore = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Add an enchantment. Adding the same name again replaces its level.
    pub fn enchant(mut self, name: impl Into<String>, level: i16) -> Self {
        let name = name.into();
        match self.enchants.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = level,
            None => self.enchants.push((name, level)),
        }
        self
    }

    /// Extra user tag entries, merged into `tag` after display and enchantments.
    pub fn extra_tag(mut self, tag: NbtCompound) -> Self {
        self.extra_tag = Some(tag);
        self
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn count(&self) -> u8 {
        self.amount
    }

    pub fn aux(&self) -> u16 {
        self.data
    }

    /// Air, or a stack of nothing. Such a slot is shown as empty.
    pub fn is_empty(&self) -> bool {
        self.amount == 0 || self.item_type == "minecraft:air"
    }

    /// Encode as an entry of a chest `Items` list. `raw_slot` is the form
    /// slot index (0..54); the stored `Slot` is its position within one chest.
    pub fn to_nbt(&self, raw_slot: usize) -> NbtCompound {
        let mut item = NbtCompound::new();
        item.insert("Count".into(), NbtTag::Byte(self.amount as i8));
        item.insert("Damage".into(), NbtTag::Short(self.data as i16));
        item.insert("Name".into(), self.item_type.as_str().into());
        item.insert("WasPickedUp".into(), false.into());
        item.insert("Slot".into(), NbtTag::Byte((raw_slot % CHEST_SLOTS) as i8));

        let tag = self.user_tag();
        if !tag.is_empty() {
            item.insert("tag".into(), NbtTag::Compound(tag));
        }
        item
    }

    fn user_tag(&self) -> NbtCompound {
        let mut tag = NbtCompound::new();

        let mut display = NbtCompound::new();
        if let Some(name) = &self.display_name {
            display.insert("Name".into(), name.as_str().into());
        }
        if !self.lore.is_empty() {
            let lines = self.lore.iter().map(|l| NbtTag::from(l.as_str())).collect::<Vec<_>>();
            display.insert("Lore".into(), lines.into());
        }
        if !display.is_empty() {
            tag.insert("display".into(), NbtTag::Compound(display));
        }

        if !self.enchants.is_empty() {
            let mut list = Vec::with_capacity(self.enchants.len());
            for (name, level) in &self.enchants {
                let Some(id) = enchantment_id(name) else {
                    debug!("Dropping unknown enchantment {name} on {}", self.item_type);
                    continue;
                };
                let mut entry = NbtCompound::new();
                entry.insert("id".into(), NbtTag::Short(id));
                entry.insert("lvl".into(), NbtTag::Short(*level));
                list.push(NbtTag::Compound(entry));
            }
            tag.insert("ench".into(), list.into());
        }

        if let Some(extra) = &self.extra_tag {
            for (key, value) in extra {
                tag.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        tag
    }
}

/// Encode a slot for a chest `Items` list. Empty slots become an empty
/// compound so the list keeps one entry per slot.
pub fn encode_slot(content: Option<&SlotItem>, raw_slot: usize) -> NbtCompound {
    match content {
        Some(item) if !item.is_empty() => item.to_nbt(raw_slot),
        _ => NbtCompound::new(),
    }
}
