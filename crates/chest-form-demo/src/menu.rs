//! The forms the demo shows.

use chest_form_core::{ChestForm, ChestLayout, FormError, PlayerId, SlotItem};
use chest_form_nbt::{NbtCompound, NbtTag};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// A slot handler fired for `player`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub player: PlayerId,
    pub slot: usize,
    pub label: &'static str,
}

/// Slot of the sword in the shop.
pub const SWORD_SLOT: usize = 13;

/// A double-chest shop: a glass border, three buyable items and an exit.
pub fn shop(choices: &UnboundedSender<Choice>) -> Result<ChestForm, FormError> {
    let mut form = ChestForm::new("§l§6Blacksmith", ChestLayout::Double);
    form.fill_all(SlotItem::new("gray_stained_glass_pane").display_name(" "));
    for slot in 10..17 {
        form.set_slot(slot, SlotItem::new("air"), None)?;
    }

    let sword = SlotItem::new("diamond_sword")
        .display_name("§bBlade of Dawn")
        .lore(["§7Price: 40 emeralds"])
        .enchant("sharpness", 5)
        .enchant("unbreaking", 3)
        .enchant("mending", 1);
    form.set_button(SWORD_SLOT, sword, button(choices, "sword"))?;

    let mut unbreakable = NbtCompound::new();
    unbreakable.insert("Unbreakable".into(), NbtTag::Byte(1));
    let pick = SlotItem::new("netherite_pickaxe")
        .display_name("§5Deep Delver")
        .enchant("efficiency", 5)
        .enchant("fortune", 3)
        .extra_tag(unbreakable);
    form.set_button(11, pick, button(choices, "pickaxe"))?;

    let arrows = SlotItem::new("arrow").amount(32).lore(["§7Price: 2 emeralds"]);
    form.set_button(15, arrows, button(choices, "arrows"))?;

    form.set_button(49, SlotItem::new("barrier").display_name("§cLeave"), button(choices, "leave"))?;
    Ok(form)
}

/// A single-chest yes/no prompt.
pub fn confirm(choices: &UnboundedSender<Choice>) -> Result<ChestForm, FormError> {
    let mut form = ChestForm::new("Confirm purchase?", ChestLayout::Single);
    form.set_button(
        11,
        SlotItem::new("lime_wool").display_name("§aYes"),
        button(choices, "yes"),
    )?;
    form.set_button(
        15,
        SlotItem::new("red_wool").display_name("§cNo"),
        button(choices, "no"),
    )?;
    Ok(form)
}

fn button(
    choices: &UnboundedSender<Choice>,
    label: &'static str,
) -> impl Fn(PlayerId, usize) + Send + Sync + 'static {
    let tx = choices.clone();
    move |player, slot| {
        info!("{player} picked {label} (slot {slot})");
        if tx
            .send(Choice {
                player,
                slot,
                label,
            })
            .is_err()
        {
            debug!("Choice {label} from {player} dropped: receiver closed");
        }
    }
}
