//! Enchantment name → protocol id table used when encoding item `ench` lists.

/// A known enchantment and its numeric protocol id.
#[derive(Debug, Clone, Copy)]
pub struct EnchantmentInfo {
    pub id: i16,
    pub name: &'static str,
}

const fn ench(id: i16, name: &'static str) -> EnchantmentInfo {
    EnchantmentInfo { id, name }
}

/// All enchantments the client understands, indexed by id.
pub const ENCHANTMENT_LIST: &[EnchantmentInfo] = &[
    ench(0, "protection"),
    ench(1, "fire_protection"),
    ench(2, "feather_falling"),
    ench(3, "blast_protection"),
    ench(4, "projectile_protection"),
    ench(5, "thorns"),
    ench(6, "respiration"),
    ench(7, "depth_strider"),
    ench(8, "aqua_affinity"),
    ench(9, "sharpness"),
    ench(10, "smite"),
    ench(11, "bane_of_arthropods"),
    ench(12, "knockback"),
    ench(13, "fire_aspect"),
    ench(14, "looting"),
    ench(15, "efficiency"),
    ench(16, "silk_touch"),
    ench(17, "unbreaking"),
    ench(18, "fortune"),
    ench(19, "power"),
    ench(20, "punch"),
    ench(21, "flame"),
    ench(22, "infinity"),
    ench(23, "luck_of_the_sea"),
    ench(24, "lure"),
    ench(25, "frost_walker"),
    ench(26, "mending"),
    ench(27, "curse_of_binding"),
    ench(28, "curse_of_vanishing"),
    ench(29, "impaling"),
    ench(30, "riptide"),
    ench(31, "loyalty"),
    ench(32, "channeling"),
    ench(33, "multishot"),
    ench(34, "piercing"),
    ench(35, "quick_charge"),
    ench(36, "soul_speed"),
    ench(37, "swift_sneak"),
    ench(38, "wind_burst"),
    ench(39, "density"),
    ench(40, "breach"),
    ench(41, "lunge"),
];

/// Look up the protocol id for an enchantment name. A `minecraft:` prefix is
/// accepted. Names missing from the table return `None`.
pub fn enchantment_id(name: &str) -> Option<i16> {
    let name = name.strip_prefix("minecraft:").unwrap_or(name);
    ENCHANTMENT_LIST.iter().find(|e| e.name == name).map(|e| e.id)
}
