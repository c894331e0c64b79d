//! Static game-data tables: the Season 5 unit roster, synergy activation
//! thresholds, league-slot allow-lists and equipment recommendations.
//! Loaded once at startup as immutable data; nothing in here is mutated.

/// A placeable unit. `traits[0]` is always the faction trait, the rest are
/// role traits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit {
    pub id: &'static str,
    pub name: &'static str,
    /// Gold cost tier, 1..=5.
    pub cost: u8,
    pub traits: &'static [&'static str],
    pub img: &'static str,
}

/// An equipment recommendation shown in the unit detail view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipRec {
    pub name: &'static str,
    pub icon: &'static str,
    pub desc: &'static str,
}

macro_rules! unit {
    ($id:literal, $name:literal, $cost:literal, [$($t:literal),+]) => {
        unit!($id, $name, $cost, [$($t),+], seed = $name)
    };
    ($id:literal, $name:literal, $cost:literal, [$($t:literal),+], seed = $seed:literal) => {
        Unit {
            id: $id,
            name: $name,
            cost: $cost,
            traits: &[$($t),+],
            img: concat!("https://api.dicebear.com/7.x/adventurer/svg?seed=", $seed),
        }
    };
}

pub static UNITS: &[Unit] = &[
    // K.O.F
    unit!("chou", "Chou", 5, ["K.O.F", "Mortal Rival", "Bruiser"]),
    unit!("paquito", "Paquito", 4, ["K.O.F", "Defender"]),
    unit!("dyrroth", "Dyrroth", 2, ["K.O.F", "Dauntless"]),
    unit!("aurora", "Aurora", 1, ["K.O.F", "Stargazer"]),
    unit!("gusion", "Gusion", 4, ["K.O.F", "Swiftblade"]),
    unit!("valir", "Valir", 5, ["K.O.F", "Mortal Rival", "Mage"]),
    unit!("karina", "Karina", 3, ["K.O.F", "Scavenger"]),
    // Soul Vessels
    unit!("gloo", "Gloo", 3, ["Soul Vessels", "Dauntless"]),
    unit!("benedetta", "Benedetta", 5, ["Soul Vessels", "Weapon Master"]),
    unit!("hanabi", "Hanabi", 4, ["Soul Vessels", "Marksman"]),
    unit!("aamon", "Aamon", 2, ["Soul Vessels", "Swiftblade"]),
    unit!("cecilion", "Cecilion", 1, ["Soul Vessels", "Mage"]),
    unit!("clint", "Clint", 2, ["Soul Vessels", "Phasewarper"]),
    // Heartbond
    unit!("khufra", "Khufra", 3, ["Heartbond", "Defender"]),
    unit!("esmeralda", "Esmeralda", 4, ["Heartbond", "Dauntless"]),
    unit!("alucard", "Alucard", 1, ["Heartbond", "Weapon Master"]),
    unit!("miya", "Miya", 3, ["Heartbond", "Marksman"]),
    unit!("odette", "Odette", 2, ["Heartbond", "Stargazer"]),
    unit!("lancelot", "Lancelot", 5, ["Heartbond", "Phasewarper"]),
    unit!("masha", "Masha", 3, ["Heartbond", "Bruiser"]),
    // Luminexus
    unit!("cici", "Cici", 2, ["Luminexus", "Weapon Master"]),
    unit!("rafaela", "Rafaela", 5, ["Luminexus", "Stargazer"]),
    unit!("nolan", "Nolan", 1, ["Luminexus", "Swiftblade"]),
    unit!("valentina", "Valentina", 4, ["Luminexus", "Mage"]),
    unit!("floryn", "Floryn", 4, ["Luminexus", "Scavenger"]),
    // Exorcist
    unit!("yuzhong", "Yu Zhong", 4, ["Exorcist", "Bruiser"], seed = "YuZhong"),
    unit!("ruby", "Ruby", 5, ["Exorcist", "Dauntless"]),
    unit!("granger", "Granger", 2, ["Exorcist", "Marksman"]),
    unit!("saber", "Saber", 3, ["Exorcist", "Swiftblade"]),
    unit!("hayabusa", "Hayabusa", 4, ["Exorcist", "Phasewarper"]),
    unit!("phoveus", "Phoveus", 1, ["Exorcist", "Scavenger"]),
    unit!("pharsa", "Pharsa", 4, ["Exorcist", "Stargazer"]),
    // Neobeasts
    unit!("gatotkaca", "Gatotkaca", 2, ["Neobeasts", "Bruiser", "Defender"]),
    unit!("fredrinn", "Fredrinn", 3, ["Neobeasts", "Weapon Master"]),
    unit!("brody", "Brody", 1, ["Neobeasts", "Marksman"]),
    unit!("ling", "Ling", 5, ["Neobeasts", "Swiftblade"]),
    unit!("lylia", "Lylia", 2, ["Neobeasts", "Mage"]),
    unit!("cyclops", "Cyclops", 4, ["Neobeasts", "Stargazer"]),
    // Toy Mischief
    unit!("jawhead", "Jawhead", 1, ["Toy Mischief", "Bruiser"]),
    unit!("uranus", "Uranus", 2, ["Toy Mischief", "Defender"]),
    unit!("barats", "Barats", 4, ["Toy Mischief", "Dauntless"]),
    unit!("aulus", "Aulus", 3, ["Toy Mischief", "Weapon Master"]),
    unit!("cyclops2", "Cyclops", 4, ["Toy Mischief", "Stargazer"], seed = "Cyclops2"),
    unit!("harith", "Harith", 3, ["Toy Mischief", "Mage"]),
    // Glory League
    unit!("aldous", "Aldous", 2, ["Glory League", "Bruiser"]),
    unit!("minotaur", "Minotaur", 3, ["Glory League", "Defender"]),
    unit!("roger", "Roger", 4, ["Glory League", "Weapon Master"]),
    unit!("beatrix", "Beatrix", 2, ["Glory League", "Marksman"]),
    // Mystic Meow
    unit!("lesley", "Lesley", 5, ["Mystic Meow", "Marksman"]),
    unit!("silvanna", "Silvanna", 1, ["Mystic Meow", "Dauntless"]),
    unit!("julian", "Julian", 3, ["Mystic Meow", "Mage", "Phasewarper"]),
    unit!("edith", "Edith", 5, ["Mystic Meow", "Defender"]),
    // Beyond The Clouds
    unit!("xavier", "Xavier", 3, ["Beyond The Clouds", "Stargazer"]),
    unit!("natalia", "Natalia", 2, ["Beyond The Clouds", "Swiftblade"]),
];

pub fn unit_by_id(id: &str) -> Option<&'static Unit> {
    UNITS.iter().find(|u| u.id == id)
}

/// Activation tiers per trait, ascending. Unknown traits fall back to the
/// common `[2, 4]` ladder.
pub fn thresholds(trait_name: &str) -> &'static [u32] {
    match trait_name {
        "K.O.F" => &[2, 4, 6, 8, 10],
        "Mortal Rival" => &[2],
        "Soul Vessels" | "Heartbond" | "Luminexus" | "Exorcist" | "Neobeasts" | "Toy Mischief"
        | "Mage" => &[2, 4, 6],
        _ => &[2, 4],
    }
}

/// Returns the catalog's canonical `'static` spelling of a trait name, or
/// `None` if the trait exists nowhere in the roster. This doubles as the
/// whitelist the codec checks decoded blessing names against.
pub fn canonical_trait(name: &str) -> Option<&'static str> {
    UNITS
        .iter()
        .flat_map(|u| u.traits.iter())
        .copied()
        .find(|t| *t == name)
}

/// Units eligible for the 1-cost league slot.
pub static LEAGUE_SMALL_IDS: &[&str] = &["aurora", "silvanna", "cecilion", "phoveus", "nolan"];
/// Units eligible for the 5-cost league slot.
pub static LEAGUE_LARGE_IDS: &[&str] = &["rafaela", "ruby", "ling", "lancelot"];

/// The virtual trait credited by the league slots.
pub const LEAGUE_TRAIT: &str = "Glory League";

/// The rival pair activates as an exclusive-or; with both present the trait
/// only turns on once the gate trait reaches the gate count.
pub const RIVAL_PAIR: [&str; 2] = ["chou", "valir"];
pub const RIVAL_TRAIT: &str = "Mortal Rival";
pub const RIVAL_GATE_TRAIT: &str = "K.O.F";
pub const RIVAL_GATE_COUNT: u32 = 11;

struct EquipItem {
    name: &'static str,
    icon: &'static str,
    desc: &'static str,
}

static EQUIP_POOL: &[EquipItem] = &[
    EquipItem { name: "Immortality", icon: "🛡️", desc: "Revive once with 15% HP" },
    EquipItem { name: "Antique Cuirass", icon: "🪖", desc: "-6% ATK on hit (stacks 3×)" },
    EquipItem { name: "Cursed Helmet", icon: "⛑️", desc: "Magic damage to nearby enemies" },
    EquipItem { name: "Warrior Boots", icon: "👢", desc: "+22 Physical Defense, +40 Move Spd" },
    EquipItem { name: "Holy Crystal", icon: "🔮", desc: "+100 Magic Power (scales with HP)" },
    EquipItem { name: "Glowing Wand", icon: "✨", desc: "Burn: 1% HP magic dmg per sec (3s)" },
    EquipItem { name: "Lightning Truncheon", icon: "⚡", desc: "Lightning bounces for AoE magic dmg" },
    EquipItem { name: "Concentrated Energy", icon: "💠", desc: "+70 Mag Power + life steal 25%" },
    EquipItem { name: "Berserker's Fury", icon: "🗡️", desc: "+65% Crit Dmg on Crit hit" },
    EquipItem { name: "Wind of Nature", icon: "🍃", desc: "2s physical immune active" },
    EquipItem { name: "Scarlet Phantom", icon: "🏹", desc: "+30% AS, +20% Crit Chance" },
    EquipItem { name: "Demon Hunter Sword", icon: "⚔️", desc: "8% current HP as bonus dmg" },
    EquipItem { name: "Endless Battle", icon: "🔥", desc: "True Dmg after skill use" },
    EquipItem { name: "Bloodlust Axe", icon: "🩸", desc: "+20% Spell Vamp" },
    EquipItem { name: "Hunter Strike", icon: "💢", desc: "-10% Cooldown, chase slow on hit" },
    EquipItem { name: "Blade of Despair", icon: "🌑", desc: "+160 Phys Atk vs low-HP enemies" },
    EquipItem { name: "Malefic Roar", icon: "💀", desc: "+60% Phys Penetration" },
    EquipItem { name: "Haa's Claws", icon: "🦅", desc: "+70 Phys Atk, +20% Physical Lifesteal" },
    EquipItem { name: "Oracle", icon: "🌙", desc: "+42 Magic Def, boosts shields & regen" },
    EquipItem { name: "Necklace of Durance", icon: "📿", desc: "Reduces enemy regen by 50%" },
    EquipItem { name: "Fleeting Time", icon: "⏳", desc: "-30% Ult CDR on assist/kill" },
    EquipItem { name: "Dominance Ice", icon: "🧊", desc: "-10% AS & move spd to nearby enemies" },
    EquipItem { name: "Brute Force Breastplate", icon: "🔵", desc: "Move Spd +2% per skill/basic (5 stacks)" },
    EquipItem { name: "Blade of Heptaseas", icon: "🌀", desc: "+70 Phys Atk burst on first hit" },
    EquipItem { name: "Calamity Reaper", icon: "🌪️", desc: "True Dmg next basic after skill" },
];

fn equip_picks(trait_name: &str) -> Option<[&'static str; 3]> {
    let picks = match trait_name {
        "Bruiser" => ["Immortality", "Antique Cuirass", "Cursed Helmet"],
        "Defender" => ["Dominance Ice", "Antique Cuirass", "Brute Force Breastplate"],
        "Dauntless" => ["Immortality", "Warrior Boots", "Cursed Helmet"],
        "Weapon Master" => ["Endless Battle", "Bloodlust Axe", "Hunter Strike"],
        "Marksman" => ["Berserker's Fury", "Scarlet Phantom", "Wind of Nature"],
        "Mage" => ["Holy Crystal", "Glowing Wand", "Lightning Truncheon"],
        "Swiftblade" => ["Blade of Despair", "Malefic Roar", "Haa's Claws"],
        "Phasewarper" => ["Blade of Heptaseas", "Calamity Reaper", "Malefic Roar"],
        "Scavenger" => ["Haa's Claws", "Hunter Strike", "Blade of Despair"],
        "Stargazer" => ["Oracle", "Necklace of Durance", "Fleeting Time"],
        "K.O.F" => ["Endless Battle", "Bloodlust Axe", "Immortality"],
        "Soul Vessels" => ["Holy Crystal", "Concentrated Energy", "Glowing Wand"],
        "Heartbond" => ["Oracle", "Fleeting Time", "Necklace of Durance"],
        "Luminexus" => ["Holy Crystal", "Glowing Wand", "Lightning Truncheon"],
        "Exorcist" => ["Bloodlust Axe", "Hunter Strike", "Blade of Despair"],
        "Neobeasts" => ["Immortality", "Endless Battle", "Antique Cuirass"],
        "Toy Mischief" => ["Calamity Reaper", "Hunter Strike", "Endless Battle"],
        "Glory League" => ["Immortality", "Dominance Ice", "Antique Cuirass"],
        "Mystic Meow" => ["Holy Crystal", "Glowing Wand", "Concentrated Energy"],
        "Beyond The Clouds" => ["Dominance Ice", "Oracle", "Antique Cuirass"],
        "Mortal Rival" => ["Blade of Despair", "Malefic Roar", "Haa's Claws"],
        _ => return None,
    };
    Some(picks)
}

fn equip_item(name: &str) -> Option<EquipRec> {
    EQUIP_POOL.iter().find(|e| e.name == name).map(|e| EquipRec {
        name: e.name,
        icon: e.icon,
        desc: e.desc,
    })
}

/// Recommended items for a unit: the first of its traits with a pick list
/// wins; units with no listed trait get a generic core triple.
pub fn equip_recs(traits: &[&str]) -> Vec<EquipRec> {
    let picks = traits
        .iter()
        .find_map(|t| equip_picks(t))
        .unwrap_or(["Immortality", "Endless Battle", "Holy Crystal"]);
    picks.iter().filter_map(|name| equip_item(name)).collect()
}
