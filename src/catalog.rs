//! Static catalog: item templates and bin definitions.

/// Bin category an item belongs to (French sorting rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Recyclables: plastic, metal, cardboard, paper.
    Yellow,
    /// Glass.
    Green,
    /// Organic waste.
    Brown,
    /// Special collection points.
    Collection,
    /// General waste.
    Gray,
}

impl Category {
    #[cfg(test)]
    pub const ALL: [Self; 5] = [
        Self::Yellow,
        Self::Green,
        Self::Brown,
        Self::Collection,
        Self::Gray,
    ];

    /// Short label painted on the bin.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Yellow => "RECYCLABLES",
            Self::Green => "VERRE",
            Self::Brown => "COMPOST",
            Self::Collection => "POINT D'APPORT",
            Self::Gray => "DÉCHETS",
        }
    }

    /// Colour index into `Theme::category`.
    #[inline]
    pub fn color_index(&self) -> usize {
        match self {
            Self::Yellow => 0,
            Self::Green => 1,
            Self::Brown => 2,
            Self::Collection => 3,
            Self::Gray => 4,
        }
    }
}

/// Immutable template every spawned item is stamped from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub category: Category,
    /// Base fall rate, before the difficulty multiplier.
    pub speed: f32,
    pub points: i64,
}

/// Bin definition; horizontal placement comes from `layout::layout_zones`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneDef {
    pub category: Category,
    pub name: &'static str,
}

const fn item(
    key: &'static str,
    name: &'static str,
    category: Category,
    speed: f32,
) -> ItemTemplate {
    ItemTemplate {
        key,
        name,
        category,
        speed,
        points: 1,
    }
}

pub const ITEMS: [ItemTemplate; 27] = [
    item("plastic-bottle", "Bouteille en plastique", Category::Yellow, 1.0),
    item("newspaper", "Journal", Category::Yellow, 0.7),
    item("cardboard-box", "Boîte en carton", Category::Yellow, 0.9),
    item("aluminum-can", "Canette en aluminium", Category::Yellow, 1.1),
    item("yogurt-container", "Pot de yaourt", Category::Yellow, 0.8),
    item("cereal-box", "Boîte de céréales", Category::Yellow, 0.7),
    item("glass-bottle", "Bouteille en verre", Category::Green, 1.5),
    item("glass-jar", "Bocal en verre", Category::Green, 1.3),
    item("wine-bottle", "Bouteille de vin", Category::Green, 1.6),
    item("perfume-bottle", "Flacon de parfum", Category::Green, 1.2),
    item("glass-mirror", "Miroir cassé", Category::Green, 1.4),
    item("banana-peel", "Peau de banane", Category::Brown, 0.8),
    item("apple-core", "Trognon de pomme", Category::Brown, 0.9),
    item("egg-shells", "Coquilles d'œufs", Category::Brown, 0.8),
    item("tea-bag", "Sachet de thé", Category::Brown, 0.7),
    item("used-clothes", "Vêtements usagés", Category::Collection, 0.9),
    item("batteries", "Piles usagées", Category::Collection, 1.1),
    item("ink-cartridge", "Cartouche d'encre", Category::Collection, 1.0),
    item("light-bulb", "Ampoule économique", Category::Collection, 0.8),
    item("cooking-oil", "Huile alimentaire usagée", Category::Collection, 1.3),
    item("electronic-device", "Appareil électronique", Category::Collection, 1.2),
    item("medication", "Médicaments périmés", Category::Collection, 0.9),
    item("diaper", "Couche jetable", Category::Gray, 1.2),
    item("broken-ceramic", "Céramique brisée", Category::Gray, 1.3),
    item("cigarette-butt", "Mégot de cigarette", Category::Gray, 0.8),
    item("dirty-napkin", "Serviette en papier souillée", Category::Gray, 0.9),
    item("styrofoam", "Polystyrène expansé", Category::Gray, 0.7),
];

/// Bins in left-to-right order.
pub const ZONES: [ZoneDef; 5] = [
    ZoneDef {
        category: Category::Yellow,
        name: "Poubelle jaune (recyclables)",
    },
    ZoneDef {
        category: Category::Green,
        name: "Poubelle verte (verre)",
    },
    ZoneDef {
        category: Category::Brown,
        name: "Poubelle marron (déchets organiques)",
    },
    ZoneDef {
        category: Category::Collection,
        name: "Point d'apport (objets spéciaux)",
    },
    ZoneDef {
        category: Category::Gray,
        name: "Poubelle grise (déchets généraux)",
    },
];
