//! Static catalog of terrain tiles on the master tile sheet.
//!
//! Keys have the form `"<row>X<col>"`. The first number is the row (Y) on the
//! sheet and the second the column (X); the order is reversed relative to the
//! usual X/Y naming and every consumer relies on it, so it stays.

use std::fmt;
use std::str::FromStr;

use crate::config::{SHEET_TILES_X, SHEET_TILES_Y};
use crate::error::SetupError;

// ---------------------------------------------------------------------------
// Catalog data
// ---------------------------------------------------------------------------

/// Every tile usable as terrain: key and the asset path it was cut from.
/// A path containing `"water"` marks the tile as water-class.
pub const TERRAIN_CATALOG: &[(&str, &str)] = &[
    ("5X23", "dungeon/water/deep_water.png"),
    ("5X24", "dungeon/water/shallow_water.png"),
    ("5X25", "dungeon/water/open_sea.png"),
    ("5X26", "dungeon/water/lava_water_edge.png"),
    ("6X20", "dungeon/water/swamp_water.png"),
    ("6X21", "dungeon/water/murky_water.png"),
    ("6X22", "dungeon/water/ice_water.png"),
    ("7X40", "dungeon/water/blood_water.png"),
    ("11X2", "dungeon/floor/sand_1.png"),
    ("11X3", "dungeon/floor/sand_2.png"),
    ("11X4", "dungeon/floor/sand_3.png"),
    ("12X8", "dungeon/floor/grass/grass_0_old.png"),
    ("12X9", "dungeon/floor/grass/grass_1_old.png"),
    ("12X10", "dungeon/floor/grass/grass_2_old.png"),
    ("13X0", "dungeon/floor/grass/grass_flowers_blue_1.png"),
    ("13X1", "dungeon/floor/grass/grass_flowers_red_1.png"),
    ("13X5", "dungeon/floor/grass/grass_full.png"),
    ("14X12", "dungeon/floor/dirt_0_new.png"),
    ("14X13", "dungeon/floor/dirt_1_new.png"),
    ("14X14", "dungeon/floor/dirt_2_new.png"),
    ("15X30", "dungeon/floor/pebble_brown_0_new.png"),
    ("15X31", "dungeon/floor/pebble_brown_1_new.png"),
    ("16X6", "dungeon/floor/mud_0.png"),
    ("16X7", "dungeon/floor/mud_1.png"),
    ("17X44", "dungeon/floor/limestone_0.png"),
    ("17X45", "dungeon/floor/limestone_1.png"),
    ("18X16", "dungeon/floor/rough_red_0.png"),
    ("18X17", "dungeon/floor/rough_red_1.png"),
    ("19X50", "dungeon/floor/cobble_blood_1_new.png"),
    ("20X33", "dungeon/floor/snow_0.png"),
    ("20X34", "dungeon/floor/snow_1.png"),
    ("20X35", "dungeon/floor/ice_0.png"),
    ("21X60", "dungeon/floor/volcanic_floor_0.png"),
    ("21X61", "dungeon/floor/volcanic_floor_1.png"),
    ("22X27", "dungeon/wall/stone_2_gray_0.png"),
    ("22X28", "dungeon/wall/stone_dark_0.png"),
    ("23X3", "dungeon/wall/brick_brown_0.png"),
    ("24X18", "dungeon/floor/moss_0.png"),
    ("24X19", "dungeon/floor/moss_1.png"),
    ("30X63", "dungeon/floor/crystal_floor_0.png"),
    ("40X11", "dungeon/floor/marble_floor_1.png"),
    ("94X0", "dungeon/floor/white_marble_0.png"),
];

/// Named six-band palettes, lowest band first.
pub const TERRAIN_PRESETS: &[(&str, [&str; 6])] = &[
    ("lowland", ["5X23", "11X2", "12X8", "13X5", "14X12", "22X27"]),
    ("marsh", ["6X20", "16X6", "16X7", "24X18", "24X19", "12X10"]),
    ("red_desert", ["5X24", "11X3", "11X4", "18X16", "18X17", "15X30"]),
    ("tundra", ["6X22", "20X35", "15X31", "20X33", "20X34", "22X28"]),
    ("volcanic", ["7X40", "18X16", "21X60", "21X61", "22X28", "23X3"]),
    ("meadow", ["5X25", "11X2", "13X0", "13X1", "12X9", "17X44"]),
    ("coastal_highlands", ["5X23", "11X4", "12X8", "14X13", "17X45", "20X33"]),
    ("crystal", ["5X26", "40X11", "30X63", "17X44", "94X0", "19X50"]),
];

/// Preset used when no selection is configured.
pub const DEFAULT_PRESET: &str = "coastal_highlands";

// ---------------------------------------------------------------------------
// TileKey
// ---------------------------------------------------------------------------

/// A parsed `"<row>X<col>"` catalog key, in tile units on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub row: u32,
    pub col: u32,
}

impl TileKey {
    /// Parse and check that the tile lies in the populated part of the sheet.
    pub fn parse_on_sheet(key: &str) -> Result<Self, SetupError> {
        let parsed: TileKey = key.parse()?;
        if parsed.col as usize >= SHEET_TILES_X || parsed.row as usize >= SHEET_TILES_Y {
            return Err(SetupError::TileOutsideSheet {
                key: key.to_string(),
                col: parsed.col,
                row: parsed.row,
            });
        }
        Ok(parsed)
    }
}

impl FromStr for TileKey {
    type Err = SetupError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let malformed = || SetupError::MalformedTileKey(key.to_string());
        let (row, col) = key.split_once('X').ok_or_else(malformed)?;
        let row = row.parse::<u32>().map_err(|_| malformed())?;
        let col = col.parse::<u32>().map_err(|_| malformed())?;
        Ok(TileKey { row, col })
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}X{}", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Whether a catalog path describes a water tile.
#[inline]
pub fn is_water_path(path: &str) -> bool {
    path.contains("water")
}

/// Catalog path for a key, if present.
pub fn catalog_path(key: &str) -> Option<&'static str> {
    TERRAIN_CATALOG
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, path)| *path)
}

/// Split the catalog into water-class and ground-class keys, in catalog order.
pub fn partition_catalog() -> (Vec<&'static str>, Vec<&'static str>) {
    let mut water = Vec::new();
    let mut ground = Vec::new();
    for (key, path) in TERRAIN_CATALOG {
        if is_water_path(path) {
            water.push(*key);
        } else {
            ground.push(*key);
        }
    }
    (water, ground)
}

/// Keys of a named preset.
pub fn preset(name: &str) -> Option<&'static [&'static str; 6]> {
    TERRAIN_PRESETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, keys)| keys)
}

/// Names of every preset, in declaration order.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    TERRAIN_PRESETS.iter().map(|(name, _)| *name)
}
