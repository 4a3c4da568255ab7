//! Terrain set selection: turns a preset name or a random draw into six tile
//! coordinates on the master sheet, lowest height band first.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{PALETTE_SIZE, TILE_HEIGHT, TILE_WIDTH};
use crate::error::SetupError;
use crate::tile_catalog::{self, TileKey, DEFAULT_PRESET};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How the session picks its terrain set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PaletteSelection {
    /// Use the six keys of a named preset, verbatim and in order.
    Preset { name: String },
    /// Use an explicit list of keys.
    Keys { keys: Vec<String> },
    /// Band 0 drawn from water tiles, bands 1..6 from ground tiles, with
    /// replacement.
    Random,
}

impl Default for PaletteSelection {
    fn default() -> Self {
        PaletteSelection::Preset {
            name: DEFAULT_PRESET.to_string(),
        }
    }
}

/// Tile position on the master sheet, in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    /// Pixel position of the tile's first interior texel. Tiles on the sheet
    /// carry a one-pixel border, hence the `+ 1`.
    pub fn pixel_origin(&self) -> (u32, u32) {
        (
            self.x * TILE_WIDTH as u32 + 1,
            self.y * TILE_HEIGHT as u32 + 1,
        )
    }
}

impl From<TileKey> for TileCoord {
    fn from(key: TileKey) -> Self {
        TileCoord {
            x: key.col,
            y: key.row,
        }
    }
}

/// The resolved terrain set for this session.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Palette {
    pub keys: [TileKey; PALETTE_SIZE],
    pub tiles: [TileCoord; PALETTE_SIZE],
}

impl Palette {
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile for a palette index, or an error if the index is past the end.
    pub fn tile(&self, index: usize) -> Result<TileCoord, SetupError> {
        self.tiles
            .get(index)
            .copied()
            .ok_or(SetupError::PaletteIndexOutOfRange {
                index,
                len: self.tiles.len(),
            })
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve an explicit list of keys. The list must hold exactly six keys that
/// all exist in the catalog and lie on the sheet.
pub fn resolve_keys<S: AsRef<str>>(keys: &[S]) -> Result<Palette, SetupError> {
    if keys.len() != PALETTE_SIZE {
        return Err(SetupError::TerrainSetLength {
            expected: PALETTE_SIZE,
            found: keys.len(),
        });
    }

    let mut parsed = [TileKey { row: 0, col: 0 }; PALETTE_SIZE];
    for (slot, key) in parsed.iter_mut().zip(keys) {
        let key = key.as_ref();
        let path = tile_catalog::catalog_path(key)
            .ok_or_else(|| SetupError::UnknownTileKey(key.to_string()))?;
        *slot = TileKey::parse_on_sheet(key)?;
        info!("terrain tile {} -> {} (x={}, y={})", key, path, slot.col, slot.row);
    }

    Ok(Palette {
        keys: parsed,
        tiles: parsed.map(TileCoord::from),
    })
}

/// Draw a random terrain set: water for band 0, ground for the rest.
pub fn random_keys<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec<&'static str>, SetupError> {
    let (water, ground) = tile_catalog::partition_catalog();
    let mut keys = Vec::with_capacity(PALETTE_SIZE);
    keys.push(*water.choose(rng).ok_or(SetupError::EmptyTileClass("water"))?);
    for _ in 1..PALETTE_SIZE {
        keys.push(*ground.choose(rng).ok_or(SetupError::EmptyTileClass("ground"))?);
    }
    Ok(keys)
}

/// Resolve a selection into a palette, drawing from `rng` if it is random.
pub fn resolve_palette<R: Rng + ?Sized>(
    selection: &PaletteSelection,
    rng: &mut R,
) -> Result<Palette, SetupError> {
    let palette = match selection {
        PaletteSelection::Preset { name } => {
            let keys = tile_catalog::preset(name)
                .ok_or_else(|| SetupError::UnknownTerrainSet(name.clone()))?;
            resolve_keys(keys.as_slice())?
        }
        PaletteSelection::Keys { keys } => resolve_keys(keys.as_slice())?,
        PaletteSelection::Random => resolve_keys(random_keys(rng)?.as_slice())?,
    };
    let joined: Vec<String> = palette.keys.iter().map(ToString::to_string).collect();
    info!("terrain set [{}]", joined.join(", "));
    Ok(palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim_rng::SessionRng;
    use crate::tile_catalog::{catalog_path, is_water_path};

    #[test]
    fn test_pixel_origin_uses_row_col_swap() {
        let key: TileKey = "5X23".parse().unwrap();
        let coord = TileCoord::from(key);
        assert_eq!(coord, TileCoord { x: 23, y: 5 });
        assert_eq!(coord.pixel_origin(), (23 * 32 + 1, 5 * 32 + 1));
    }

    #[test]
    fn test_preset_resolves_in_order() {
        let mut rng = SessionRng::default();
        let selection = PaletteSelection::Preset {
            name: "lowland".to_string(),
        };
        let palette = resolve_palette(&selection, &mut rng.0).unwrap();
        assert_eq!(palette.len(), 6);
        assert_eq!(palette.tiles[0], TileCoord { x: 23, y: 5 });
        assert_eq!(palette.tiles[5], TileCoord { x: 27, y: 22 });
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let mut rng = SessionRng::default();
        let selection = PaletteSelection::Preset {
            name: "atlantis".to_string(),
        };
        assert!(matches!(
            resolve_palette(&selection, &mut rng.0),
            Err(SetupError::UnknownTerrainSet(_))
        ));
    }

    #[test]
    fn test_wrong_length_is_an_error() {
        let err = resolve_keys(&["5X23", "11X2"][..]).unwrap_err();
        assert!(matches!(
            err,
            SetupError::TerrainSetLength {
                expected: 6,
                found: 2
            }
        ));
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let keys = ["5X23", "11X2", "12X8", "13X5", "14X12", "1X1"];
        assert!(matches!(
            resolve_keys(&keys[..]),
            Err(SetupError::UnknownTileKey(k)) if k == "1X1"
        ));
    }

    #[test]
    fn test_random_selection_starts_with_water_then_ground() {
        let mut rng = SessionRng::from_seed_str("hello.");
        for _ in 0..50 {
            let keys = random_keys(&mut rng.0).unwrap();
            assert_eq!(keys.len(), 6);
            assert!(is_water_path(catalog_path(keys[0]).unwrap()));
            for key in &keys[1..] {
                assert!(
                    !is_water_path(catalog_path(key).unwrap()),
                    "band key {key} should be ground-class"
                );
            }
        }
    }

    #[test]
    fn test_random_selection_is_seed_deterministic() {
        let mut a = SessionRng::from_seed_str("hello.");
        let mut b = SessionRng::from_seed_str("hello.");
        let pa = resolve_palette(&PaletteSelection::Random, &mut a.0).unwrap();
        let pb = resolve_palette(&PaletteSelection::Random, &mut b.0).unwrap();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_tile_lookup_out_of_range() {
        let mut rng = SessionRng::default();
        let palette = resolve_palette(&PaletteSelection::default(), &mut rng.0).unwrap();
        assert!(palette.tile(5).is_ok());
        assert!(matches!(
            palette.tile(6),
            Err(SetupError::PaletteIndexOutOfRange { index: 6, len: 6 })
        ));
    }

    #[test]
    fn test_selection_deserializes_from_json() {
        let sel: PaletteSelection =
            serde_json::from_str(r#"{"mode":"preset","name":"tundra"}"#).unwrap();
        assert_eq!(
            sel,
            PaletteSelection::Preset {
                name: "tundra".to_string()
            }
        );
        let sel: PaletteSelection = serde_json::from_str(r#"{"mode":"random"}"#).unwrap();
        assert_eq!(sel, PaletteSelection::Random);
    }
}
