// ---------------------------------------------------------------------------
// SetupError: fatal precondition failures raised while building the scene
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while assembling the terrain and water pipeline.
///
/// None of these are recoverable: a session that hits one cannot render
/// anything meaningful, so callers log it once and stop.
#[derive(Debug)]
pub enum SetupError {
    /// A tile key was not of the form `"<row>X<col>"`.
    MalformedTileKey(String),
    /// A tile key is well-formed but absent from the catalog.
    UnknownTileKey(String),
    /// A tile coordinate points outside the populated part of the tile sheet.
    TileOutsideSheet { key: String, col: u32, row: u32 },
    /// A terrain set did not contain exactly `expected` keys.
    TerrainSetLength { expected: usize, found: usize },
    /// No preset with this name exists.
    UnknownTerrainSet(String),
    /// Randomized selection needs at least one key of each class.
    EmptyTileClass(&'static str),
    /// A bake produced a palette index that does not exist.
    PaletteIndexOutOfRange { index: usize, len: usize },
    /// Two grids that must agree on size do not.
    GridMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// The execution environment cannot provide a requested target format.
    UnsupportedTargetFormat(String),
    /// A configuration value violates a precondition.
    InvalidConfig(String),
    /// The configuration file could not be read.
    ConfigIo(std::io::Error),
    /// The configuration file is not valid JSON for `TidewaterConfig`.
    ConfigParse(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::MalformedTileKey(key) => {
                write!(f, "Malformed tile key '{key}': expected '<row>X<col>'")
            }
            SetupError::UnknownTileKey(key) => write!(f, "Unknown tile key '{key}'"),
            SetupError::TileOutsideSheet { key, col, row } => write!(
                f,
                "Tile '{key}' (col {col}, row {row}) lies outside the tile sheet"
            ),
            SetupError::TerrainSetLength { expected, found } => write!(
                f,
                "Terrain set must have {expected} tiles, found {found}"
            ),
            SetupError::UnknownTerrainSet(name) => write!(f, "Unknown terrain set '{name}'"),
            SetupError::EmptyTileClass(class) => {
                write!(f, "Tile catalog has no {class} tiles to choose from")
            }
            SetupError::PaletteIndexOutOfRange { index, len } => write!(
                f,
                "Palette index {index} out of range for a palette of {len}"
            ),
            SetupError::GridMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "Grid size mismatch for {what}: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            SetupError::UnsupportedTargetFormat(msg) => {
                write!(f, "Unsupported render target format: {msg}")
            }
            SetupError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            SetupError::ConfigIo(e) => write!(f, "Config I/O error: {e}"),
            SetupError::ConfigParse(msg) => write!(f, "Config parse error: {msg}"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::ConfigIo(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SetupError {
    fn from(e: std::io::Error) -> Self {
        SetupError::ConfigIo(e)
    }
}

impl From<serde_json::Error> for SetupError {
    fn from(e: serde_json::Error) -> Self {
        SetupError::ConfigParse(e.to_string())
    }
}
