use core::fmt::{self, Display, Formatter};

use bevy::color::HexColorError;
use bevy::prelude::*;
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl Display for TileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single reorderable unit of the row. The color is display only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub color: Color,
}

#[derive(Error, Debug)]
pub enum TileError {
    #[error("Invalid color {hex:?} for tile {id}")]
    InvalidColor {
        id: TileId,
        hex: String,
        #[source]
        source: HexColorError,
    },
}

impl Tile {
    pub fn from_hex(id: TileId, hex: &str) -> Result<Self, TileError> {
        let color = Srgba::hex(hex).map_err(|source| TileError::InvalidColor {
            id,
            hex: hex.to_owned(),
            source,
        })?;

        Ok(Self {
            id,
            color: color.into(),
        })
    }
}

/// Colors the row starts with, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, strum::Display)]
pub enum Swatch {
    Alizarin,
    PeterRiver,
    Emerald,
    Amethyst,
    SunFlower,
}

impl Swatch {
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Alizarin => "#e74c3c",
            Self::PeterRiver => "#3498db",
            Self::Emerald => "#2ecc71",
            Self::Amethyst => "#9b59b6",
            Self::SunFlower => "#f1c40f",
        }
    }
}

/// One tile per swatch, ids starting at 1.
pub fn initial_tiles() -> Result<Vec<Tile>, TileError> {
    Swatch::iter()
        .zip(1..)
        .map(|(swatch, id)| Tile::from_hex(TileId(id), swatch.hex()))
        .collect()
}
