//! Opening records and the FEN-keyed catalog.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EcoError;

/// Where an opening record came from. `eco_tsv` (lichess) is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpeningSource {
    #[serde(rename = "eco_tsv")]
    EcoTsv,
    #[serde(rename = "eco_js")]
    EcoJs,
    #[serde(rename = "scid")]
    Scid,
    #[serde(rename = "eco_wikip")]
    EcoWikip,
    #[serde(rename = "wiki_b")]
    WikiB,
    #[serde(rename = "ct")]
    Ct,
    #[serde(rename = "chessGraph")]
    ChessGraph,
    #[serde(rename = "chronos")]
    Chronos,
    #[serde(rename = "icsbot")]
    Icsbot,
    #[serde(rename = "pgn")]
    Pgn,
    #[serde(rename = "interpolated")]
    Interpolated,
}

impl OpeningSource {
    pub const ALL: [OpeningSource; 11] = [
        OpeningSource::EcoTsv,
        OpeningSource::EcoJs,
        OpeningSource::Scid,
        OpeningSource::EcoWikip,
        OpeningSource::WikiB,
        OpeningSource::Ct,
        OpeningSource::ChessGraph,
        OpeningSource::Chronos,
        OpeningSource::Icsbot,
        OpeningSource::Pgn,
        OpeningSource::Interpolated,
    ];

    /// The tag used in the JSON data files.
    pub fn as_str(self) -> &'static str {
        match self {
            OpeningSource::EcoTsv => "eco_tsv",
            OpeningSource::EcoJs => "eco_js",
            OpeningSource::Scid => "scid",
            OpeningSource::EcoWikip => "eco_wikip",
            OpeningSource::WikiB => "wiki_b",
            OpeningSource::Ct => "ct",
            OpeningSource::ChessGraph => "chessGraph",
            OpeningSource::Chronos => "chronos",
            OpeningSource::Icsbot => "icsbot",
            OpeningSource::Pgn => "pgn",
            OpeningSource::Interpolated => "interpolated",
        }
    }
}

impl fmt::Display for OpeningSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpeningSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpeningSource::ALL
            .into_iter()
            .find(|src| src.as_str() == s)
            .ok_or_else(|| format!("Unknown opening source '{s}'"))
    }
}

/// One opening variation, keyed in the catalog by its FEN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningRecord {
    pub src: OpeningSource,
    /// ECO code, e.g. "B03". Many records share a code.
    pub eco: String,
    /// SAN move sequence, e.g. "1. e4 Nf6 2. e5".
    pub moves: String,
    pub name: String,
    /// Alternative names keyed by source tag.
    #[serde(default)]
    pub aliases: Option<IndexMap<String, String>>,
    /// Extended SCID code when applicable.
    #[serde(default)]
    pub scid: Option<String>,
    #[serde(default)]
    pub is_eco_root: bool,
    /// For interpolated records: the source of the root variation.
    #[serde(default)]
    pub root_src: Option<OpeningSource>,
}

impl OpeningRecord {
    /// The ECO category this record's code falls under, if the code is well formed.
    pub fn category(&self) -> Option<EcoCategory> {
        self.eco.get(..1).and_then(|letter| letter.parse().ok())
    }

    /// Borrowed view for JSON output in the data-file shape.
    pub fn compact(&self) -> CompactRecord<'_> {
        CompactRecord {
            src: self.src,
            eco: &self.eco,
            moves: &self.moves,
            name: &self.name,
            aliases: self.aliases.as_ref(),
            scid: self.scid.as_deref(),
            is_eco_root: self.is_eco_root,
            root_src: self.root_src,
        }
    }

    /// Source tags of this record: its own `src` followed by its alias keys.
    pub fn source_tags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.src.as_str()).chain(
            self.aliases
                .iter()
                .flat_map(|aliases| aliases.keys().map(String::as_str)),
        )
    }
}

/// The full opening catalog: FEN -> record, in insertion order.
pub type OpeningCatalog = IndexMap<String, OpeningRecord>;

/// JSON view of a record in the data-file shape: absent optional fields are
/// left out instead of written as `null`/`false`. The record itself always
/// serializes every field so bincode snapshots read back.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactRecord<'a> {
    src: OpeningSource,
    eco: &'a str,
    moves: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    aliases: Option<&'a IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scid: Option<&'a str>,
    #[serde(skip_serializing_if = "is_false")]
    is_eco_root: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    root_src: Option<OpeningSource>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A FEN-keyed catalog (or filtered view of one) in the data-file JSON shape.
pub fn compact_catalog<'a, I>(entries: I) -> IndexMap<&'a str, CompactRecord<'a>>
where
    I: IntoIterator<Item = (&'a str, &'a OpeningRecord)>,
{
    entries
        .into_iter()
        .map(|(fen, record)| (fen, record.compact()))
        .collect()
}

/// ECO category letter (A-E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcoCategory {
    A,
    B,
    C,
    D,
    E,
}

impl EcoCategory {
    pub fn letter(self) -> char {
        match self {
            EcoCategory::A => 'A',
            EcoCategory::B => 'B',
            EcoCategory::C => 'C',
            EcoCategory::D => 'D',
            EcoCategory::E => 'E',
        }
    }
}

impl FromStr for EcoCategory {
    type Err = EcoError;

    /// Accepts a single letter, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(EcoCategory::A),
            "B" => Ok(EcoCategory::B),
            "C" => Ok(EcoCategory::C),
            "D" => Ok(EcoCategory::D),
            "E" => Ok(EcoCategory::E),
            _ => Err(EcoError::InvalidCategory(s.to_string())),
        }
    }
}
