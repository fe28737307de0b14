//! Section and packet data model.
//!
//! Categorical attributes arrive as form strings ("44", "4000", "Spectra"). They are parsed into
//! closed enums up front so the resolver can match exhaustively; anything unrecognised is kept
//! verbatim in an `Other` variant rather than rejected.

use crate::{Error, Result};
use serde::{Serialize, Serializer};

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn parse(raw: &str) -> Self {
                match raw.trim() {
                    $($text => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(raw) => raw.as_str(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

categorical! {
    /// Switchboard section family.
    pub enum SectionType {
        Mlo => "MLO",
        Spectra => "Spectra",
    }
}

categorical! {
    /// Section width in inches.
    pub enum Width {
        W36 => "36",
        W40 => "40",
        W44 => "44",
    }
}

categorical! {
    /// Bus rating in amperes.
    pub enum Amperage {
        A1000 => "1000",
        A1200 => "1200",
        A2000 => "2000",
        A2500 => "2500",
        A3000 => "3000",
        A4000 => "4000",
    }
}

categorical! {
    /// Enclosure depth in inches.
    pub enum Depth {
        D30 => "30",
        D36 => "36",
    }
}

/// Amperage grouping shared by the quantity table and the bar-stack table.
///
/// The name counts the bars stacked per phase for that rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AmperageBucket {
    FourBar,
    ThreeBar,
    TwoBar,
    OneBar,
}

impl Amperage {
    pub fn bucket(&self) -> AmperageBucket {
        match self {
            Amperage::A4000 => AmperageBucket::FourBar,
            Amperage::A3000 | Amperage::A2500 => AmperageBucket::ThreeBar,
            Amperage::A2000 | Amperage::A1200 => AmperageBucket::TwoBar,
            Amperage::A1000 | Amperage::Other(_) => AmperageBucket::OneBar,
        }
    }
}

impl AmperageBucket {
    pub fn base_quantity(self) -> u32 {
        match self {
            AmperageBucket::FourBar => 4,
            AmperageBucket::ThreeBar => 3,
            AmperageBucket::TwoBar => 2,
            AmperageBucket::OneBar => 1,
        }
    }
}

/// Resolver input: one section of the switchboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSpec {
    index: u32,
    total_sections: u32,
    pub section_type: SectionType,
    pub width: Width,
    pub amperage: Amperage,
    pub depth: Depth,
}

impl SectionSpec {
    pub fn new(
        index: u32,
        total_sections: u32,
        section_type: SectionType,
        width: Width,
        amperage: Amperage,
        depth: Depth,
    ) -> Result<Self> {
        if index == 0 || index > total_sections {
            return Err(Error::SectionIndex {
                index,
                total: total_sections,
            });
        }
        Ok(Self {
            index,
            total_sections,
            section_type,
            width,
            amperage,
            depth,
        })
    }

    /// 1-based position among the sections.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn total_sections(&self) -> u32 {
        self.total_sections
    }

    /// First and last sections carry the end-section bus variants.
    pub fn is_edge(&self) -> bool {
        self.index == 1 || self.index == self.total_sections
    }
}

/// A single resolved diagram with its quantity and caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramRequirement {
    pub diagram_id: String,
    pub quantity: u32,
    pub label: String,
}

impl DiagramRequirement {
    pub fn new(diagram_id: impl Into<String>, quantity: u32) -> Self {
        let diagram_id = diagram_id.into();
        let label = crate::labels::label_for(&diagram_id).to_string();
        Self {
            diagram_id,
            quantity,
            label,
        }
    }
}

/// Fields printed on every page of the packet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PacketHeader {
    pub sales_order: String,
    pub customer_name: String,
    pub job_address: String,
    pub switchboard_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRequest {
    pub spec: SectionSpec,
    /// Display-only; not consulted by the resolver.
    pub height: Option<String>,
    pub bus_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRequest {
    pub header: PacketHeader,
    pub sections: Vec<SectionRequest>,
}
