//! Section-to-diagram resolution.
//!
//! `resolve` is pure and total: the same section always yields the same ordered list, and
//! categories the tables do not know about simply contribute nothing.

use crate::model::{AmperageBucket, Depth, DiagramRequirement, SectionSpec, SectionType, Width};
use serde::{Deserialize, Serialize};

const B_LINK_QTY: u32 = 2;
const AC_LINK_QTY: u32 = 2;
const BAR_STACK_QTY: u32 = 6;
const VERTICAL_LINK_QTY: u32 = 4;
const INNER_STEEL_QTY: u32 = 2;
const INNER_STEEL_SIDE_VIEW_QTY: u32 = 1;
/// One horizontal ABC bar per phase.
const PHASES: u32 = 3;

/// How the horizontal ABC bus bar quantity relates to the amperage base quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusBarScaling {
    /// Base quantity times three phases. The neutral stays at the base quantity.
    #[default]
    PerPhase,
    /// Bus bar and neutral both use the base quantity.
    Unscaled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    pub bus_bar_scaling: BusBarScaling,
}

/// Which quantity rule a horizontal bar follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarRole {
    BusBar,
    Neutral,
}

pub fn quantity_for(bucket: AmperageBucket, role: BarRole, options: &ResolveOptions) -> u32 {
    let base = bucket.base_quantity();
    match (role, options.bus_bar_scaling) {
        (BarRole::BusBar, BusBarScaling::PerPhase) => base * PHASES,
        (BarRole::BusBar, BusBarScaling::Unscaled) | (BarRole::Neutral, _) => base,
    }
}

/// Catalog ids for one section family.
struct AssetSet {
    edge_bus_bar: &'static str,
    edge_neutral: &'static str,
    middle_bus_bar: &'static str,
    middle_neutral: &'static str,
    b_link: &'static str,
    ac_link_1: &'static str,
    ac_link_2: &'static str,
    /// Indexed by `[bucket][depth]`, depth 30 first.
    bar_stacks: [[&'static str; 2]; 4],
    vertical_link: &'static str,
    inner_steel: &'static str,
    inner_steel_side_view: &'static str,
}

const SPECTRA: AssetSet = AssetSet {
    edge_bus_bar: "38x4spectraHorizontalABC",
    edge_neutral: "38x4spectraHorizontalNeutral",
    middle_bus_bar: "43x4spectraHorizontalABC",
    middle_neutral: "43x4spectraHorizontalNeutral",
    b_link: "95x4spectraBLink",
    ac_link_1: "115x4spectraACLink1",
    ac_link_2: "115x4spectraACLink2",
    bar_stacks: [
        [
            "675x4SpectraHorizontalConnection4BarStack30deep",
            "1275x4SpectraHorizontalConnection4BarStack36deep",
        ],
        [
            "725x4SpectraHorizontalConnection3BarStack30deep",
            "1325x4SpectraHorizontalConnection3BarStack36deep",
        ],
        [
            "775x4SpectraHorizontalConnection2BarStack30deep",
            "1375x4SpectraHorizontalConnection2BarStack36deep",
        ],
        [
            "825x4SpectraHorizontalConnection1BarStack30deep",
            "1425x4SpectraHorizontalConnection1BarStack36deep",
        ],
    ],
    vertical_link: "1225x4spectraACPhaseVerticalLink4in",
    inner_steel: "44375SpectraInnerSteel44Wide",
    inner_steel_side_view: "44375SpectraInnerSteel44WideSideView",
};

// MLO sections have a single bus bar pair regardless of position.
const MLO: AssetSet = AssetSet {
    edge_bus_bar: "38x4mloHorizontalABC",
    edge_neutral: "38x4mloHorizontalNeutral",
    middle_bus_bar: "38x4mloHorizontalABC",
    middle_neutral: "38x4mloHorizontalNeutral",
    b_link: "95x4mloBLink",
    ac_link_1: "115x4mloACLink1",
    ac_link_2: "115x4mloACLink2",
    bar_stacks: [
        [
            "675x4MLOHorizontalConnection4BarStack30deep",
            "1275x4MLOHorizontalConnection4BarStack36deep",
        ],
        [
            "725x4MLOHorizontalConnection3BarStack30deep",
            "1325x4MLOHorizontalConnection3BarStack36deep",
        ],
        [
            "775x4MLOHorizontalConnection2BarStack30deep",
            "1375x4MLOHorizontalConnection2BarStack36deep",
        ],
        [
            "825x4MLOHorizontalConnection1BarStack30deep",
            "1425x4MLOHorizontalConnection1BarStack36deep",
        ],
    ],
    vertical_link: "1225x4mloACPhaseVerticalLink4in",
    inner_steel: "44375MLOInnerSteel44Wide",
    inner_steel_side_view: "44375MLOInnerSteel44WideSideView",
};

impl AssetSet {
    fn horizontal_pair(&self, variant: BusVariant) -> [&'static str; 2] {
        match variant {
            BusVariant::Edge => [self.edge_bus_bar, self.edge_neutral],
            BusVariant::Middle => [self.middle_bus_bar, self.middle_neutral],
        }
    }

    fn bar_stack(&self, bucket: AmperageBucket, depth: &Depth) -> Option<&'static str> {
        let column = match depth {
            Depth::D30 => 0,
            Depth::D36 => 1,
            Depth::Other(_) => return None,
        };
        let row = match bucket {
            AmperageBucket::FourBar => 0,
            AmperageBucket::ThreeBar => 1,
            AmperageBucket::TwoBar => 2,
            AmperageBucket::OneBar => 3,
        };
        Some(self.bar_stacks[row][column])
    }
}

/// Returns the bar-stack catalog id for a section family, if the depth has one.
pub fn bar_stack_for(
    section_type: &SectionType,
    bucket: AmperageBucket,
    depth: &Depth,
) -> Option<&'static str> {
    asset_set(section_type)?.bar_stack(bucket, depth)
}

fn asset_set(section_type: &SectionType) -> Option<&'static AssetSet> {
    match section_type {
        SectionType::Spectra => Some(&SPECTRA),
        SectionType::Mlo => Some(&MLO),
        SectionType::Other(_) => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BusVariant {
    Edge,
    Middle,
}

/// Whether the horizontal bus bar / neutral pair applies, and which variant.
fn bus_variant(section: &SectionSpec) -> Option<BusVariant> {
    match (&section.section_type, &section.width) {
        (SectionType::Spectra, Width::W40 | Width::W44) if section.is_edge() => {
            Some(BusVariant::Edge)
        }
        (SectionType::Spectra, Width::W40 | Width::W44) => Some(BusVariant::Middle),
        (SectionType::Mlo, Width::W36) => Some(BusVariant::Edge),
        _ => None,
    }
}

pub fn resolve(section: &SectionSpec, options: &ResolveOptions) -> Vec<DiagramRequirement> {
    let Some(assets) = asset_set(&section.section_type) else {
        tracing::debug!(
            section = section.index(),
            section_type = %section.section_type,
            "no diagrams for section type"
        );
        return Vec::new();
    };
    let bucket = section.amperage.bucket();
    let mut out = Vec::with_capacity(10);

    if let Some(variant) = bus_variant(section) {
        let [bus_bar, neutral] = assets.horizontal_pair(variant);
        out.push(DiagramRequirement::new(
            bus_bar,
            quantity_for(bucket, BarRole::BusBar, options),
        ));
        out.push(DiagramRequirement::new(
            neutral,
            quantity_for(bucket, BarRole::Neutral, options),
        ));
    }

    out.push(DiagramRequirement::new(assets.b_link, B_LINK_QTY));
    out.push(DiagramRequirement::new(assets.ac_link_1, AC_LINK_QTY));
    out.push(DiagramRequirement::new(assets.ac_link_2, AC_LINK_QTY));

    if let Some(stack) = assets.bar_stack(bucket, &section.depth) {
        out.push(DiagramRequirement::new(stack, BAR_STACK_QTY));
    }

    out.push(DiagramRequirement::new(
        assets.vertical_link,
        VERTICAL_LINK_QTY,
    ));

    if section.width == Width::W44 {
        out.push(DiagramRequirement::new(assets.inner_steel, INNER_STEEL_QTY));
        out.push(DiagramRequirement::new(
            assets.inner_steel_side_view,
            INNER_STEEL_SIDE_VIEW_QTY,
        ));
    }

    tracing::debug!(
        section = section.index(),
        diagrams = out.len(),
        "resolved section diagrams"
    );
    out
}

/// [`resolve`] with default options.
pub fn resolve_default(section: &SectionSpec) -> Vec<DiagramRequirement> {
    resolve(section, &ResolveOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amperage;

    #[test]
    fn bus_bar_scaling_only_touches_the_bus_bar() {
        let per_phase = ResolveOptions::default();
        let unscaled = ResolveOptions {
            bus_bar_scaling: BusBarScaling::Unscaled,
        };
        let bucket = Amperage::A4000.bucket();
        assert_eq!(quantity_for(bucket, BarRole::BusBar, &per_phase), 12);
        assert_eq!(quantity_for(bucket, BarRole::Neutral, &per_phase), 4);
        assert_eq!(quantity_for(bucket, BarRole::BusBar, &unscaled), 4);
        assert_eq!(quantity_for(bucket, BarRole::Neutral, &unscaled), 4);
    }

    #[test]
    fn unmapped_bucket_falls_back_to_the_lowest_bar_stack() {
        let bucket = Amperage::parse("800").bucket();
        assert_eq!(bucket, AmperageBucket::OneBar);
        assert_eq!(
            bar_stack_for(&SectionType::Spectra, bucket, &Depth::D30),
            Some("825x4SpectraHorizontalConnection1BarStack30deep")
        );
    }

    #[test]
    fn unknown_section_type_has_no_asset_set() {
        assert_eq!(
            bar_stack_for(
                &SectionType::parse("Pow-R-Line"),
                AmperageBucket::FourBar,
                &Depth::D30
            ),
            None
        );
    }
}
