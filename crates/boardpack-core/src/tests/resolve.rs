use super::*;
use crate::resolve::bar_stack_for;

#[test]
fn resolve_is_deterministic() {
    let section = spectra(2, 4, "40", "2500", "36");
    let first = resolve_default(&section);
    for _ in 0..8 {
        assert_eq!(resolve_default(&section), first);
    }
}

#[test]
fn unknown_section_type_resolves_to_nothing() {
    for raw in ["", "PRL4", "spectra", "mlo"] {
        let section = SectionSpec::new(
            1,
            1,
            SectionType::parse(raw),
            Width::W44,
            Amperage::A4000,
            Depth::D30,
        )
        .unwrap();
        assert!(resolve_default(&section).is_empty(), "type {raw:?}");
    }
}

#[test]
fn base_quantity_table() {
    let cases = [
        ("4000", 4),
        ("3000", 3),
        ("2500", 3),
        ("2000", 2),
        ("1200", 2),
        ("1000", 1),
        ("800", 1),
        ("", 1),
    ];
    for (amperage, expected) in cases {
        assert_eq!(
            Amperage::parse(amperage).bucket().base_quantity(),
            expected,
            "amperage {amperage:?}"
        );
    }
}

#[test]
fn bar_stack_selection_by_amperage_and_depth() {
    let list = resolve_default(&spectra(1, 1, "44", "4000", "30"));
    let stack = list
        .iter()
        .find(|d| d.diagram_id.contains("BarStack"))
        .expect("bar stack");
    assert_eq!(
        stack.diagram_id,
        "675x4SpectraHorizontalConnection4BarStack30deep"
    );
    assert_eq!(stack.quantity, 6);

    assert_eq!(
        bar_stack_for(
            &SectionType::Spectra,
            Amperage::A1000.bucket(),
            &Depth::D36
        ),
        Some("1425x4SpectraHorizontalConnection1BarStack36deep")
    );
    assert_eq!(
        bar_stack_for(
            &SectionType::Spectra,
            Amperage::A3000.bucket(),
            &Depth::D36
        ),
        Some("1325x4SpectraHorizontalConnection3BarStack36deep")
    );
}

#[test]
fn depth_outside_the_table_has_no_bar_stack() {
    let list = resolve_default(&spectra(1, 1, "44", "4000", "42"));
    assert!(!list.iter().any(|d| d.diagram_id.contains("BarStack")));
    // The rest of the list is unaffected.
    assert!(ids(&list).contains(&"1225x4spectraACPhaseVerticalLink4in"));
}

#[test]
fn edge_and_middle_sections_pick_their_bus_variants() {
    for width in ["40", "44"] {
        for index in [1, 3] {
            let list = resolve_default(&spectra(index, 3, width, "2000", "30"));
            assert_eq!(
                &ids(&list)[..2],
                ["38x4spectraHorizontalABC", "38x4spectraHorizontalNeutral"],
                "index {index} width {width}"
            );
        }
        let list = resolve_default(&spectra(2, 3, width, "2000", "30"));
        assert_eq!(
            &ids(&list)[..2],
            ["43x4spectraHorizontalABC", "43x4spectraHorizontalNeutral"],
            "middle width {width}"
        );
    }
}

#[test]
fn other_widths_skip_the_bus_pair() {
    let list = resolve_default(&spectra(1, 2, "36", "2000", "30"));
    assert_eq!(ids(&list)[0], "95x4spectraBLink");
    assert!(!list.iter().any(|d| {
        d.diagram_id.ends_with("HorizontalABC") || d.diagram_id.ends_with("HorizontalNeutral")
    }));
}

#[test]
fn spectra_44_edge_section_full_list() {
    let list = resolve_default(&spectra(1, 2, "44", "4000", "30"));
    let got: Vec<(&str, u32)> = list
        .iter()
        .map(|d| (d.diagram_id.as_str(), d.quantity))
        .collect();
    assert_eq!(
        got,
        vec![
            ("38x4spectraHorizontalABC", 12),
            ("38x4spectraHorizontalNeutral", 4),
            ("95x4spectraBLink", 2),
            ("115x4spectraACLink1", 2),
            ("115x4spectraACLink2", 2),
            ("675x4SpectraHorizontalConnection4BarStack30deep", 6),
            ("1225x4spectraACPhaseVerticalLink4in", 4),
            ("44375SpectraInnerSteel44Wide", 2),
            ("44375SpectraInnerSteel44WideSideView", 1),
        ]
    );
}

#[test]
fn unscaled_bus_bars_match_the_neutral() {
    let options = ResolveOptions {
        bus_bar_scaling: BusBarScaling::Unscaled,
    };
    let list = resolve(&spectra(2, 2, "40", "3000", "36"), &options);
    assert_eq!(list[0].quantity, 3);
    assert_eq!(list[1].quantity, 3);
}

#[test]
fn spectra_40_has_no_inner_steel() {
    let list = resolve_default(&spectra(1, 1, "40", "1200", "30"));
    assert!(!list.iter().any(|d| d.diagram_id.contains("InnerSteel")));
    assert_eq!(list.len(), 7);
}

#[test]
fn mlo_uses_one_bus_pair_regardless_of_position() {
    let mk = |index| {
        SectionSpec::new(
            index,
            3,
            SectionType::Mlo,
            Width::W36,
            Amperage::A2000,
            Depth::D36,
        )
        .unwrap()
    };
    let edge = resolve_default(&mk(1));
    let middle = resolve_default(&mk(2));
    assert_eq!(edge, middle);
    assert_eq!(
        ids(&edge),
        vec![
            "38x4mloHorizontalABC",
            "38x4mloHorizontalNeutral",
            "95x4mloBLink",
            "115x4mloACLink1",
            "115x4mloACLink2",
            "1375x4MLOHorizontalConnection2BarStack36deep",
            "1225x4mloACPhaseVerticalLink4in",
        ]
    );
    assert_eq!(edge[0].quantity, 6);
    assert_eq!(edge[1].quantity, 2);
}

#[test]
fn mlo_without_width_36_skips_the_bus_pair() {
    let section = SectionSpec::new(
        1,
        1,
        SectionType::Mlo,
        Width::W40,
        Amperage::A1000,
        Depth::D30,
    )
    .unwrap();
    let list = resolve_default(&section);
    assert_eq!(ids(&list)[0], "95x4mloBLink");
}

#[test]
fn labels_follow_the_caption_table() {
    let list = resolve_default(&spectra(1, 1, "44", "4000", "30"));
    assert_eq!(
        list[0].label,
        "38\" x 4\" x 1/4\" Horizontal ABC Bus Bar (end section)"
    );
    for d in &list {
        assert_ne!(d.label, d.diagram_id, "{} has no caption", d.diagram_id);
        assert!(d.quantity > 0);
    }
}
