//! Human-readable captions for catalog diagrams.

/// Returns the caption printed beneath a diagram. Ids missing from the table are returned as-is.
pub fn label_for(diagram_id: &str) -> &str {
    lookup(diagram_id).unwrap_or(diagram_id)
}

pub fn lookup(diagram_id: &str) -> Option<&'static str> {
    let label = match diagram_id {
        // Spectra
        "38x4spectraHorizontalABC" => "38\" x 4\" x 1/4\" Horizontal ABC Bus Bar (end section)",
        "38x4spectraHorizontalNeutral" => "38\" x 4\" x 1/4\" Horizontal Neutral Bar (end section)",
        "43x4spectraHorizontalABC" => "43\" x 4\" x 1/4\" Horizontal ABC Bus Bar (middle section)",
        "43x4spectraHorizontalNeutral" => {
            "43\" x 4\" x 1/4\" Horizontal Neutral Bar (middle section)"
        }
        "95x4spectraBLink" => "9.5\" x 4\" x 1/4\" B Link",
        "115x4spectraACLink1" => "11.5\" x 4\" x 1/4\" AC Link #1",
        "115x4spectraACLink2" => "11.5\" x 4\" x 1/4\" AC Link #2",
        "675x4SpectraHorizontalConnection4BarStack30deep" => {
            "6.75\" x 4\" Horizontal Connection, 4 Bar Stack (30\" deep)"
        }
        "725x4SpectraHorizontalConnection3BarStack30deep" => {
            "7.25\" x 4\" Horizontal Connection, 3 Bar Stack (30\" deep)"
        }
        "775x4SpectraHorizontalConnection2BarStack30deep" => {
            "7.75\" x 4\" Horizontal Connection, 2 Bar Stack (30\" deep)"
        }
        "825x4SpectraHorizontalConnection1BarStack30deep" => {
            "8.25\" x 4\" Horizontal Connection, 1 Bar Stack (30\" deep)"
        }
        "1275x4SpectraHorizontalConnection4BarStack36deep" => {
            "12.75\" x 4\" Horizontal Connection, 4 Bar Stack (36\" deep)"
        }
        "1325x4SpectraHorizontalConnection3BarStack36deep" => {
            "13.25\" x 4\" Horizontal Connection, 3 Bar Stack (36\" deep)"
        }
        "1375x4SpectraHorizontalConnection2BarStack36deep" => {
            "13.75\" x 4\" Horizontal Connection, 2 Bar Stack (36\" deep)"
        }
        "1425x4SpectraHorizontalConnection1BarStack36deep" => {
            "14.25\" x 4\" Horizontal Connection, 1 Bar Stack (36\" deep)"
        }
        "1225x4spectraACPhaseVerticalLink4in" => "12.25\" x 4\" AC Phase Vertical Link",
        "44375SpectraInnerSteel44Wide" => "44.375\" Inner Steel Panel, 44\" Wide",
        "44375SpectraInnerSteel44WideSideView" => {
            "44.375\" Inner Steel Panel, 44\" Wide (side view)"
        }

        // MLO
        "38x4mloHorizontalABC" => "38\" x 4\" x 1/4\" MLO Horizontal ABC Bus Bar",
        "38x4mloHorizontalNeutral" => "38\" x 4\" x 1/4\" MLO Horizontal Neutral Bar",
        "95x4mloBLink" => "9.5\" x 4\" x 1/4\" MLO B Link",
        "115x4mloACLink1" => "11.5\" x 4\" x 1/4\" MLO AC Link #1",
        "115x4mloACLink2" => "11.5\" x 4\" x 1/4\" MLO AC Link #2",
        "675x4MLOHorizontalConnection4BarStack30deep" => {
            "6.75\" x 4\" MLO Horizontal Connection, 4 Bar Stack (30\" deep)"
        }
        "725x4MLOHorizontalConnection3BarStack30deep" => {
            "7.25\" x 4\" MLO Horizontal Connection, 3 Bar Stack (30\" deep)"
        }
        "775x4MLOHorizontalConnection2BarStack30deep" => {
            "7.75\" x 4\" MLO Horizontal Connection, 2 Bar Stack (30\" deep)"
        }
        "825x4MLOHorizontalConnection1BarStack30deep" => {
            "8.25\" x 4\" MLO Horizontal Connection, 1 Bar Stack (30\" deep)"
        }
        "1275x4MLOHorizontalConnection4BarStack36deep" => {
            "12.75\" x 4\" MLO Horizontal Connection, 4 Bar Stack (36\" deep)"
        }
        "1325x4MLOHorizontalConnection3BarStack36deep" => {
            "13.25\" x 4\" MLO Horizontal Connection, 3 Bar Stack (36\" deep)"
        }
        "1375x4MLOHorizontalConnection2BarStack36deep" => {
            "13.75\" x 4\" MLO Horizontal Connection, 2 Bar Stack (36\" deep)"
        }
        "1425x4MLOHorizontalConnection1BarStack36deep" => {
            "14.25\" x 4\" MLO Horizontal Connection, 1 Bar Stack (36\" deep)"
        }
        "1225x4mloACPhaseVerticalLink4in" => "12.25\" x 4\" MLO AC Phase Vertical Link",
        "44375MLOInnerSteel44Wide" => "44.375\" MLO Inner Steel Panel, 44\" Wide",
        "44375MLOInnerSteel44WideSideView" => {
            "44.375\" MLO Inner Steel Panel, 44\" Wide (side view)"
        }

        _ => return None,
    };
    Some(label)
}
