//! Sequential equipment-tag issuing.
//!
//! Tags are `<prefix>-<number>` with the prefix derived from the equipment
//! class. Numbers are monotonically non-decreasing per prefix: the service
//! scans the current tags and issues `max + 1`, floored so the first tag of
//! a fresh prefix is always `<prefix>-101`. Numbers are never reused or
//! lowered, even after deletions.

use crate::model::CanonicalNode;

/// Prefix for equipment classes outside the table.
pub const FALLBACK_PREFIX: &str = "EQ";

const FIRST_TAG_FLOOR: u32 = 100;

/// Tag prefix for an equipment class.
pub fn tag_prefix(equipment_class: &str) -> &'static str {
    match equipment_class {
        "centrifugal_pump" | "reciprocating_pump" | "metering_pump" => "P",
        "vessel" | "vessel_vertical" | "vessel_horizontal" => "V",
        "heat_exchanger" => "E",
        "reactor" => "R",
        "tank" => "TK",
        "column" => "C",
        "compressor" | "blower" => "K",
        "filter" => "F",
        "dryer" => "D",
        "mixer" => "M",
        "conveyor" => "CV",

        "gate_valve" | "globe_valve" | "check_valve" | "ball_valve" | "butterfly_valve"
        | "safety_valve" | "three_way_valve" | "needle_valve" => "XV",
        "control_valve" => "CV",

        "field_mounted" | "panel_mounted" | "dcs_shared" | "plc_mounted" => "I",

        _ => FALLBACK_PREFIX,
    }
}

/// Returns the next sequential tag for `equipment_class`, scanning the tags
/// of `existing` nodes. Pure and O(n); tags with non-numeric suffixes are
/// ignored rather than errored.
pub fn generate_tag(equipment_class: &str, existing: &[CanonicalNode]) -> String {
    next_tag(
        tag_prefix(equipment_class),
        existing.iter().map(|node| node.tag.as_str()),
    )
}

/// Lower-level issuing over bare tag strings, for callers that hold tags in
/// another shape than `CanonicalNode` slices.
pub fn next_tag<'a>(prefix: &str, existing_tags: impl IntoIterator<Item = &'a str>) -> String {
    let mut max_number = FIRST_TAG_FLOOR;
    for tag in existing_tags {
        let Some(suffix) = tag
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
        else {
            continue;
        };
        if let Ok(number) = suffix.parse::<u32>() {
            max_number = max_number.max(number);
        }
    }
    format!("{prefix}-{}", max_number + 1)
}
