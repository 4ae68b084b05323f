//! Built-in rule sets.
//!
//! Rule ids, thresholds and input paths are part of the public contract: upstream
//! analysis modules write the `stability.*`, `hull.*` and `structure.*` paths named here.

use super::model::{Framework, LimitType, RuleCategory, RuleReference, RuleRequirement};

/// Required GM for ABS high-speed naval craft, evaluated against `hull.beam`.
pub const ABS_GM_FORMULA: &str = "max(0.15, 0.04 * beam)";

const ABS_EDITION: u16 = 2023;
const HSC_EDITION: u16 = 2000;
const USCG_EDITION: u16 = 2023;

const HSC_VESSEL_TYPES: [&str; 4] = ["ferry", "passenger", "crew_boat", "cargo"];
const USCG_T_VESSEL_TYPES: [&str; 4] = ["ferry", "passenger", "excursion", "water_taxi"];

/// Every built-in rule in registration order.
#[must_use]
pub fn builtin_rules() -> Vec<RuleRequirement> {
    let mut rules = abs_hsnc_stability();
    rules.extend(abs_hsnc_structural_and_freeboard());
    rules.extend(hsc_2000_stability());
    rules.extend(uscg_subchapter_t_stability());
    rules.extend(uscg_subchapter_t_other());
    rules
}

fn abs(section: &str, paragraph: &str) -> RuleReference {
    RuleReference::new(Framework::AbsHsnc, section)
        .paragraph(paragraph)
        .edition(ABS_EDITION)
}

fn hsc(section: &str, paragraph: &str) -> RuleReference {
    RuleReference::new(Framework::Hsc2000, section)
        .paragraph(paragraph)
        .edition(HSC_EDITION)
}

fn cfr(section: &str) -> RuleReference {
    RuleReference::new(Framework::UscgSubchapterT, section).edition(USCG_EDITION)
}

fn stability(id: &str, name: &str, framework: Framework) -> RuleRequirement {
    RuleRequirement::new(id, name, RuleCategory::Stability, framework)
}

fn abs_hsnc_stability() -> Vec<RuleRequirement> {
    let fw = Framework::AbsHsnc;
    vec![
        stability("ABS-HSNC-3-2-1", "Minimum Metacentric Height (GM)", fw)
            .description("Initial metacentric height in the intact condition")
            .inputs(["stability.gm_m", "hull.beam"])
            .criteria("GM >= max(0.15 m, 0.04 x beam)")
            .formula(ABS_GM_FORMULA, LimitType::Minimum)
            .reference(abs("Pt 3 Ch 2 Sec 1", "3.1").table("1")),
        stability("ABS-HSNC-3-2-2", "Area under GZ curve 0-30 deg", fw)
            .description("Righting lever area up to 30 degrees of heel")
            .inputs(["stability.area_0_30_m_rad"])
            .criteria("Area 0-30 deg >= 0.055 m-rad")
            .limit(0.055, LimitType::Minimum)
            .reference(abs("Pt 3 Ch 2 Sec 1", "3.2")),
        stability("ABS-HSNC-3-2-3", "Area under GZ curve 0-40 deg", fw)
            .description("Righting lever area up to 40 degrees or the angle of flooding")
            .inputs(["stability.area_0_40_m_rad"])
            .criteria("Area 0-40 deg >= 0.090 m-rad")
            .limit(0.090, LimitType::Minimum)
            .reference(abs("Pt 3 Ch 2 Sec 1", "3.3")),
        stability("ABS-HSNC-3-2-4", "Area under GZ curve 30-40 deg", fw)
            .description("Righting lever area between 30 and 40 degrees of heel")
            .inputs(["stability.area_30_40_m_rad"])
            .criteria("Area 30-40 deg >= 0.030 m-rad")
            .limit(0.030, LimitType::Minimum)
            .reference(abs("Pt 3 Ch 2 Sec 1", "3.4")),
        stability("ABS-HSNC-3-2-5", "Maximum Righting Arm (GZ)", fw)
            .description("Maximum righting lever of the intact GZ curve")
            .inputs(["stability.gz_max_m"])
            .criteria("GZ max >= 0.20 m")
            .limit(0.20, LimitType::Minimum)
            .reference(abs("Pt 3 Ch 2 Sec 1", "3.5")),
        stability("ABS-HSNC-3-2-6", "Angle of Maximum GZ", fw)
            .description("Heel angle at which the maximum righting lever occurs")
            .inputs(["stability.angle_of_max_gz_deg"])
            .criteria("Angle of GZ max >= 25 deg")
            .limit(25.0, LimitType::Minimum)
            .reference(abs("Pt 3 Ch 2 Sec 1", "3.6")),
    ]
}

fn abs_hsnc_structural_and_freeboard() -> Vec<RuleRequirement> {
    let fw = Framework::AbsHsnc;
    vec![
        RuleRequirement::new(
            "ABS-HSNC-3-3-1",
            "Bottom Shell Plating Thickness",
            RuleCategory::Structural,
            fw,
        )
        .description("Bottom plating scantlings under slamming pressure")
        .inputs(["structure.bottom_plating_mm", "hull.lwl"])
        .criteria("Thickness per Pt 3 Ch 2 Sec 3 design slamming pressure")
        .reference(abs("Pt 3 Ch 2 Sec 3", "3.1"))
        .notes("Scantling calculation requires plan review"),
        RuleRequirement::new(
            "ABS-HSNC-3-3-2",
            "Hull Girder Section Modulus",
            RuleCategory::Structural,
            fw,
        )
        .description("Midship section modulus for longitudinal strength")
        .min_length(24.0)
        .inputs(["structure.section_modulus_cm3", "hull.lwl", "hull.beam"])
        .criteria("SM >= required hull girder section modulus per Pt 3 Ch 2 Sec 2")
        .reference(abs("Pt 3 Ch 2 Sec 2", "1.1"))
        .notes("Applies to craft of 24 m and above"),
        RuleRequirement::new(
            "ABS-HSNC-3-4-1",
            "Minimum Freeboard",
            RuleCategory::Freeboard,
            fw,
        )
        .description("Freeboard at the lowest point of the weather deck")
        .inputs(["hull.freeboard", "hull.lwl"])
        .criteria("Freeboard >= max(0.3 m, 0.01 x LWL)")
        .reference(abs("Pt 3 Ch 1 Sec 4", "1.1")),
    ]
}

fn hsc_2000_stability() -> Vec<RuleRequirement> {
    let fw = Framework::Hsc2000;
    vec![
        stability("HSC-2000-A7-1.1", "Area under GZ curve 0-30 deg", fw)
            .vessel_types(HSC_VESSEL_TYPES)
            .inputs(["stability.area_0_30_m_rad"])
            .criteria("Area 0-30 deg >= 0.055 m-rad")
            .limit(0.055, LimitType::Minimum)
            .reference(hsc("Annex 7", "1.1")),
        stability("HSC-2000-A7-1.2", "Area under GZ curve 0-40 deg", fw)
            .vessel_types(HSC_VESSEL_TYPES)
            .inputs(["stability.area_0_40_m_rad"])
            .criteria("Area 0-40 deg >= 0.090 m-rad")
            .limit(0.090, LimitType::Minimum)
            .reference(hsc("Annex 7", "1.2")),
        stability("HSC-2000-A7-1.3", "Area under GZ curve 30-40 deg", fw)
            .vessel_types(HSC_VESSEL_TYPES)
            .inputs(["stability.area_30_40_m_rad"])
            .criteria("Area 30-40 deg >= 0.030 m-rad")
            .limit(0.030, LimitType::Minimum)
            .reference(hsc("Annex 7", "1.3")),
        stability("HSC-2000-A7-1.4", "Maximum Righting Arm (GZ)", fw)
            .vessel_types(HSC_VESSEL_TYPES)
            .inputs(["stability.gz_max_m"])
            .criteria("GZ max >= 0.20 m")
            .limit(0.20, LimitType::Minimum)
            .reference(hsc("Annex 7", "1.4")),
        stability("HSC-2000-A7-1.5", "Angle of Maximum GZ", fw)
            .vessel_types(HSC_VESSEL_TYPES)
            .inputs(["stability.angle_of_max_gz_deg"])
            .criteria("Angle of GZ max >= 15 deg")
            .limit(15.0, LimitType::Minimum)
            .reference(hsc("Annex 7", "1.5"))
            .notes("Reduced angle permitted for high-speed monohulls"),
        stability("HSC-2000-A7-1.6", "Initial Metacentric Height (GM)", fw)
            .vessel_types(HSC_VESSEL_TYPES)
            .inputs(["stability.gm_m"])
            .criteria("GM >= 0.15 m")
            .limit(0.15, LimitType::Minimum)
            .reference(hsc("Annex 7", "1.6")),
    ]
}

fn uscg_subchapter_t_stability() -> Vec<RuleRequirement> {
    let fw = Framework::UscgSubchapterT;
    vec![
        stability("USCG-T-170.170", "Metacentric Height (GM) Weather Criterion", fw)
            .vessel_types(USCG_T_VESSEL_TYPES)
            .inputs(["stability.gm_m"])
            .criteria("GM >= 0.35 m for the wind heel criterion")
            .limit(0.35, LimitType::Minimum)
            .reference(cfr("46 CFR 170.170")),
        stability("USCG-T-170.173-1", "Area under GZ curve 0-30 deg", fw)
            .vessel_types(USCG_T_VESSEL_TYPES)
            .inputs(["stability.area_0_30_m_rad"])
            .criteria("Area 0-30 deg >= 0.055 m-rad")
            .limit(0.055, LimitType::Minimum)
            .reference(cfr("46 CFR 170.173(e)(1)")),
        stability("USCG-T-170.173-2", "Area under GZ curve 0-40 deg", fw)
            .vessel_types(USCG_T_VESSEL_TYPES)
            .inputs(["stability.area_0_40_m_rad"])
            .criteria("Area 0-40 deg >= 0.090 m-rad")
            .limit(0.090, LimitType::Minimum)
            .reference(cfr("46 CFR 170.173(e)(1)")),
        stability("USCG-T-170.173-3", "Area under GZ curve 30-40 deg", fw)
            .vessel_types(USCG_T_VESSEL_TYPES)
            .inputs(["stability.area_30_40_m_rad"])
            .criteria("Area 30-40 deg >= 0.030 m-rad")
            .limit(0.030, LimitType::Minimum)
            .reference(cfr("46 CFR 170.173(e)(1)")),
        stability("USCG-T-170.173-4", "Maximum Righting Arm (GZ)", fw)
            .vessel_types(USCG_T_VESSEL_TYPES)
            .inputs(["stability.gz_max_m"])
            .criteria("GZ max >= 0.20 m")
            .limit(0.20, LimitType::Minimum)
            .reference(cfr("46 CFR 170.173(e)(2)")),
        stability("USCG-T-170.173-5", "Angle of Maximum GZ", fw)
            .vessel_types(USCG_T_VESSEL_TYPES)
            .inputs(["stability.angle_of_max_gz_deg"])
            .criteria("Angle of GZ max >= 25 deg")
            .limit(25.0, LimitType::Minimum)
            .reference(cfr("46 CFR 170.173(e)(3)")),
        stability("USCG-T-178.340", "Range of Positive Stability", fw)
            .vessel_types(USCG_T_VESSEL_TYPES)
            .inputs(["stability.range_of_stability_deg"])
            .criteria("Range of positive stability >= 50 deg")
            .limit(50.0, LimitType::Minimum)
            .advisory()
            .reference(cfr("46 CFR 178.340")),
    ]
}

fn uscg_subchapter_t_other() -> Vec<RuleRequirement> {
    let fw = Framework::UscgSubchapterT;
    vec![
        RuleRequirement::new(
            "USCG-T-178.420",
            "Minimum Freeboard",
            RuleCategory::Freeboard,
            fw,
        )
        .vessel_types(USCG_T_VESSEL_TYPES)
        .service_restrictions(["protected", "partially_protected", "exposed"])
        .inputs(["hull.freeboard", "hull.lwl"])
        .criteria("Freeboard >= max(0.3 m, 0.01 x LWL)")
        .reference(cfr("46 CFR 178.420")),
        RuleRequirement::new(
            "USCG-T-177.300",
            "Hull Structure Plan Review",
            RuleCategory::Structural,
            fw,
        )
        .vessel_types(USCG_T_VESSEL_TYPES)
        .min_length(19.8)
        .inputs(["hull.lwl", "hull.depth"])
        .criteria("Hull structure approved by the Marine Safety Center")
        .reference(cfr("46 CFR 177.300"))
        .notes("Vessels over 65 ft require full plan review"),
        RuleRequirement::new(
            "USCG-T-181.300",
            "Fire Pump Capacity",
            RuleCategory::FireSafety,
            fw,
        )
        .vessel_types(USCG_T_VESSEL_TYPES)
        .inputs(["machinery.fire_pump_capacity_m3h"])
        .criteria("Fire pump capacity >= 11.4 m3/h")
        .limit(11.4, LimitType::Minimum)
        .reference(cfr("46 CFR 181.300")),
    ]
}

#[cfg(test)]
#[path = "corpus_tests.rs"]
mod tests;
