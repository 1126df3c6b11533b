use polars::prelude::*;
use tracing::debug;

use crate::models::{LocusError, LocusResult, MEGABASE};

/// One LD strength interval and its display color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LdRegime {
    pub r2_min: f64,
    pub r2_max: f64,
    pub color: (u8, u8, u8),
}

/// The five LD color regimes, ascending; together they partition [0, 1].
/// Buckets are half-open [min, max) except the top one, which also takes
/// a perfect r2 of 1.0. Variants with no measured LD get a gray bucket
/// of their own.
pub const LD_REGIMES: [LdRegime; 5] = [
    LdRegime { r2_min: 0.0, r2_max: 0.2, color: (0x00, 0x00, 0x80) },
    LdRegime { r2_min: 0.2, r2_max: 0.4, color: (0x87, 0xce, 0xfa) },
    LdRegime { r2_min: 0.4, r2_max: 0.6, color: (0x00, 0xff, 0x00) },
    LdRegime { r2_min: 0.6, r2_max: 0.8, color: (0xff, 0xa5, 0x00) },
    LdRegime { r2_min: 0.8, r2_max: 1.0, color: (0xff, 0x00, 0x00) },
];

/// Point sets ready for the scatter renderer, as (position in Mb,
/// -log10 p) pairs. `unknown` is drawn first, then `regimes` in
/// ascending r2 order so strong-LD points stay visible, and the target
/// variant's `anchor` marker goes on top of everything.
#[derive(Debug, Clone, PartialEq)]
pub struct LdColorGroups {
    pub unknown: Vec<(f64, f64)>,
    pub regimes: Vec<(LdRegime, Vec<(f64, f64)>)>,
    pub anchor: (f64, f64),
}

/// Left-join LD values onto the p-value frame by variant id. Every
/// p-value row survives; `ld_r2` is null where PLINK had no pairing.
/// The p-value side's coordinates are kept.
///
/// An LD report with two rows for the same variant id has no defined
/// winner, so it is rejected outright rather than letting the join
/// pick one.
pub fn merge_pvalue_ld(pvalue_frame: &DataFrame, ld_frame: &DataFrame) -> LocusResult<DataFrame> {
    let ld_ids = ld_frame.column("variant")?;
    let distinct = ld_ids.as_materialized_series().n_unique()?;
    if distinct != ld_frame.height() {
        return Err(LocusError::Parse(format!(
            "LD report has duplicate variant ids ({} rows, {distinct} distinct)",
            ld_frame.height()
        )));
    }

    let merged = pvalue_frame.join(
        ld_frame,
        ["variant"],
        ["variant"],
        JoinArgs::from(JoinType::Left),
        None,
    )?;
    let merged = merged.select(["chrom", "position", "pvalue", "variant", "ld_r2"])?;
    debug!("merged frame holds {} variants", merged.height());
    Ok(merged)
}

/// Partition merged records into the render buckets.
///
/// The target variant is never bucketed; its position and -log10 p
/// become the anchor marker, and its absence from the merged set leaves
/// the anchor undefined, which is an error. Records with no measured LD
/// go to `unknown`.
pub fn classify_ld_colors(merged: &DataFrame, target_variant: &str) -> LocusResult<LdColorGroups> {
    let position_col = merged.column("position")?.cast(&DataType::Float64)?;
    let positions = position_col.f64()?;
    let pvalue_col = merged.column("pvalue")?.cast(&DataType::Float64)?;
    let pvalues = pvalue_col.f64()?;
    let ld_col = merged.column("ld_r2")?.cast(&DataType::Float64)?;
    let ld_values = ld_col.f64()?;
    let variant_col = merged.column("variant")?;
    let variants = variant_col.str()?;

    let mut regimes: Vec<(LdRegime, Vec<(f64, f64)>)> =
        LD_REGIMES.iter().map(|regime| (*regime, Vec::new())).collect();
    let mut unknown: Vec<(f64, f64)> = Vec::new();
    let mut anchor: Option<(f64, f64)> = None;

    let last = LD_REGIMES.len() - 1;
    for i in 0..merged.height() {
        let variant = variants
            .get(i)
            .ok_or_else(|| LocusError::Parse("null variant id in merged records".to_string()))?;
        let position = positions
            .get(i)
            .ok_or_else(|| LocusError::Parse("null position in merged records".to_string()))?;
        let pvalue = pvalues
            .get(i)
            .ok_or_else(|| LocusError::Parse("null p-value in merged records".to_string()))?;

        let point = (position / MEGABASE, neg_log10(pvalue)?);
        if variant == target_variant {
            anchor = Some(point);
            continue;
        }
        match ld_values.get(i) {
            None => unknown.push(point),
            Some(ld) => {
                for (j, (regime, points)) in regimes.iter_mut().enumerate() {
                    if regime.r2_min <= ld && (ld < regime.r2_max || (j == last && ld <= regime.r2_max))
                    {
                        points.push(point);
                        break;
                    }
                }
            }
        }
    }

    let anchor = anchor.ok_or_else(|| LocusError::MissingTargetVariant(target_variant.to_string()))?;
    debug!(
        "classified {} unknown-LD points, {} regime points",
        unknown.len(),
        regimes.iter().map(|(_, points)| points.len()).sum::<usize>()
    );
    Ok(LdColorGroups { unknown, regimes, anchor })
}

fn neg_log10(pvalue: f64) -> LocusResult<f64> {
    if pvalue <= 0.0 {
        return Err(LocusError::Domain(pvalue));
    }
    Ok(-pvalue.log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged_fixture() -> DataFrame {
        df![
            "chrom" => &["3", "3", "3", "3"],
            "position" => &[49_721_532i64, 49_721_600, 49_800_000, 49_900_000],
            "pvalue" => &[1e-8, 2e-4, 0.03, 0.5],
            "variant" => &[
                "chr3:49721532",
                "chr3:49721600",
                "chr3:49800000",
                "chr3:49900000",
            ],
            "ld_r2" => &[Some(1.0), Some(0.55), Some(0.2), None],
        ]
        .unwrap()
    }

    #[test]
    fn regimes_partition_the_unit_interval() {
        assert_eq!(LD_REGIMES[0].r2_min, 0.0);
        assert_eq!(LD_REGIMES[LD_REGIMES.len() - 1].r2_max, 1.0);
        for pair in LD_REGIMES.windows(2) {
            assert_eq!(pair[0].r2_max, pair[1].r2_min);
        }
        for regime in &LD_REGIMES {
            assert!(regime.r2_min < regime.r2_max);
        }
    }

    #[test]
    fn buckets_and_anchor() {
        let groups = classify_ld_colors(&merged_fixture(), "chr3:49721532").unwrap();

        // boundary value 0.2 belongs to [0.2, 0.4), not [0, 0.2)
        assert!(groups.regimes[0].1.is_empty());
        assert_eq!(groups.regimes[1].1.len(), 1);
        // r2 = 0.55 lands in [0.4, 0.6)
        assert_eq!(groups.regimes[2].1.len(), 1);
        // unmeasured LD goes to the gray bucket
        assert_eq!(groups.unknown.len(), 1);

        let (x, y) = groups.anchor;
        assert!((x - 49.721532).abs() < 1e-9);
        assert!((y - 8.0).abs() < 1e-9);
        // the target variant is in no bucket
        let bucketed: usize = groups.regimes.iter().map(|(_, p)| p.len()).sum();
        assert_eq!(bucketed + groups.unknown.len(), 3);
    }

    #[test]
    fn perfect_ld_neighbor_lands_in_the_top_regime() {
        let merged = df![
            "chrom" => &["3", "3"],
            "position" => &[100i64, 200],
            "pvalue" => &[1e-4, 1e-6],
            "variant" => &["chr3:100", "chr3:200"],
            "ld_r2" => &[Some(0.1), Some(1.0)],
        ]
        .unwrap();
        let groups = classify_ld_colors(&merged, "chr3:100").unwrap();
        assert_eq!(groups.regimes[4].1.len(), 1);
    }

    #[test]
    fn missing_target_variant_fails() {
        let err = classify_ld_colors(&merged_fixture(), "chr3:1").unwrap_err();
        assert!(matches!(err, LocusError::MissingTargetVariant(_)));
    }

    #[test]
    fn nonpositive_pvalue_is_a_domain_error() {
        let merged = df![
            "chrom" => &["3", "3"],
            "position" => &[100i64, 200],
            "pvalue" => &[0.0, 1e-6],
            "variant" => &["chr3:100", "chr3:200"],
            "ld_r2" => &[Some(0.1), Some(0.5)],
        ]
        .unwrap();
        let err = classify_ld_colors(&merged, "chr3:200").unwrap_err();
        assert!(matches!(err, LocusError::Domain(_)));
    }

    #[test]
    fn left_join_keeps_every_pvalue_row() {
        let pvalues = df![
            "chrom" => &["3", "3", "3"],
            "position" => &[100i64, 200, 300],
            "pvalue" => &[0.1, 0.2, 0.3],
            "variant" => &["chr3:100", "chr3:200", "chr3:300"],
        ]
        .unwrap();
        let ld = df![
            "target_variant" => &["chr3:100"],
            "chrom" => &["3"],
            "position" => &[200i64],
            "variant" => &["chr3:200"],
            "ld_r2" => &[0.7],
        ]
        .unwrap();

        let merged = merge_pvalue_ld(&pvalues, &ld).unwrap();
        assert_eq!(merged.height(), 3);

        // p-value fields pass through unchanged
        let out_pvalues = merged.column("pvalue").unwrap();
        let out_pvalues = out_pvalues.f64().unwrap();
        assert_eq!(out_pvalues.get(0).unwrap(), 0.1);
        assert_eq!(out_pvalues.get(2).unwrap(), 0.3);

        let ld_r2 = merged.column("ld_r2").unwrap();
        let ld_r2 = ld_r2.f64().unwrap();
        assert!(ld_r2.get(0).is_none());
        assert_eq!(ld_r2.get(1).unwrap(), 0.7);
        assert!(ld_r2.get(2).is_none());
    }

    #[test]
    fn duplicate_ld_ids_are_rejected() {
        let pvalues = df![
            "chrom" => &["3"],
            "position" => &[100i64],
            "pvalue" => &[0.1],
            "variant" => &["chr3:100"],
        ]
        .unwrap();
        let ld = df![
            "target_variant" => &["chr3:100", "chr3:100"],
            "chrom" => &["3", "3"],
            "position" => &[200i64, 200],
            "variant" => &["chr3:200", "chr3:200"],
            "ld_r2" => &[0.7, 0.2],
        ]
        .unwrap();
        let err = merge_pvalue_ld(&pvalues, &ld).unwrap_err();
        assert!(matches!(err, LocusError::Parse(_)));
    }
}
