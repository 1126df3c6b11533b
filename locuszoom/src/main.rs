use std::env;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use locuszoom::helper_functions::{
    default_genotype_template, gene_db_path, genotype_panel_prefix, locuszoom_dir, resolve_plink,
};
use locuszoom::plink_ld::{generate_plink_ld_file, PlinkLdOptions};
use locuszoom::plotting::basic::{basic_locuszoom, BasicLocusZoomOptions};
use locuszoom::DEFAULT_LABEL_SCALE;

// rs3197999, a well-studied MST1 missense variant, makes a convenient
// default region for trying the pipeline against the example data.
const DEFAULT_TARGET_VARIANT: &str = "chr3:49721532";
const DEFAULT_TARGET_POS: i64 = 49721532;
const DEFAULT_RS_NAME: &str = "rs3197999";
const DEFAULT_ANCESTRY: &str = "EUR";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting locuszoom");

    let lz_dir = locuszoom_dir();
    let pvalue_file = PathBuf::from(
        env::var("LZ_PVALUE_FILE").unwrap_or_else(|_| "random_example_data.csv".to_string()),
    );
    let target_variant =
        env::var("LZ_TARGET_VARIANT").unwrap_or_else(|_| DEFAULT_TARGET_VARIANT.to_string());
    let target_pos: i64 = match env::var("LZ_TARGET_POS") {
        Ok(value) => value
            .parse()
            .context("LZ_TARGET_POS must be an integer position")?,
        Err(_) => DEFAULT_TARGET_POS,
    };
    let rs_name = env::var("LZ_RS_NAME").unwrap_or_else(|_| DEFAULT_RS_NAME.to_string());
    let ancestry = env::var("LZ_ANCESTRY").unwrap_or_else(|_| DEFAULT_ANCESTRY.to_string());
    let output_plot = PathBuf::from(
        env::var("LZ_OUTPUT").unwrap_or_else(|_| "my_example_locuszoom.png".to_string()),
    );

    let target_chromosome = target_variant
        .split(':')
        .next()
        .unwrap_or(target_variant.as_str())
        .to_string();

    let plink_path = resolve_plink()?;
    let scratch_ld_file =
        env::temp_dir().join(format!("{}_{ancestry}.ld", target_variant.replace(':', "_")));

    let template = default_genotype_template(&lz_dir);
    generate_plink_ld_file(&PlinkLdOptions {
        plink_path,
        bfile_prefix: genotype_panel_prefix(&template, &ancestry, &target_chromosome),
        target_variant: target_variant.clone(),
        window_kb: 1000,
        output_file: scratch_ld_file.clone(),
    })?;

    basic_locuszoom(&BasicLocusZoomOptions {
        pvalue_file,
        ld_file: scratch_ld_file,
        gene_db: gene_db_path(&lz_dir),
        target_variant,
        target_pos,
        fancy_name: rs_name,
        flank: 1_000_000,
        label_scale: DEFAULT_LABEL_SCALE,
        title: Some("Example with random data".to_string()),
        output_plot,
    })?;

    info!("Done");
    Ok(())
}
