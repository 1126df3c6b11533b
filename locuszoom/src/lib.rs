//! Locus zoom plots: genomic-region visualizations combining
//! association p-values colored by linkage disequilibrium to a target
//! variant with a gene-model track, on a shared coordinate axis.

pub mod analysis;
pub mod data_handling;
pub mod helper_functions;
pub mod models;
pub mod plink_ld;
pub mod plotting;

pub use analysis::ld_color::{classify_ld_colors, merge_pvalue_ld, LdColorGroups, LdRegime, LD_REGIMES};
pub use analysis::row_pack::{pack_gene_rows, scale_gene_rows, DEFAULT_LABEL_SCALE};
pub use data_handling::gene_store::GeneStore;
pub use data_handling::ld_report::load_plink_ld;
pub use data_handling::pvalue::{window_positions, PvalueFile};
pub use models::{
    GeneFeature, GeneRow, LocusError, LocusResult, ScaledGeneFeature, ScaledGeneRow, Strand,
    Window, MEGABASE,
};
pub use plink_ld::{generate_plink_ld_file, PlinkLdOptions};
pub use plotting::basic::{basic_locuszoom, BasicLocusZoomOptions};
pub use plotting::multi_ancestry::{multi_ancestry_locuszoom, MultiAncestryOptions};
pub use plotting::prepare_gene_rows;
