use thiserror::Error;

/// Nucleotides per display unit on the shared x axis.
pub const MEGABASE: f64 = 1e6;

/// Everything that can go wrong during one plot invocation. All of these
/// are terminal for the invocation; the caller decides whether to skip or
/// abort its batch.
#[derive(Debug, Error)]
pub enum LocusError {
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("target variant '{0}' not present in merged records")]
    MissingTargetVariant(String),
    #[error("p-value {0} is outside (0, 1]")]
    Domain(f64),
    #[error("precondition violated: {0}")]
    Precondition(String),
    #[error("render error: {0}")]
    Render(String),
    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}

pub type LocusResult<T> = Result<T, LocusError>;

/// Transcriptional strand of a gene feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    pub fn from_symbol(symbol: &str) -> LocusResult<Strand> {
        match symbol {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            other => Err(LocusError::Parse(format!("unknown strand '{other}'"))),
        }
    }
}

/// One gene transcript as returned by the annotation store. Coordinates
/// are 1-based nucleotides; exon i spans [exon_starts[i], exon_ends[i])
/// and both lists have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneFeature {
    pub chrom: String,
    pub tx_start: i64,
    pub tx_end: i64,
    pub strand: Strand,
    pub gene_name: String,
    pub exon_starts: Vec<i64>,
    pub exon_ends: Vec<i64>,
}

impl GeneFeature {
    /// Midpoint of the transcript span, used to center the label.
    pub fn center(&self) -> f64 {
        (self.tx_start + self.tx_end) as f64 / 2.0
    }
}

/// A gene feature rescaled to megabases for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledGeneFeature {
    pub chrom: String,
    pub tx_start: f64,
    pub tx_end: f64,
    pub strand: Strand,
    pub gene_name: String,
    pub exon_starts: Vec<f64>,
    pub exon_ends: Vec<f64>,
}

/// One display row of non-colliding gene features.
pub type GeneRow = Vec<GeneFeature>;
pub type ScaledGeneRow = Vec<ScaledGeneFeature>;

/// Genomic coordinate range on display, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub position_min: i64,
    pub position_max: i64,
}

impl Window {
    pub fn around(target_pos: i64, flank: i64) -> Window {
        Window {
            position_min: target_pos - flank,
            position_max: target_pos + flank,
        }
    }

    pub fn span(&self) -> i64 {
        self.position_max - self.position_min
    }

    pub fn contains(&self, position: i64) -> bool {
        self.position_min <= position && position <= self.position_max
    }
}
