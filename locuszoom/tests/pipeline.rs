//! End-to-end scenarios over on-disk fixtures: a refFlat SQLite store
//! for the gene track and PLINK/CSV files for the association track.

use std::io::Write;
use std::path::{Path, PathBuf};

use locuszoom::{
    classify_ld_colors, load_plink_ld, merge_pvalue_ld, pack_gene_rows, scale_gene_rows,
    GeneStore, LocusError, PvalueFile, Window, DEFAULT_LABEL_SCALE,
};

fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{body}").unwrap();
    path
}

fn gene_db(dir: &Path) -> PathBuf {
    let db_path = dir.join("genes.db");
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute_batch(
        "CREATE TABLE refFlat (
            geneName TEXT, name TEXT, chrom TEXT, strand TEXT,
            txStart INTEGER, txEnd INTEGER, cdsStart INTEGER, cdsEnd INTEGER,
            exonCount INTEGER, exonStarts TEXT, exonEnds TEXT
        );
        INSERT INTO refFlat VALUES
            ('GENEA', 'NM_1', 'chr3', '+', 1000000, 1050000, 1000000, 1050000,
             2, '1000000,1030000,', '1010000,1050000,'),
            ('GENEB', 'NM_2', 'chr3', '-', 1040000, 1100000, 1040000, 1100000,
             1, '1040000,', '1100000,');",
    )
    .unwrap();
    db_path
}

#[test]
fn overlapping_genes_render_on_two_rows() {
    let dir = tempfile::tempdir().unwrap();
    let store = GeneStore { db_path: gene_db(dir.path()) };
    let window = Window { position_min: 1_000_000, position_max: 1_100_000 };

    let features = store.query_region("chr3", &window).unwrap();
    let rows = pack_gene_rows(&features, &window, DEFAULT_LABEL_SCALE).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0].gene_name, "GENEA");
    assert_eq!(rows[1][0].gene_name, "GENEB");

    let scaled = scale_gene_rows(&rows);
    assert!((scaled[0][0].tx_start - 1.0).abs() < 1e-12);
    assert!((scaled[1][0].tx_end - 1.1).abs() < 1e-12);
}

#[test]
fn target_anchor_and_neighbor_bucket() {
    let dir = tempfile::tempdir().unwrap();
    let pvalue_path = write_file(
        dir.path(),
        "pvalues.csv",
        "chromo,position,simple_pvalue\n\
         3,49721532,1e-8\n\
         3,49721600,0.0002\n\
         3,52000000,0.5\n",
    );
    let ld_path = write_file(
        dir.path(),
        "target.ld",
        " CHR_A         BP_A         SNP_A  CHR_B         BP_B         SNP_B            R2\n\
         3     49721532  chr3:49721532      3     49721532  chr3:49721532             1\n\
         3     49721532  chr3:49721532      3     49721600  chr3:49721600          0.55\n",
    );

    let window = Window::around(49_721_532, 1_000_000);
    let pvalues = PvalueFile::new(&pvalue_path).load_windowed(&window).unwrap();
    // the variant outside the window is gone before the merge
    assert_eq!(pvalues.height(), 2);

    let ld = load_plink_ld(&ld_path).unwrap();
    let merged = merge_pvalue_ld(&pvalues, &ld).unwrap();
    assert_eq!(merged.height(), 2);

    let groups = classify_ld_colors(&merged, "chr3:49721532").unwrap();

    // neighbor at r2 = 0.55 belongs to [0.4, 0.6)
    let bucket = &groups.regimes[2];
    assert_eq!(bucket.0.r2_min, 0.4);
    assert_eq!(bucket.1.len(), 1);
    assert!((bucket.1[0].0 - 49.7216).abs() < 1e-4);
    assert!(groups.unknown.is_empty());

    // the target variant is the anchor at y = 8
    assert!((groups.anchor.0 - 49.721532).abs() < 1e-9);
    assert!((groups.anchor.1 - 8.0).abs() < 1e-9);
}

#[test]
fn missing_target_variant_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let pvalue_path = write_file(
        dir.path(),
        "pvalues.csv",
        "chromo,position,simple_pvalue\n3,49721600,0.0002\n",
    );
    let ld_path = write_file(
        dir.path(),
        "target.ld",
        "CHR_A BP_A SNP_A CHR_B BP_B SNP_B R2\n\
         3 49721532 chr3:49721532 3 49721600 chr3:49721600 0.55\n",
    );

    let window = Window::around(49_721_532, 1_000_000);
    let pvalues = PvalueFile::new(&pvalue_path).load_windowed(&window).unwrap();
    let ld = load_plink_ld(&ld_path).unwrap();
    let merged = merge_pvalue_ld(&pvalues, &ld).unwrap();

    let err = classify_ld_colors(&merged, "chr3:49721532").unwrap_err();
    assert!(matches!(err, LocusError::MissingTargetVariant(_)));
}
