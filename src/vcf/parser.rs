//! Line-oriented VCF parsing
//!
//! The parser is deliberately forgiving: it never fails on malformed text.
//! Blank lines and `#` header lines are ignored, data lines with fewer than
//! eight tab-separated columns are dropped, and everything else becomes one
//! [`VariantRecord`].

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::{debug, info};

use crate::error::PgxError;

use super::record::{Genotype, VariantRecord};

/// Minimum number of columns on a data line (CHROM through INFO)
pub const MIN_FIELDS: usize = 8;

/// Identifier placeholder for variants without an ID
const MISSING_ID: &str = ".";

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// This is common when files are exported from Windows applications or Excel.
///
/// # Examples
///
/// ```
/// use ferro_pgx::vcf::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}##fileformat=VCFv4.2"), "##fileformat=VCFv4.2");
/// assert_eq!(strip_bom("##fileformat=VCFv4.2"), "##fileformat=VCFv4.2");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Parse VCF text into variant records.
///
/// Output order follows input order and duplicate identifiers are kept.
///
/// # Examples
///
/// ```
/// use ferro_pgx::{parse_vcf, Genotype};
///
/// let text = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n\
///             7\t12345\t.\tA\tG\t50\tPASS\tDP=12\tGT\t1|0\n";
/// let records = parse_vcf(text);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].identifier, "chr7:12345");
/// assert_eq!(records[0].genotype, Genotype::Het);
/// ```
pub fn parse_vcf(text: &str) -> Vec<VariantRecord> {
    let (records, dropped) = match collect_records(text.split('\n').map(Ok::<_, Infallible>)) {
        Ok(parsed) => parsed,
        Err(never) => match never {},
    };
    info!(records = records.len(), dropped, "Parsed VCF text");
    records
}

/// Read variant records from a buffered reader.
///
/// Applies the same per-line rules as [`parse_vcf`]. Bytes that are not
/// valid UTF-8 are replaced with U+FFFD, so only IO errors are reported.
pub fn read_vcf<R: BufRead>(reader: R) -> Result<Vec<VariantRecord>, PgxError> {
    let (records, dropped) = collect_records(lossy_lines(reader))?;
    info!(records = records.len(), dropped, "Read VCF stream");
    Ok(records)
}

/// Read variant records, failing once more than `limit` bytes are read.
///
/// The bound applies to the decoded stream, so it also holds for
/// decompressed gzip input.
pub fn read_vcf_limited<R: Read>(reader: R, limit: u64) -> Result<Vec<VariantRecord>, PgxError> {
    let cap = limit.saturating_add(1);
    let mut bounded = BufReader::new(reader.take(cap));
    let records = read_vcf(&mut bounded)?;

    if bounded.get_ref().limit() == 0 {
        debug!(limit, "VCF stream exceeded the size limit");
        return Err(PgxError::FileTooLarge { size: cap, limit });
    }
    Ok(records)
}

/// Open and read a VCF file.
///
/// Files ending in `.gz` are decompressed transparently.
pub fn open_vcf<P: AsRef<Path>>(path: P) -> Result<Vec<VariantRecord>, PgxError> {
    open_vcf_limited(path, u64::MAX)
}

/// Open and read a VCF file, bounding the decompressed size to `limit` bytes.
pub fn open_vcf_limited<P: AsRef<Path>>(
    path: P,
    limit: u64,
) -> Result<Vec<VariantRecord>, PgxError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PgxError::Io {
        msg: format!("Failed to open VCF file '{}': {}", path.display(), e),
    })?;

    if path.extension().is_some_and(|ext| ext == "gz") {
        read_vcf_limited(MultiGzDecoder::new(file), limit)
    } else {
        read_vcf_limited(file, limit)
    }
}

/// Lines of `reader`, decoded lossily and numbered from 1 in errors.
fn lossy_lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = Result<String, PgxError>> {
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    std::iter::from_fn(move || {
        buf.clear();
        line_no += 1;
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(String::from_utf8_lossy(&buf).into_owned())),
            Err(e) => Some(Err(PgxError::Io {
                msg: format!("Failed to read VCF line {}: {}", line_no, e),
            })),
        }
    })
}

/// Apply the per-line rules to a sequence of lines.
///
/// Returns the records and the number of dropped data lines.
fn collect_records<I, L, E>(lines: I) -> Result<(Vec<VariantRecord>, usize), E>
where
    I: IntoIterator<Item = Result<L, E>>,
    L: AsRef<str>,
{
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line?;
        let line = if idx == 0 {
            strip_bom(line.as_ref())
        } else {
            line.as_ref()
        };

        match classify_line(line) {
            Line::Ignored => {}
            Line::Data(fields) => match record_from_fields(&fields) {
                Some(record) => records.push(record),
                None => {
                    dropped += 1;
                    debug!(
                        line = idx + 1,
                        fields = fields.len(),
                        "Skipping VCF line with too few columns"
                    );
                }
            },
        }
    }

    Ok((records, dropped))
}

/// Parse a single VCF line.
///
/// Returns `None` for blank lines, header lines and lines with fewer than
/// [`MIN_FIELDS`] columns.
pub fn parse_vcf_line(line: &str) -> Option<VariantRecord> {
    match classify_line(line) {
        Line::Ignored => None,
        Line::Data(fields) => record_from_fields(&fields),
    }
}

enum Line<'a> {
    Ignored,
    Data(Vec<&'a str>),
}

fn classify_line(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        Line::Ignored
    } else {
        Line::Data(line.split('\t').collect())
    }
}

fn record_from_fields(fields: &[&str]) -> Option<VariantRecord> {
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let chromosome = fields[0];
    let raw_pos = fields[1];
    let raw_id = fields[2];

    let identifier = if raw_id == MISSING_ID {
        format!("chr{}:{}", chromosome, raw_pos)
    } else {
        raw_id.to_string()
    };

    // CHROM(0) POS(1) ID(2) REF(3) ALT(4) QUAL(5) FILTER(6) INFO(7) FORMAT(8) SAMPLE(9..)
    let format_spec = fields.get(8).copied().unwrap_or_default().to_string();
    let samples = fields.get(9..).unwrap_or_default();
    let genotype = samples
        .first()
        .map(|s| Genotype::from_sample(s))
        .unwrap_or(Genotype::Unknown);

    Some(VariantRecord {
        chromosome: chromosome.to_string(),
        position: raw_pos.parse().ok(),
        identifier,
        reference_allele: fields[3].to_string(),
        alternate_allele: fields[4].to_string(),
        quality: fields[5].to_string(),
        filter_status: fields[6].to_string(),
        info: parse_info(fields[7]),
        format_spec,
        genotype,
        sample_count: samples.len(),
    })
}

/// Parse an INFO column into key-value pairs.
///
/// Pieces without `=` are flags and map to `"true"`. Only the first `=`
/// separates key from value.
pub fn parse_info(info: &str) -> BTreeMap<String, String> {
    info.split(';')
        .filter(|piece| !piece.is_empty())
        .map(|piece| match piece.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (piece.to_string(), "true".to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE_VCF: &str = "##fileformat=VCFv4.2
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSAMPLE1
22\t42128945\trs3892097\tC\tT\t50\tPASS\tDP=30;DB\tGT:DP\t0/1:30
22\t42126611\trs16947\tG\tA\t60\tPASS\tDP=25\tGT\t1|1

7\t12345\t.\tA\tG\t40\tPASS\t.\tGT\t0|0
22\t42130692\trs1065852\tG
";

    #[test]
    fn test_parse_vcf_records() {
        let records = parse_vcf(SAMPLE_VCF);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].chromosome, "22");
        assert_eq!(records[0].position, Some(42128945));
        assert_eq!(records[0].identifier, "rs3892097");
        assert_eq!(records[0].reference_allele, "C");
        assert_eq!(records[0].alternate_allele, "T");
        assert_eq!(records[0].quality, "50");
        assert_eq!(records[0].filter_status, "PASS");
        assert_eq!(records[0].format_spec, "GT:DP");
        assert_eq!(records[0].genotype, Genotype::Het);

        assert_eq!(records[1].genotype, Genotype::HomAlt);
        assert_eq!(records[2].identifier, "chr7:12345");
        assert_eq!(records[2].genotype, Genotype::HomRef);
    }

    #[test]
    fn test_parse_info() {
        let records = parse_vcf(SAMPLE_VCF);
        assert_eq!(records[0].info_value("DP"), Some("30"));
        assert_eq!(records[0].info_value("DB"), Some("true"));
        assert_eq!(records[2].info_value("."), Some("true"));

        let info = parse_info("AF=0.5;ANN=A|x=y;;SOMATIC");
        assert_eq!(info.get("AF").map(String::as_str), Some("0.5"));
        assert_eq!(info.get("ANN").map(String::as_str), Some("A|x=y"));
        assert_eq!(info.get("SOMATIC").map(String::as_str), Some("true"));
        assert_eq!(info.len(), 3);
    }

    #[test]
    fn test_eight_column_line_has_no_genotype() {
        let record = parse_vcf_line("1\t100\trs1\tA\tG\t30\tPASS\tDP=5").unwrap();
        assert_eq!(record.genotype, Genotype::Unknown);
        assert_eq!(record.format_spec, "");
        assert_eq!(record.sample_count, 0);
    }

    #[test]
    fn test_format_without_sample() {
        let record = parse_vcf_line("1\t100\trs1\tA\tG\t30\tPASS\tDP=5\tGT").unwrap();
        assert_eq!(record.format_spec, "GT");
        assert_eq!(record.genotype, Genotype::Unknown);
    }

    #[test]
    fn test_only_first_sample_is_used() {
        let record =
            parse_vcf_line("1\t100\trs1\tA\tG\t30\tPASS\t.\tGT\t1/1\t0/0\t0/1").unwrap();
        assert_eq!(record.genotype, Genotype::HomAlt);
        assert_eq!(record.sample_count, 3);
    }

    #[test]
    fn test_non_numeric_position() {
        let record = parse_vcf_line("7\tabc\t.\tA\tG\t30\tPASS\t.\tGT\t0/1").unwrap();
        assert_eq!(record.position, None);
        assert_eq!(record.identifier, "chr7:abc");

        let record = parse_vcf_line("7\t-5\trs9\tA\tG\t30\tPASS\t.\tGT\t0/1").unwrap();
        assert_eq!(record.position, None);
    }

    #[test]
    fn test_ignored_lines() {
        assert!(parse_vcf_line("").is_none());
        assert!(parse_vcf_line("   ").is_none());
        assert!(parse_vcf_line("#CHROM\tPOS").is_none());
        assert!(parse_vcf_line("1\t2\t3\t4\t5").is_none());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "1\t100\trs1\tA\tG\t30\tPASS\t.\tGT\t0/1\r\n1\t200\trs2\tA\tG\t30\tPASS\t.\tGT\t1/1\r\n";
        let records = parse_vcf(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].genotype, Genotype::Het);
        assert_eq!(records[1].genotype, Genotype::HomAlt);
    }

    #[test]
    fn test_leading_bom() {
        let text = "\u{feff}1\t100\trs1\tA\tG\t30\tPASS\t.\tGT\t0/1\n";
        let records = parse_vcf(text);
        assert_eq!(records[0].chromosome, "1");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let text = "1\t100\trs1\tA\tG\t30\tPASS\t.\tGT\t0/1\n1\t100\trs1\tA\tG\t30\tPASS\t.\tGT\t1/1\n";
        let records = parse_vcf(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier, records[1].identifier);
    }

    #[test]
    fn test_read_vcf_matches_parse_vcf() {
        let from_reader = read_vcf(Cursor::new(SAMPLE_VCF)).unwrap();
        assert_eq!(from_reader, parse_vcf(SAMPLE_VCF));
    }

    #[test]
    fn test_open_vcf_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.vcf.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(SAMPLE_VCF.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let records = open_vcf(&path).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}test"), "test");
        assert_eq!(strip_bom("test"), "test");
        assert_eq!(strip_bom("\u{feff}"), "");
        assert_eq!(strip_bom(""), "");
        // only a leading BOM is removed
        assert_eq!(strip_bom("a\u{feff}"), "a\u{feff}");
    }

    #[test]
    fn test_read_vcf_strips_bom() {
        let text = format!("\u{feff}{}", SAMPLE_VCF);
        let records = read_vcf(Cursor::new(text)).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut bytes = b"##source=caf\xe9\n".to_vec();
        bytes.extend_from_slice(b"22\t42126611\trs16947\tG\tA\t60\tPASS\tNOTE=\xff\tGT\t1|1\n");

        let records = read_vcf(Cursor::new(bytes.clone())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identifier, "rs16947");
        assert_eq!(records[0].genotype, Genotype::HomAlt);
        assert_eq!(records[0].info_value("NOTE"), Some("\u{fffd}"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.vcf");
        std::fs::write(&path, &bytes).unwrap();
        assert_eq!(open_vcf(&path).unwrap(), records);
    }

    #[test]
    fn test_read_vcf_limited() {
        let size = SAMPLE_VCF.len() as u64;
        assert_eq!(
            read_vcf_limited(Cursor::new(SAMPLE_VCF), size).unwrap(),
            parse_vcf(SAMPLE_VCF)
        );

        let err = read_vcf_limited(Cursor::new(SAMPLE_VCF), size - 1).unwrap_err();
        assert_eq!(
            err,
            PgxError::FileTooLarge {
                size,
                limit: size - 1
            }
        );
    }

    #[test]
    fn test_open_vcf_limited_bounds_decompressed_size() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        // highly compressible: a few hundred bytes on disk, 1 MiB decoded
        let mut text = String::from("##fileformat=VCFv4.2\n");
        while text.len() < 1024 * 1024 {
            text.push_str("##padding=AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA\n");
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bomb.vcf.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::best());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() < 64 * 1024);

        let err = open_vcf_limited(&path, 64 * 1024).unwrap_err();
        assert!(matches!(err, PgxError::FileTooLarge { limit, .. } if limit == 64 * 1024));
        assert!(open_vcf_limited(&path, 2 * 1024 * 1024).unwrap().is_empty());
    }

    #[test]
    fn test_open_vcf_missing_file() {
        let err = open_vcf("/nonexistent/sample.vcf").unwrap_err();
        assert!(matches!(err, PgxError::Io { .. }));
    }
}
