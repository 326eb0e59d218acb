//! VCF (Variant Call Format) support
//!
//! This module turns loosely structured VCF text into normalized
//! [`VariantRecord`]s. It is not a full VCF implementation: only the first
//! sample column is read and genotypes are reduced to biallelic calls.

mod parser;
mod record;

pub use parser::{
    open_vcf, open_vcf_limited, parse_info, parse_vcf, parse_vcf_line, read_vcf, read_vcf_limited,
    strip_bom, MIN_FIELDS,
};
pub use record::{Genotype, VariantRecord};
