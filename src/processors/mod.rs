pub mod normalizer;
pub mod report;

pub use normalizer::{
    normalize_gaia, normalize_harris_auxiliary, normalize_harris_ident_pos, CatalogNormalizer,
    Catalogs, SourceSpec,
};
pub use report::{NormalizationReport, SourceReport};
