pub mod angle;
pub mod field;
pub mod table;

pub use angle::{AngleInput, AngleKind, AngleUnit};
pub use field::{CartesianTriple, FieldValue};
pub use table::{CatalogRow, CatalogTable};
