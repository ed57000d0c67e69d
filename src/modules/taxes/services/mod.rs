mod tax_decomposer;

pub use tax_decomposer::{TaxDecomposer, GST_RATE};
