mod pricing;
mod selection;

pub use pricing::*;
pub use selection::*;
