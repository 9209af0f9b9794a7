pub mod analysis;
pub mod landmark;

pub use analysis::*;
pub use landmark::*;
