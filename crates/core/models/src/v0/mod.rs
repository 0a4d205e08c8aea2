mod coordinators;
mod reports;

pub use coordinators::*;
pub use reports::*;
