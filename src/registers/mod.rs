//! Register definitions for the EBYTE E32 family
//! Taken from the E32 user manuals (parameter setting command chapter).

mod parameters;
mod response;
mod version;

pub use parameters::*;
pub use response::*;
pub use version::*;
