//! Shared data structures for the yield prediction cycle
//!
//! - `conditions`: operator inputs and the fixed wire shapes exchanged with
//!   the remote yield model
//! - `band`: the low / medium / good classification used by every gauge

mod band;
mod conditions;

pub use band::*;
pub use conditions::*;
