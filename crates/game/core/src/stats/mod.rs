//! Stat model and resource derivation.
//!
//! ```text
//! [ Attributes (stored) ]
//!      ↓ sigma
//! [ Growth magnitude ]
//!      ↓
//! [ Resource maximums: HP / SP / MP ]
//! ```
//!
//! Everything below the attribute record is a pure function of it.

pub mod attributes;
pub mod growth;
pub mod resources;

pub use attributes::{Attribute, Attributes};
pub use growth::{GROWTH_CAP, SIGMA_AT_CAP, sigma};
pub use resources::{
    HP_FLOOR, MP_FLOOR, ResourceKind, ResourceMaximums, ResourceMeter, SP_FLOOR, calc_hp, calc_mp,
    calc_sp,
};
