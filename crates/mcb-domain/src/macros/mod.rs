//! Domain-internal macros, re-exported at the crate root via `#[macro_use]`.

#[macro_use]
pub mod entities;
#[macro_use]
pub mod logging;
#[macro_use]
pub mod registry;
