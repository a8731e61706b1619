//! Infrastructure-facing seams owned by the domain layer.
//!
//! The domain never depends on `tracing` directly; it exposes a logging
//! facade that the infrastructure layer wires up at startup instead.

pub mod logging;
