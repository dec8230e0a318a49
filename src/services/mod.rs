//! Service Layer
//!
//! One service per resource. Services own validation, uniqueness checks
//! and business-rule guards, and call into the repository layer for
//! persistence. Repositories never enforce rules themselves.

pub mod floor;
pub mod invoice;

pub use floor::FloorService;
pub use invoice::InvoiceService;
