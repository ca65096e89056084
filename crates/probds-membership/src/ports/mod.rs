//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API that callers use against any filter
//! - Driven Ports (outbound) - The hash primitive the filters depend on

pub mod inbound;
pub mod outbound;

pub use inbound::MembershipFilter;
pub use outbound::HashProvider;
