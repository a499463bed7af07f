//! Network tools for NetAssist.
//!
//! - Subnet calculator and ACL generator
//! - Simulated lab data (VLANs, ports, ping, routing, OSPF, BGP, error counters)
//! - A tool registry the agent and chatbot dispatch through
//! - Live device tools over a pluggable transport, with SSH behind the `ssh` feature

pub mod acl;
pub mod lab;
pub mod live;
pub mod registry;
pub mod simulated;
#[cfg(feature = "ssh")]
pub mod ssh;
pub mod subnet;

// Re-export commonly used types
pub use acl::generate_acl;
pub use live::{
    assess_interfaces, default_transport, live_registry, Credentials, Device, DeviceInventory,
    DeviceTransport, HealthStatus, LiveLab, Platform, UnavailableTransport,
};
pub use registry::{clean_input, FnTool, ParamKind, Tool, ToolInput, ToolRegistry};
pub use simulated::simulated_registry;
#[cfg(feature = "ssh")]
pub use ssh::SshTransport;
pub use subnet::{calculate_subnet, parse_subnet, SubnetDetails};
