//! Registry of the simulated lab tools.

use crate::acl::generate_acl;
use crate::lab;
use crate::registry::{FnTool, ToolRegistry};
use crate::subnet::calculate_subnet;

/// The nine simulated tools, plus the chatbot's names for two of them
/// (`check_interface`, `ping_device`).
pub fn simulated_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(FnTool::text(
        "calculate_subnet",
        "Calculate subnet details from CIDR notation (e.g., '192.168.1.0/24')",
        calculate_subnet,
    ));
    registry.register(FnTool::integer(
        "lookup_vlan",
        "Look up VLAN info by ID (e.g., 10, 20, 30, 99, 100)",
        lab::lookup_vlan,
    ));
    registry.register(FnTool::text(
        "check_port_status",
        "Check interface status (e.g., 'GigabitEthernet0/1')",
        lab::check_port_status,
    ));
    registry.register(FnTool::text(
        "ping_check",
        "Ping an IP address (e.g., '192.168.10.1', '8.8.8.8')",
        lab::ping_check,
    ));
    registry.register(FnTool::text(
        "get_routing_table",
        "Get routing table for a device (e.g., 'R1', 'R2', 'SW1')",
        lab::get_routing_table,
    ));
    registry.register(FnTool::text(
        "get_ospf_neighbors",
        "Get OSPF neighbors for a device (e.g., 'R1', 'R2', 'R3')",
        lab::get_ospf_neighbors,
    ));
    registry.register(FnTool::text(
        "get_bgp_summary",
        "Get BGP summary for a device (e.g., 'R1', 'R2')",
        lab::get_bgp_summary,
    ));
    registry.register(FnTool::text(
        "get_interface_errors",
        "Get error counters for interface (e.g., 'GigabitEthernet0/2')",
        lab::get_interface_errors,
    ));
    registry.register(FnTool::text(
        "generate_acl",
        "Generate ACL config. Format: 'permit|deny,source,dest,protocol,port'",
        generate_acl,
    ));

    registry.alias("check_interface", "check_port_status");
    registry.alias("ping_device", "ping_check");

    registry
}
