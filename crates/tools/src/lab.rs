//! Simulated lab data.
//!
//! A fixed snapshot of a small campus network (three routers, one switch)
//! that the agent and chatbot query instead of real devices.

struct Vlan {
    id: i64,
    name: &'static str,
    subnet: &'static str,
    gateway: &'static str,
}

const VLANS: &[Vlan] = &[
    Vlan { id: 10, name: "USERS", subnet: "192.168.10.0/24", gateway: "192.168.10.1" },
    Vlan { id: 20, name: "SERVERS", subnet: "192.168.20.0/24", gateway: "192.168.20.1" },
    Vlan { id: 30, name: "MANAGEMENT", subnet: "192.168.30.0/24", gateway: "192.168.30.1" },
    Vlan { id: 99, name: "NATIVE", subnet: "192.168.99.0/24", gateway: "192.168.99.1" },
    Vlan { id: 100, name: "VOICE", subnet: "10.10.100.0/24", gateway: "10.10.100.1" },
];

struct Port {
    interface: &'static str,
    status: &'static str,
    vlan: u16,
    speed: &'static str,
    duplex: &'static str,
}

const PORTS: &[Port] = &[
    Port { interface: "GigabitEthernet0/1", status: "up", vlan: 10, speed: "1000Mbps", duplex: "full" },
    Port { interface: "GigabitEthernet0/2", status: "down", vlan: 20, speed: "auto", duplex: "auto" },
    Port { interface: "GigabitEthernet0/3", status: "up", vlan: 30, speed: "100Mbps", duplex: "half" },
    Port { interface: "GigabitEthernet0/4", status: "admin down", vlan: 1, speed: "auto", duplex: "auto" },
];

struct PingResult {
    target: &'static str,
    status: &'static str,
    latency: &'static str,
    packet_loss: &'static str,
}

const PINGS: &[PingResult] = &[
    PingResult { target: "192.168.10.1", status: "success", latency: "1ms", packet_loss: "0%" },
    PingResult { target: "192.168.20.1", status: "success", latency: "2ms", packet_loss: "0%" },
    PingResult { target: "192.168.30.1", status: "timeout", latency: "N/A", packet_loss: "100%" },
    PingResult { target: "8.8.8.8", status: "success", latency: "15ms", packet_loss: "0%" },
    PingResult { target: "10.0.0.1", status: "success", latency: "1ms", packet_loss: "0%" },
];

const ROUTING_TABLES: &[(&str, &str)] = &[
    (
        "R1",
        "
Destination      Gateway         Interface        Protocol
0.0.0.0/0        10.0.0.1        Gi0/0           static
192.168.10.0/24  connected       Gi0/1           connected
192.168.20.0/24  192.168.1.2     Gi0/0           OSPF
192.168.30.0/24  192.168.1.3     Gi0/0           OSPF
10.0.0.0/8       connected       Gi0/0           connected",
    ),
    (
        "R2",
        "
Destination      Gateway         Interface        Protocol
0.0.0.0/0        10.0.0.1        Gi0/0           OSPF
192.168.10.0/24  192.168.1.1     Gi0/0           OSPF
192.168.20.0/24  connected       Gi0/1           connected
192.168.30.0/24  192.168.1.3     Gi0/0           OSPF",
    ),
    (
        "SW1",
        "
Destination      Gateway         Interface        Protocol
0.0.0.0/0        192.168.10.1    VLAN10          static
192.168.10.0/24  connected       VLAN10          connected",
    ),
];

const OSPF_NEIGHBORS: &[(&str, &str)] = &[
    (
        "R1",
        "
Neighbor ID     State       Address         Interface
192.168.1.2     FULL/DR     192.168.1.2     Gi0/0
192.168.1.3     FULL/BDR    192.168.1.3     Gi0/0",
    ),
    (
        "R2",
        "
Neighbor ID     State       Address         Interface
192.168.1.1     FULL/BDR    192.168.1.1     Gi0/0
192.168.1.3     FULL/DR     192.168.1.3     Gi0/0",
    ),
    (
        "R3",
        "
Neighbor ID     State       Address         Interface
192.168.1.1     FULL/DR     192.168.1.1     Gi0/0
192.168.1.2     FULL/BDR    192.168.1.2     Gi0/0",
    ),
];

const BGP_SUMMARIES: &[(&str, &str)] = &[
    (
        "R1",
        "
Neighbor        AS      State       PfxRcd  PfxSnt
10.0.0.2        65002   Established 150     120
10.0.0.3        65003   Established 200     120
10.0.0.4        65004   Idle        0       0",
    ),
    (
        "R2",
        "
Neighbor        AS      State       PfxRcd  PfxSnt
10.0.0.1        65001   Established 120     150
10.0.0.5        65005   Established 300     150",
    ),
];

struct InterfaceErrors {
    interface: &'static str,
    input: u32,
    output: u32,
    crc: u32,
    collisions: u32,
    status: &'static str,
}

const INTERFACE_ERRORS: &[InterfaceErrors] = &[
    InterfaceErrors { interface: "GigabitEthernet0/1", input: 0, output: 0, crc: 0, collisions: 0, status: "healthy" },
    InterfaceErrors { interface: "GigabitEthernet0/2", input: 1542, output: 23, crc: 847, collisions: 156, status: "errors detected" },
    InterfaceErrors { interface: "GigabitEthernet0/3", input: 5, output: 0, crc: 5, collisions: 0, status: "minor issues" },
];

const INTERFACE_PREFIXES: &[(&str, &str)] = &[
    ("gigabitethernet", "GigabitEthernet"),
    ("gig", "GigabitEthernet"),
    ("gi", "GigabitEthernet"),
    ("ge", "GigabitEthernet"),
    ("fastethernet", "FastEthernet"),
    ("fa", "FastEthernet"),
];

/// Expand an abbreviated interface name (`Gi0/1`, `gig 0/1`) to its full form.
///
/// Names that do not start with a known type come back trimmed but otherwise
/// unchanged.
pub fn normalize_interface(name: &str) -> String {
    let trimmed = name.trim();
    let lower = trimmed.to_ascii_lowercase();

    for (prefix, full) in INTERFACE_PREFIXES {
        if let Some(rest) = lower.strip_prefix(prefix) {
            let rest = rest.trim_start();
            if rest.starts_with(|c: char| c.is_ascii_digit()) {
                return format!("{}{}", full, rest);
            }
        }
    }

    trimmed.to_string()
}

fn find_device<'a>(table: &'a [(&'static str, &'static str)], device: &str) -> Option<&'a (&'static str, &'static str)> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(device.trim()))
}

pub fn lookup_vlan(vlan_id: i64) -> String {
    match VLANS.iter().find(|v| v.id == vlan_id) {
        Some(v) => format!(
            "VLAN {}: Name={}, Subnet={}, Gateway={}",
            v.id, v.name, v.subnet, v.gateway
        ),
        None => format!("VLAN {} not found in database", vlan_id),
    }
}

pub fn check_port_status(interface: &str) -> String {
    let name = normalize_interface(interface);
    match PORTS.iter().find(|p| p.interface == name) {
        Some(p) => format!(
            "{}: Status={}, VLAN={}, Speed={}, Duplex={}",
            p.interface, p.status, p.vlan, p.speed, p.duplex
        ),
        None => format!("Interface {} not found", interface),
    }
}

pub fn ping_check(target: &str) -> String {
    let target = target.trim();
    match PINGS.iter().find(|p| p.target == target) {
        Some(p) => format!(
            "Ping {}: {}, Latency: {}, Packet Loss: {}",
            p.target, p.status, p.latency, p.packet_loss
        ),
        None => format!("Ping {}: host unreachable", target),
    }
}

pub fn get_routing_table(device: &str) -> String {
    match find_device(ROUTING_TABLES, device) {
        Some((name, table)) => format!("Routing table for {}:\n{}", name, table),
        None => format!("Device {} not found", device),
    }
}

pub fn get_ospf_neighbors(device: &str) -> String {
    match find_device(OSPF_NEIGHBORS, device) {
        Some((name, neighbors)) => format!("OSPF neighbors for {}:\n{}", name, neighbors),
        None => format!("No OSPF data for {}", device),
    }
}

pub fn get_bgp_summary(device: &str) -> String {
    match find_device(BGP_SUMMARIES, device) {
        Some((name, summary)) => format!("BGP summary for {}:\n{}", name, summary),
        None => format!("No BGP data for {}", device),
    }
}

pub fn get_interface_errors(interface: &str) -> String {
    let name = normalize_interface(interface);
    match INTERFACE_ERRORS.iter().find(|e| e.interface == name) {
        Some(e) => format!(
            "{} errors: Input={}, Output={}, CRC={}, Collisions={}, Status={}",
            e.interface, e.input, e.output, e.crc, e.collisions, e.status
        ),
        None => format!("Interface {} not found", interface),
    }
}
