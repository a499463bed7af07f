//! Tool results as the agent sees them, through the simulated registry.

use netassist_tools::{parse_subnet, simulated_registry};

#[tokio::test]
async fn test_every_simulated_tool_answers() {
    let registry = simulated_registry();
    let cases = [
        ("calculate_subnet", "172.16.0.0/20", "Usable Hosts: 4094"),
        ("lookup_vlan", "30", "Name=MANAGEMENT"),
        ("check_port_status", "GigabitEthernet0/3", "Duplex=half"),
        ("ping_check", "192.168.10.1", "Ping 192.168.10.1: success"),
        ("get_routing_table", "R2", "Routing table for R2:"),
        ("get_ospf_neighbors", "R1", "OSPF neighbors for R1:"),
        ("get_bgp_summary", "R2", "10.0.0.5        65005   Established"),
        ("get_interface_errors", "GigabitEthernet0/3", "Status=minor issues"),
        (
            "generate_acl",
            "deny,10.0.0.0/8,192.168.30.0/24,tcp,22",
            " deny tcp 10.0.0.0/8 any 192.168.30.0/24 any eq 22\n",
        ),
    ];

    for (tool, input, expected) in cases {
        let output = registry.invoke(tool, input).await.unwrap();
        assert!(
            output.contains(expected),
            "{}({}) returned {:?}",
            tool,
            input,
            output
        );
    }
}

#[test]
fn test_network_and_broadcast_are_consistent() {
    for cidr in ["10.0.0.0/8", "192.168.1.130/25", "172.31.255.1/30", "203.0.113.7/29"] {
        let details = parse_subnet(cidr).unwrap();
        let network = match details.network {
            std::net::IpAddr::V4(a) => u32::from(a),
            _ => unreachable!(),
        };
        let broadcast = match details.broadcast {
            std::net::IpAddr::V4(a) => u32::from(a),
            _ => unreachable!(),
        };
        let size = broadcast - network + 1;

        assert!(size.is_power_of_two(), "{}", cidr);
        assert_eq!(network % size, 0, "{}", cidr);
        assert_eq!(details.total, size.to_string());
        assert_eq!(details.usable, (size - 2).to_string());
    }
}
