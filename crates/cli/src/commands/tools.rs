//! Tools command handler.

use clap::Args;
use netassist_core::{config::AppConfig, AppError, AppResult};
use netassist_tools::{default_transport, live_registry, simulated_registry, DeviceInventory, ToolRegistry};

use super::rule;

/// Calls made by the demo run, in order.
const DEMO: [(&str, &str, &str); 10] = [
    ("1. Subnet Calculator:", "calculate_subnet", "10.0.0.0/22"),
    ("2. VLAN Lookup:", "lookup_vlan", "10"),
    ("3. Port Status:", "check_port_status", "GigabitEthernet0/1"),
    ("4. Ping Check:", "ping_check", "192.168.10.1"),
    ("", "ping_check", "192.168.30.1"),
    ("5. Routing Table:", "get_routing_table", "R1"),
    ("6. OSPF Neighbors:", "get_ospf_neighbors", "R1"),
    ("7. BGP Summary:", "get_bgp_summary", "R1"),
    ("8. Interface Errors:", "get_interface_errors", "GigabitEthernet0/2"),
    ("9. Generate ACL:", "generate_acl", "permit,192.168.10.0/24,192.168.20.0/24,tcp,443"),
];

/// List, demo or invoke the network tools
#[derive(Args, Debug)]
pub struct ToolsCommand {
    /// Tool to invoke; omit to run every simulated tool once
    pub name: Option<String>,

    /// Raw tool input (e.g. "192.168.1.0/24" or "R1,8.8.8.8")
    pub input: Option<String>,

    /// Print the tool list instead of running anything
    #[arg(short, long)]
    pub list: bool,

    /// Use the live device tools
    #[arg(long)]
    pub live: bool,
}

impl ToolsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing tools command");
        let registry = self.registry(config)?;

        if self.list {
            println!("{}", registry.describe());
            return Ok(());
        }

        match &self.name {
            Some(name) => {
                let input = self.input.as_deref().unwrap_or_default();
                println!("{}", registry.invoke(name, input).await?);
            }
            None if self.live => {
                return Err(AppError::Config(
                    "Name a live tool to run, or use --list".to_string(),
                ))
            }
            None => run_demo(&registry).await?,
        }

        Ok(())
    }

    fn registry(&self, config: &AppConfig) -> AppResult<ToolRegistry> {
        if self.live {
            Ok(live_registry(default_transport(), DeviceInventory::from_config(config)?))
        } else {
            Ok(simulated_registry())
        }
    }
}

async fn run_demo(registry: &ToolRegistry) -> AppResult<()> {
    println!("Testing Custom Tools");
    println!("{}", rule('=', 50));

    for (heading, name, input) in DEMO {
        if !heading.is_empty() {
            println!("\n{}", heading);
        }
        println!("{}", registry.invoke(name, input).await?);
    }

    Ok(())
}
