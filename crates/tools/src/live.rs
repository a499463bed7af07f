//! Live device tools.
//!
//! Each tool sends one or two show commands to a lab device through a
//! [`DeviceTransport`] and returns the raw output, prefixed for some tools.
//! Connection failures are rendered as text so the model can explain them.

use crate::registry::{Tool, ToolInput, ToolRegistry};
use async_trait::async_trait;
use netassist_core::{AppConfig, AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Operating system family of a device, which decides how it is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    CiscoXe,
    Linux,
}

fn default_ssh_port() -> u16 {
    22
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub host: String,
    #[serde(default = "default_ssh_port")]
    pub port: u16,
    pub platform: Platform,
}

impl Device {
    pub fn new(name: impl Into<String>, host: impl Into<String>, platform: Platform) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port: default_ssh_port(),
            platform,
        }
    }
}

/// Devices the live chatbot may talk to.
///
/// Loaded from a YAML file:
///
/// ```yaml
/// devices:
///   - name: R1
///     host: 10.255.255.11
///     platform: cisco_xe
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInventory {
    pub devices: Vec<Device>,
}

impl Default for DeviceInventory {
    /// The eight-device lab: four routers, three switches and a Linux host.
    fn default() -> Self {
        let xe = |name: &str, host: &str| Device::new(name, host, Platform::CiscoXe);
        Self {
            devices: vec![
                xe("R1", "10.255.255.11"),
                xe("R2", "10.255.255.12"),
                xe("R3", "10.255.255.13"),
                xe("R4", "10.255.255.14"),
                xe("Switch-R1", "10.255.255.21"),
                xe("Switch-R2", "10.255.255.22"),
                xe("Switch-R4", "10.255.255.24"),
                Device::new("Alpine-1", "10.255.255.110", Platform::Linux),
            ],
        }
    }
}

impl DeviceInventory {
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read device inventory {:?}: {}", path, e))
        })?;

        let inventory: DeviceInventory = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse device inventory {:?}: {}", path, e))
        })?;

        if inventory.devices.is_empty() {
            return Err(AppError::Config(format!(
                "Device inventory {:?} lists no devices",
                path
            )));
        }

        tracing::debug!("Loaded {} devices from {:?}", inventory.devices.len(), path);
        Ok(inventory)
    }

    /// Inventory named by the configuration, or the default lab.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        match config.devices_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.name.as_str()).collect()
    }

    /// Comma-separated device names.
    pub fn available(&self) -> String {
        self.names().join(", ")
    }
}

/// Login credentials for the lab devices.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Read `DEVICE_USERNAME` and `DEVICE_PASSWORD`, honouring a `.env` file.
    /// Both default to `admin`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            username: std::env::var("DEVICE_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            password: std::env::var("DEVICE_PASSWORD").unwrap_or_else(|_| "admin".to_string()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Sends a command to a device and returns its output.
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    async fn send_command(&self, device: &Device, command: &str) -> AppResult<String>;
}

/// Transport used when the binary is built without SSH support.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableTransport;

#[async_trait]
impl DeviceTransport for UnavailableTransport {
    async fn send_command(&self, _device: &Device, _command: &str) -> AppResult<String> {
        Err(AppError::Device(
            "live device access is not available in this build; rebuild with `--features ssh`"
                .to_string(),
        ))
    }
}

/// Overall state reported by `health_check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Critical,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => f.write_str("HEALTHY"),
            HealthStatus::Degraded => f.write_str("DEGRADED"),
            HealthStatus::Critical => f.write_str("CRITICAL"),
        }
    }
}

/// Count up and down lines of `show ip interface brief` output.
///
/// Lines mentioning `admin` are ignored. No down interfaces is healthy,
/// more up than down is degraded, anything else critical.
pub fn assess_interfaces(brief: &str) -> (HealthStatus, usize, usize) {
    let lines: Vec<String> = brief
        .lines()
        .map(str::to_lowercase)
        .filter(|line| !line.contains("admin"))
        .collect();

    let up = lines.iter().filter(|line| line.contains("up")).count();
    let down = lines.iter().filter(|line| line.contains("down")).count();

    let status = if down == 0 {
        HealthStatus::Healthy
    } else if up > down {
        HealthStatus::Degraded
    } else {
        HealthStatus::Critical
    };

    (status, up, down)
}

/// Shared state behind the live tools.
pub struct LiveLab {
    transport: Arc<dyn DeviceTransport>,
    inventory: DeviceInventory,
}

impl LiveLab {
    pub fn new(transport: Arc<dyn DeviceTransport>, inventory: DeviceInventory) -> Self {
        Self {
            transport,
            inventory,
        }
    }

    pub fn inventory(&self) -> &DeviceInventory {
        &self.inventory
    }

    /// Run `command` on `device`; errors come back as text.
    pub async fn send_command(&self, device: &str, command: &str) -> String {
        let Some(target) = self.inventory.get(device) else {
            return format!(
                "Error: Device '{}' not found. Available: {}",
                device,
                self.inventory.available()
            );
        };

        tracing::info!(device = %target.name, host = %target.host, "Sending: {}", command);
        match self.transport.send_command(target, command).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(device = %target.name, "Command failed: {}", e);
                format!("Error connecting to {}: {}", device, e)
            }
        }
    }

    pub async fn health_check(&self, device: &str) -> String {
        let Some(target) = self.inventory.get(device) else {
            return format!("Error: Device '{}' not found", device);
        };

        match self.probe_health(target).await {
            Ok(report) => report,
            Err(e) => format!("{} is CRITICAL - Error: {}", device, e),
        }
    }

    async fn probe_health(&self, device: &Device) -> AppResult<String> {
        if device.platform == Platform::Linux {
            let uptime = self.transport.send_command(device, "uptime").await?;
            return Ok(format!("{} is HEALTHY\nUptime: {}", device.name, uptime.trim()));
        }

        let uptime = self
            .transport
            .send_command(device, "show version | include uptime")
            .await?;
        let brief = self
            .transport
            .send_command(device, "show ip interface brief")
            .await?;
        let (status, up, down) = assess_interfaces(&brief);

        Ok(format!(
            "{} is {}\n{}\nInterfaces: {} up, {} down",
            device.name,
            status,
            uptime.trim(),
            up,
            down
        ))
    }

    pub async fn ospf_neighbors(&self, device: &str) -> String {
        let output = self.send_command(device, "show ip ospf neighbor").await;
        format!("OSPF Neighbors for {}:\n{}", device, output)
    }

    pub async fn bgp_summary(&self, device: &str) -> String {
        let output = self.send_command(device, "show ip bgp summary").await;
        format!("BGP Summary for {}:\n{}", device, output)
    }

    pub async fn interface_status(&self, device: &str, interface: Option<&str>) -> String {
        match interface {
            Some(interface) => {
                self.send_command(device, &format!("show interface {}", interface))
                    .await
            }
            None => self.send_command(device, "show ip interface brief").await,
        }
    }

    pub async fn routing_table(&self, device: &str) -> String {
        let output = self.send_command(device, "show ip route").await;
        format!("Routing Table for {}:\n{}", device, output)
    }

    pub async fn ping(&self, device: &str, target: &str) -> String {
        self.send_command(device, &format!("ping {} repeat 3", target))
            .await
    }

    pub async fn running_config(&self, device: &str, section: Option<&str>) -> String {
        match section {
            Some(section) => {
                self.send_command(device, &format!("show running-config | section {}", section))
                    .await
            }
            None => self.send_command(device, "show running-config").await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LiveAction {
    HealthCheck,
    OspfNeighbors,
    BgpSummary,
    InterfaceStatus,
    RoutingTable,
    Ping,
    RunningConfig,
    SendCommand,
}

impl LiveAction {
    const ALL: [LiveAction; 8] = [
        LiveAction::HealthCheck,
        LiveAction::OspfNeighbors,
        LiveAction::BgpSummary,
        LiveAction::InterfaceStatus,
        LiveAction::RoutingTable,
        LiveAction::Ping,
        LiveAction::RunningConfig,
        LiveAction::SendCommand,
    ];

    fn name(&self) -> &'static str {
        match self {
            LiveAction::HealthCheck => "health_check",
            LiveAction::OspfNeighbors => "ospf_neighbors",
            LiveAction::BgpSummary => "bgp_summary",
            LiveAction::InterfaceStatus => "interface_status",
            LiveAction::RoutingTable => "routing_table",
            LiveAction::Ping => "ping",
            LiveAction::RunningConfig => "running_config",
            LiveAction::SendCommand => "send_command",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            LiveAction::HealthCheck => "Check device health. Input: device name (e.g., \"R1\")",
            LiveAction::OspfNeighbors => "Get OSPF neighbors. Input: device name (e.g., \"R1\")",
            LiveAction::BgpSummary => "Get BGP summary. Input: device name (e.g., \"R1\")",
            LiveAction::InterfaceStatus => {
                "Get interface status. Input: device name, optionally interface (e.g., \"R1\" or \"R1,GigabitEthernet1\")"
            }
            LiveAction::RoutingTable => "Get routing table. Input: device name (e.g., \"R1\")",
            LiveAction::Ping => "Ping from a device. Input: device,target (e.g., \"R1,8.8.8.8\")",
            LiveAction::RunningConfig => {
                "Get running config. Input: device name, optionally section (e.g., \"R1\" or \"R1,router ospf\")"
            }
            LiveAction::SendCommand => {
                "Send any command. Input: device,command (e.g., \"R1,show version\")"
            }
        }
    }
}

/// Split `device,rest` on the first comma; an empty `rest` counts as absent.
fn split_pair(input: &str) -> (&str, Option<&str>) {
    match input.split_once(',') {
        Some((device, rest)) => {
            let rest = rest.trim();
            (device.trim(), (!rest.is_empty()).then_some(rest))
        }
        None => (input.trim(), None),
    }
}

struct LiveTool {
    action: LiveAction,
    lab: Arc<LiveLab>,
}

impl LiveTool {
    fn require_second<'a>(&self, second: Option<&'a str>, shape: &str) -> AppResult<&'a str> {
        second.ok_or_else(|| {
            AppError::Tool(format!(
                "{} needs two inputs separated by a comma: {}",
                self.action.name(),
                shape
            ))
        })
    }
}

#[async_trait]
impl Tool for LiveTool {
    fn name(&self) -> &str {
        self.action.name()
    }

    fn description(&self) -> &str {
        self.action.description()
    }

    async fn invoke(&self, input: ToolInput) -> AppResult<String> {
        let input = input.as_text();
        let (device, second) = split_pair(&input);
        let lab = &self.lab;

        let output = match self.action {
            LiveAction::InterfaceStatus => lab.interface_status(device, second).await,
            LiveAction::RunningConfig => lab.running_config(device, second).await,
            LiveAction::Ping => {
                let target = self.require_second(second, "device,target")?;
                lab.ping(device, target).await
            }
            LiveAction::SendCommand => {
                let command = self.require_second(second, "device,command")?;
                lab.send_command(device, command).await
            }
            // Single-argument tools take the whole input as the device name.
            LiveAction::HealthCheck => lab.health_check(input.trim()).await,
            LiveAction::OspfNeighbors => lab.ospf_neighbors(input.trim()).await,
            LiveAction::BgpSummary => lab.bgp_summary(input.trim()).await,
            LiveAction::RoutingTable => lab.routing_table(input.trim()).await,
        };

        Ok(output)
    }
}

/// Registry of the eight live device tools.
pub fn live_registry(transport: Arc<dyn DeviceTransport>, inventory: DeviceInventory) -> ToolRegistry {
    let lab = Arc::new(LiveLab::new(transport, inventory));
    let mut registry = ToolRegistry::new();
    for action in LiveAction::ALL {
        registry.register(LiveTool {
            action,
            lab: Arc::clone(&lab),
        });
    }
    registry
}

/// Transport for this build: SSH with credentials from the environment.
#[cfg(feature = "ssh")]
pub fn default_transport() -> Arc<dyn DeviceTransport> {
    Arc::new(crate::ssh::SshTransport::new(Credentials::from_env()))
}

/// Transport for this build: SSH support is not compiled in.
#[cfg(not(feature = "ssh"))]
pub fn default_transport() -> Arc<dyn DeviceTransport> {
    Arc::new(UnavailableTransport)
}
