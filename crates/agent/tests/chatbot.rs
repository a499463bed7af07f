//! End-to-end chatbot turns against a scripted model.

use async_trait::async_trait;
use netassist_agent::{Assistant, DocSource, NetworkChatbot, PromptResolver, RouterDecision};
use netassist_core::{AppResult, ChatMessage};
use netassist_knowledge::embeddings::providers::TrigramProvider;
use netassist_knowledge::{build_index, BuildOptions, VectorStore};
use netassist_llm::ScriptedClient;
use netassist_tools::{Device, DeviceInventory, DeviceTransport, Platform};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const RUNBOOK: &str = include_str!("../../../docs/network-troubleshooting.md");

fn assistant(client: &Arc<ScriptedClient>) -> Assistant {
    Assistant::new(client.clone(), "qwen2.5", PromptResolver::builtin())
}

async fn runbook_docs(temp: &TempDir) -> DocSource {
    let docs_dir = temp.path().join("docs");
    fs::create_dir_all(&docs_dir).unwrap();
    fs::write(docs_dir.join("network-troubleshooting.md"), RUNBOOK).unwrap();

    let options = BuildOptions {
        docs_dir,
        extension: "md".to_string(),
        index_dir: temp.path().join(".netassist/index"),
        chunk_size: 500,
        chunk_overlap: 100,
    };
    build_index(&options, &TrigramProvider::new(384)).await.unwrap();

    let store = VectorStore::open(&options.index_dir, Arc::new(TrigramProvider::new(384)));
    DocSource::from_open(store, 2)
}

/// Records commands and answers with fixed output.
#[derive(Default)]
struct RecordingTransport {
    commands: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl DeviceTransport for RecordingTransport {
    async fn send_command(&self, device: &Device, command: &str) -> AppResult<String> {
        self.commands
            .lock()
            .unwrap()
            .push((device.name.clone(), command.to_string()));
        Ok("Neighbor ID     Pri   State           Dead Time   Address\n2.2.2.2           1   FULL/DR         00:00:38    10.0.12.2".to_string())
    }
}

#[tokio::test]
async fn test_docs_route_feeds_runbook_passages() {
    let temp = TempDir::new().unwrap();
    let docs = runbook_docs(&temp).await;
    let client = Arc::new(ScriptedClient::new([
        "ACTION: DOCS\nQUERY: OSPF stuck in EXSTART",
        "Check for an MTU mismatch.",
    ]));
    let mut bot = NetworkChatbot::simulated(&assistant(&client), docs).unwrap();

    let turn = bot.chat("How do I fix OSPF stuck in EXSTART?").await.unwrap();
    assert_eq!(turn.trace.as_deref(), Some("  [Docs: OSPF stuck in EXSTART]"));
    assert_eq!(turn.answer, "Check for an MTU mismatch.");

    let requests = client.requests();
    let response_prompt = requests[1].text();
    assert!(response_prompt.contains("EXSTART"));
    assert!(!response_prompt.contains("No relevant documentation found."));
}

#[tokio::test]
async fn test_history_is_replayed_on_later_turns() {
    let client = Arc::new(ScriptedClient::new([
        "ACTION: TOOL\nTOOL_NAME: get_ospf_neighbors\nTOOL_INPUT: R1",
        "R1 has two FULL neighbors.",
        "ACTION: DIRECT\nANSWER: Both are in area 0.",
    ]));
    let mut bot =
        NetworkChatbot::simulated(&assistant(&client), DocSource::Unavailable("none".into()))
            .unwrap();

    bot.chat("Show OSPF neighbors on R1").await.unwrap();
    let second = bot.chat("Which area are they in?").await.unwrap();
    assert_eq!(second.answer, "Both are in area 0.");

    let requests = client.requests();
    assert_eq!(requests.len(), 3);
    let replayed = requests[2].messages();
    assert_eq!(replayed[1], ChatMessage::human("Show OSPF neighbors on R1"));
    assert_eq!(replayed[2], ChatMessage::ai("R1 has two FULL neighbors."));
    assert_eq!(replayed[3], ChatMessage::human("Which area are they in?"));

    assert_eq!(bot.history().len(), 4);
}

#[tokio::test]
async fn test_direct_without_answer_falls_back_to_knowledge() {
    let client = Arc::new(ScriptedClient::new([
        "ACTION: DIRECT",
        "A /30 has two usable hosts.",
    ]));
    let mut bot =
        NetworkChatbot::simulated(&assistant(&client), DocSource::Unavailable("none".into()))
            .unwrap();

    let turn = bot.chat("How many hosts in a /30?").await.unwrap();
    assert_eq!(turn.decision, RouterDecision::Direct { answer: None });
    assert!(client.requests()[1]
        .text()
        .contains("Answer based on your networking knowledge."));
}

#[tokio::test]
async fn test_live_tool_runs_on_device() {
    let transport = Arc::new(RecordingTransport::default());
    let inventory = DeviceInventory {
        devices: vec![Device::new("R1", "10.255.255.11", Platform::CiscoXe)],
    };
    let client = Arc::new(ScriptedClient::new([
        "ACTION: TOOL\nTOOL_NAME: ospf_neighbors\nTOOL_INPUT: R1",
        "R1 is FULL with 2.2.2.2.",
    ]));
    let mut bot = NetworkChatbot::live(
        &assistant(&client),
        DocSource::Unavailable("none".into()),
        transport.clone(),
        inventory,
    )
    .unwrap();

    let turn = bot.chat("Check OSPF on R1").await.unwrap();
    assert_eq!(turn.trace.as_deref(), Some("  [Executing: ospf_neighbors(R1)]"));
    assert_eq!(
        transport.commands.lock().unwrap().as_slice(),
        &[("R1".to_string(), "show ip ospf neighbor".to_string())]
    );

    let requests = client.requests();
    assert!(requests[0].text().contains("Available devices: R1"));
    assert!(requests[1].text().contains("OSPF Neighbors for R1:"));
}

#[tokio::test]
async fn test_live_two_argument_tool_without_comma_is_a_tool_error() {
    let client = Arc::new(ScriptedClient::new([
        "ACTION: TOOL\nTOOL_NAME: ping\nTOOL_INPUT: R1",
        "Which target should I ping?",
    ]));
    let mut bot = NetworkChatbot::live(
        &assistant(&client),
        DocSource::Unavailable("none".into()),
        Arc::new(RecordingTransport::default()),
        DeviceInventory::default(),
    )
    .unwrap();

    bot.chat("Ping from R1").await.unwrap();
    assert!(client.requests()[1]
        .text()
        .contains("Tool error: ping needs two inputs separated by a comma: device,target"));
}
