//! Retrieval over an index built from the shipped runbook.

use netassist_knowledge::embeddings::providers::TrigramProvider;
use netassist_knowledge::{
    build_index, open_index, search_documentation, BuildOptions, Retriever, VectorStore,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

const RUNBOOK: &str = include_str!("../../../docs/network-troubleshooting.md");

async fn built_store(temp: &TempDir) -> VectorStore {
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

    let stats = build_index(&options, &TrigramProvider::new(384)).await.unwrap();
    assert_eq!(stats.sources_count, 1);
    assert!(stats.chunks_count > 3);

    VectorStore::open(&options.index_dir, Arc::new(TrigramProvider::new(384))).unwrap()
}

#[tokio::test]
async fn test_exstart_query_finds_the_exstart_section() {
    let temp = TempDir::new().unwrap();
    let store = built_store(&temp).await;

    let results = store.similarity_search("OSPF stuck in EXSTART", 2).await.unwrap();
    assert!(!results.is_empty());
    assert!(results.len() <= 2);
    assert!(results[0].chunk.text.contains("EXSTART"));
    assert!(results[0].score >= results.last().unwrap().score);
}

#[tokio::test]
async fn test_crc_and_bgp_queries_find_their_sections() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(built_store(&temp).await);
    let retriever = Retriever::new(store.clone(), 3);

    let crc = retriever.retrieve("CRC errors").await.unwrap();
    assert_eq!(crc.len(), 3);
    assert!(crc.iter().any(|r| r.chunk.text.contains("CRC")));

    let bgp = search_documentation(&store, "BGP routes not advertised to peer", 2).await;
    assert!(bgp.contains("network"));
    assert!(bgp.contains("BGP"));
}

#[tokio::test]
async fn test_chunk_ranges_point_into_the_source() {
    let temp = TempDir::new().unwrap();
    let store = built_store(&temp).await;

    for result in store.similarity_search("SVI VLAN gateway", 3).await.unwrap() {
        let chunk = result.chunk;
        assert_eq!(chunk.source, "network-troubleshooting.md");
        assert_eq!(&RUNBOOK[chunk.start..chunk.end], chunk.text);
    }
}

#[test]
fn test_missing_index_is_reported() {
    let err = open_index(&PathBuf::from("/nonexistent/.netassist/index")).unwrap_err();
    assert!(err.to_string().contains("Run `netassist knowledge build` first"));
}
