// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use campsite_booking::rag::{DocumentIngestor, HashingEmbedder, RagRetriever, RagStore};
use std::sync::Arc;
use tempfile::TempDir;

const RULES: &str = "Le silence est de rigueur entre 23h et 7h sur tout le camping.\n\n\
Les barbecues électriques sont autorisés, les feux au sol sont interdits.";

#[tokio::test]
async fn test_documents_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("knowledge").join("rag_store.json");
    let embedder = Arc::new(HashingEmbedder::default());

    let doc_id = {
        let store = Arc::new(RagStore::open(&path).await);
        let ingestor = DocumentIngestor::new(store, embedder.clone(), 20);
        ingestor.ingest("reglement.txt", RULES).await.unwrap().id
    };
    assert!(path.exists());

    let store = Arc::new(RagStore::open(&path).await);
    let stats = store.stats().await;
    assert_eq!(stats.documents, 1);
    assert_eq!(stats.chunks, 2);
    assert_eq!(store.documents().await[0].id, doc_id);

    let retriever = RagRetriever::new(store, embedder);
    let matches = retriever.search("barbecues électriques", 1).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].chunk.doc_id, doc_id);
    assert!(matches[0].chunk.text.contains("barbecues"));
}

#[tokio::test]
async fn test_corrupt_store_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rag_store.json");
    std::fs::write(&path, b"{ this is not json").unwrap();

    let store = RagStore::open(&path).await;
    assert_eq!(store.stats().await.documents, 0);

    // The next write replaces the corrupt file
    let ingestor = DocumentIngestor::new(
        Arc::new(store),
        Arc::new(HashingEmbedder::default()),
        20,
    );
    ingestor.ingest("reglement.txt", RULES).await.unwrap();

    let reopened = RagStore::open(&path).await;
    assert_eq!(reopened.stats().await.chunks, 2);
}
