// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use campsite_booking::rag::{
    DocumentIngestor, HashingEmbedder, RagError, RagRetriever, RagStore, DEFAULT_MIN_CHUNK_LEN,
};
use std::sync::Arc;

fn pipeline() -> (DocumentIngestor, RagRetriever) {
    let store = Arc::new(RagStore::in_memory());
    let embedder = Arc::new(HashingEmbedder::default());
    (
        DocumentIngestor::new(store.clone(), embedder.clone(), DEFAULT_MIN_CHUNK_LEN),
        RagRetriever::new(store, embedder),
    )
}

#[tokio::test]
async fn test_best_passage_ranks_first() {
    let (ingestor, retriever) = pipeline();
    ingestor
        .ingest(
            "services.txt",
            "La laverie dispose de trois machines à laver et d'un sèche-linge.\r\n\r\n\
             Le club enfants accueille les 4-12 ans du lundi au vendredi matin.\r\n\r\n\
             Le marché de Sérignan a lieu le mardi et le samedi matin.",
        )
        .await
        .unwrap();
    ingestor
        .ingest(
            "activites.txt",
            "Location de vélos à la réception, casques fournis pour les enfants.",
        )
        .await
        .unwrap();

    let matches = retriever
        .search("machines à laver de la laverie", 3)
        .await
        .unwrap();
    assert_eq!(matches.len(), 3);
    assert!(matches[0].chunk.text.starts_with("La laverie"));
    assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_rejected_inputs() {
    let (ingestor, retriever) = pipeline();

    assert!(matches!(
        ingestor.ingest("vide.txt", "Trop court.\n\nAussi.").await,
        Err(RagError::NoChunks)
    ));
    assert!(matches!(
        ingestor.ingest_bytes("binaire.bin", &[0xc3, 0x28]).await,
        Err(RagError::InvalidDocument(_))
    ));
    assert!(matches!(
        retriever.search("   ", 5).await,
        Err(RagError::EmptyQuery)
    ));

    // Nothing stored yet
    assert!(retriever.search("laverie", 5).await.unwrap().is_empty());
}
