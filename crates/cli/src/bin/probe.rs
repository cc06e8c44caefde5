//! Retrieval probe.
//!
//! Runs similarity searches against the configured collection and prints
//! what comes back, without calling the chat model. Useful to check that
//! ingestion worked and that the embedding model matches.

use anyhow::Context;
use clap::Parser;
use pdfsearch_core::{config::AppConfig, logging};
use pdfsearch_knowledge::{
    create_provider, Document, EmbeddingConfig, PgVectorIndex, Retriever, SimilaritySearch,
    DEFAULT_TOP_K,
};
use std::io::{self, Write};
use std::sync::Arc;

/// Queries used when none are given on the command line.
const DEFAULT_QUERIES: [&str; 2] = ["copa do mundo", "1994"];

/// Characters of content shown per document.
const PREVIEW_CHARS: usize = 200;

/// Check what the vector collection returns for sample queries
#[derive(Parser, Debug)]
#[command(name = "pdfsearch-probe")]
#[command(about = "Check what the vector collection returns for sample queries", long_about = None)]
#[command(version)]
struct Args {
    /// Queries to search for (default: "copa do mundo" "1994")
    queries: Vec<String>,

    /// Documents to retrieve per query
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Print metadata for every query, not only the first
    #[arg(long)]
    metadata: bool,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn queries(&self) -> Vec<String> {
        if self.queries.is_empty() {
            DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect()
        } else {
            self.queries.clone()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load()?.with_overrides(None, args.verbose, false);
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    let embeddings = create_provider(
        &EmbeddingConfig::for_probe(&config),
        Some(config.api_key.as_str()),
    )?;
    let index = Arc::new(PgVectorIndex::connect_lazy(
        &config.database_url(),
        &config.collection,
    )?);

    let exists = index
        .collection_exists()
        .await
        .context("Could not reach the vector store")?;
    if !exists {
        tracing::warn!(
            "Collection '{}' does not exist; every search will come back empty",
            index.collection()
        );
    }

    let search = SimilaritySearch::new(embeddings, index);
    let mut out = io::stdout();

    for (i, query) in args.queries().iter().enumerate() {
        if i > 0 {
            write!(out, "\n\n")?;
        }
        writeln!(out, "Testando busca por: '{}'", query)?;

        let documents = search
            .similarity_search(query, args.top_k)
            .await
            .with_context(|| format!("Search for '{}' failed", query))?;

        print_documents(&mut out, &documents, args.metadata || i == 0)?;
    }

    Ok(())
}

/// Print the search report for one query.
fn print_documents<W: Write>(out: &mut W, documents: &[Document], show_metadata: bool) -> io::Result<()> {
    writeln!(out, "Documentos encontrados: {}", documents.len())?;

    for (i, doc) in documents.iter().enumerate() {
        if let Some(distance) = doc.distance {
            tracing::debug!("Document {} distance: {:.4}", i + 1, distance);
        }
        writeln!(out, "\n{}. Relevante", i + 1)?;
        writeln!(out, "Conteúdo: {}...", doc.preview(PREVIEW_CHARS))?;

        if show_metadata {
            let metadata = serde_json::to_string(&doc.metadata)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln!(out, "Metadata: {}", metadata)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn render(documents: &[Document], show_metadata: bool) -> String {
        let mut out = Vec::new();
        print_documents(&mut out, documents, show_metadata).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_default_queries() {
        let args = Args::try_parse_from(["pdfsearch-probe"]).unwrap();
        assert_eq!(args.queries(), vec!["copa do mundo", "1994"]);
        assert_eq!(args.top_k, 3);
        assert!(!args.metadata);
    }

    #[test]
    fn test_custom_queries_and_k() {
        let args = Args::try_parse_from(["pdfsearch-probe", "-k", "5", "Romário", "tetra"]).unwrap();
        assert_eq!(args.queries(), vec!["Romário", "tetra"]);
        assert_eq!(args.top_k, 5);
    }

    #[test]
    fn test_content_preview_truncated_to_200_chars() {
        let long = "é".repeat(300);
        let output = render(&[Document::new(long)], false);

        let line = output
            .lines()
            .find(|l| l.starts_with("Conteúdo: "))
            .unwrap();
        let preview = line.trim_start_matches("Conteúdo: ").trim_end_matches("...");
        assert_eq!(preview.chars().count(), 200);
    }

    #[test]
    fn test_report_lists_documents_in_order() {
        let mut metadata = Map::new();
        metadata.insert("source".to_string(), Value::from("document.pdf"));

        let docs = vec![
            Document::new("Brasil tetracampeão em 1994")
                .with_metadata(metadata)
                .with_distance(0.12),
            Document::new("Final contra a Itália"),
        ];

        let output = render(&docs, true);
        assert!(output.starts_with("Documentos encontrados: 2\n"));
        assert!(output.contains("\n1. Relevante\nConteúdo: Brasil tetracampeão em 1994...\n"));
        assert!(output.contains("Metadata: {\"source\":\"document.pdf\"}"));
        assert!(output.contains("\n2. Relevante\nConteúdo: Final contra a Itália...\nMetadata: {}\n"));
    }

    #[test]
    fn test_metadata_hidden_when_not_requested() {
        let docs = vec![Document::new("texto").with_metadata(
            json!({"page": 1}).as_object().cloned().unwrap_or_default(),
        )];
        let output = render(&docs, false);
        assert!(!output.contains("Metadata"));
    }

    #[test]
    fn test_empty_result() {
        assert_eq!(render(&[], true), "Documentos encontrados: 0\n");
    }
}
