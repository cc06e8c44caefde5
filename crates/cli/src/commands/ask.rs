//! Single-question mode.

use super::Answerer;
use std::io::{self, Write};

/// Answer one question and print it.
///
/// Answer failures are printed rather than returned; only write errors on
/// `out` are. Returns whether an answer was produced.
pub async fn run_single<W: Write>(
    answerer: &dyn Answerer,
    question: &str,
    out: &mut W,
) -> io::Result<bool> {
    tracing::info!("Executing single question");

    match answerer.answer(question).await {
        Ok(answer) => {
            writeln!(out, "PERGUNTA: {}", question)?;
            writeln!(out, "RESPOSTA: {}", answer)?;
            Ok(true)
        }
        Err(e) => {
            tracing::error!("Question failed: {}", e);
            writeln!(out, "Erro: {}", e)?;
            Ok(false)
        }
    }
}
