//! Interactive question loop.
//!
//! A failed question prints a diagnostic and the loop moves on; only exit
//! keywords, end of input and Ctrl-C end the session.

use super::Answerer;
use pdfsearch_core::AppResult;
use std::future::Future;
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

/// Inputs that end the session (compared case-insensitively after trimming).
/// An empty line also ends it.
pub const EXIT_KEYWORDS: [&str; 3] = ["sair", "exit", "quit"];

const BANNER: &str = "=== PDF Search CLI ===";
const INSTRUCTIONS: &str = "Digite suas perguntas ou 'sair' para encerrar.";
const PROMPT: &str = "Faça sua pergunta: ";
const FAREWELL: &str = "Encerrando. Até logo!";
const INTERRUPTED: &str = "Encerrando...";

/// Counters reported when the session ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub answered: usize,
    pub failed: usize,
}

/// Whether `input` ends the session.
pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    input.is_empty() || EXIT_KEYWORDS.iter().any(|kw| input.eq_ignore_ascii_case(kw))
}

fn separator() -> String {
    "-".repeat(50)
}

/// Read stdin lines on a dedicated thread.
///
/// A blocked stdin read must not hold up runtime shutdown, so lines are
/// forwarded over a channel instead of read through tokio's stdin.
pub fn spawn_stdin_lines() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel(1);

    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    rx
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Run the question loop until an exit keyword, end of input or `interrupt`.
///
/// Input read errors and answer errors are printed and the loop continues;
/// only write errors on `out` are returned.
pub async fn run_interactive<W, F>(
    answerer: &dyn Answerer,
    lines: &mut mpsc::Receiver<io::Result<String>>,
    out: &mut W,
    interrupt: F,
) -> AppResult<SessionSummary>
where
    W: Write,
    F: Future<Output = ()>,
{
    tokio::pin!(interrupt);

    let mut summary = SessionSummary::default();

    writeln!(out, "{}", BANNER)?;
    writeln!(out, "{}", INSTRUCTIONS)?;
    writeln!(out, "{}", separator())?;

    loop {
        write!(out, "\n{}", PROMPT)?;
        out.flush()?;

        let line = tokio::select! {
            _ = &mut interrupt => {
                writeln!(out, "\n\n{}", INTERRUPTED)?;
                break;
            }
            line = lines.recv() => line,
        };

        let line = match line {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                // The unreadable line is already consumed; ask again
                summary.failed += 1;
                tracing::warn!("Failed to read input: {}", e);
                writeln!(out, "Erro: {}", e)?;
                continue;
            }
            None => {
                // End of input behaves like an exit keyword
                writeln!(out)?;
                writeln!(out, "{}", FAREWELL)?;
                break;
            }
        };

        let query = line.trim();
        if is_exit_command(query) {
            writeln!(out, "{}", FAREWELL)?;
            break;
        }

        writeln!(out, "\nPERGUNTA: {}", query)?;

        let result = tokio::select! {
            _ = &mut interrupt => {
                writeln!(out, "\n\n{}", INTERRUPTED)?;
                break;
            }
            result = answerer.answer(query) => result,
        };

        match result {
            Ok(answer) => {
                summary.answered += 1;
                writeln!(out, "RESPOSTA: {}", answer)?;
                writeln!(out, "{}", separator())?;
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!("Question failed: {}", e);
                writeln!(out, "Erro: {}", e)?;
            }
        }
    }

    tracing::info!(
        "Interactive session ended: {} answered, {} failed",
        summary.answered,
        summary.failed
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::ScriptedAnswerer;
    use std::future::pending;

    /// Channel preloaded with `inputs`, closed afterwards unless `keep_open`.
    fn input(
        inputs: &[&str],
        keep_open: bool,
    ) -> (
        mpsc::Receiver<io::Result<String>>,
        Option<mpsc::Sender<io::Result<String>>>,
    ) {
        let (tx, rx) = mpsc::channel(inputs.len().max(1));
        for line in inputs {
            tx.try_send(Ok(line.to_string())).unwrap();
        }
        (rx, keep_open.then_some(tx))
    }

    async fn run(inputs: &[&str]) -> (SessionSummary, Vec<String>, String) {
        let answerer = ScriptedAnswerer::default();
        let (mut rx, _tx) = input(inputs, false);
        let mut out = Vec::new();

        let summary = run_interactive(&answerer, &mut rx, &mut out, pending())
            .await
            .unwrap();

        (summary, answerer.questions(), String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_exit_keywords_any_case() {
        for kw in ["sair", "SAIR", "Exit", "quit", "  QuIt  ", "", "   "] {
            assert!(is_exit_command(kw), "{:?} should exit", kw);
        }
        assert!(!is_exit_command("sair agora"));
        assert!(!is_exit_command("1994"));
    }

    #[tokio::test]
    async fn test_each_exit_keyword_ends_without_answering() {
        for kw in ["sair", "EXIT", "Quit", ""] {
            let (summary, questions, output) = run(&[kw, "não deve ser lida"]).await;

            assert_eq!(summary, SessionSummary::default());
            assert!(questions.is_empty(), "{:?} reached the answerer", kw);
            assert!(output.ends_with("Encerrando. Até logo!\n"));
        }
    }

    #[tokio::test]
    async fn test_answers_until_exit() {
        let (summary, questions, output) =
            run(&["  copa do mundo  ", "1994", "sair"]).await;

        assert_eq!(summary.answered, 2);
        assert_eq!(questions, vec!["copa do mundo", "1994"]);
        assert!(output.starts_with("=== PDF Search CLI ===\n"));
        assert!(output.contains("\nPERGUNTA: copa do mundo\nRESPOSTA: resposta: copa do mundo\n"));
        assert!(output.contains("PERGUNTA: 1994\nRESPOSTA: resposta: 1994\n"));
        assert_eq!(output.matches(&"-".repeat(50)).count(), 3);
    }

    #[tokio::test]
    async fn test_error_does_not_end_session() {
        let (summary, questions, output) = run(&["falha na busca", "1994", "exit"]).await;

        assert_eq!(summary, SessionSummary { answered: 1, failed: 1 });
        assert_eq!(questions, vec!["falha na busca", "1994"]);
        assert!(output.contains("Erro: LLM error: OpenAI API error (429): quota exceeded\n"));
        assert!(output.contains("RESPOSTA: resposta: 1994"));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let (summary, questions, output) = run(&["1994"]).await;

        assert_eq!(summary.answered, 1);
        assert_eq!(questions, vec!["1994"]);
        assert!(output.ends_with("Encerrando. Até logo!\n"));
    }

    #[tokio::test]
    async fn test_interrupt_while_waiting_for_input() {
        let answerer = ScriptedAnswerer::default();
        let (mut rx, _tx) = input(&[], true);
        let mut out = Vec::new();

        let summary = run_interactive(&answerer, &mut rx, &mut out, async {})
            .await
            .unwrap();

        assert_eq!(summary, SessionSummary::default());
        assert!(answerer.questions().is_empty());
        assert!(String::from_utf8(out).unwrap().ends_with("\n\nEncerrando...\n"));
    }

    #[tokio::test]
    async fn test_read_error_does_not_end_session() {
        let answerer = ScriptedAnswerer::default();
        let (tx, mut rx) = mpsc::channel(3);
        tx.try_send(Err(io::Error::new(io::ErrorKind::InvalidData, "invalid UTF-8")))
            .unwrap();
        tx.try_send(Ok("1994".to_string())).unwrap();
        tx.try_send(Ok("sair".to_string())).unwrap();
        let mut out = Vec::new();

        let summary = run_interactive(&answerer, &mut rx, &mut out, pending())
            .await
            .unwrap();

        assert_eq!(summary, SessionSummary { answered: 1, failed: 1 });
        assert_eq!(answerer.questions(), vec!["1994"]);
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Erro: invalid UTF-8\n"));
        assert!(output.contains("RESPOSTA: resposta: 1994"));
        assert!(output.ends_with("Encerrando. Até logo!\n"));
    }

    /// Never answers; records that it was asked.
    #[derive(Default)]
    struct StalledAnswerer {
        asked: std::sync::atomic::AtomicBool,
    }

    #[async_trait::async_trait]
    impl Answerer for StalledAnswerer {
        async fn answer(&self, _question: &str) -> AppResult<String> {
            self.asked.store(true, std::sync::atomic::Ordering::SeqCst);
            pending().await
        }
    }

    #[tokio::test]
    async fn test_interrupt_while_answering() {
        let answerer = StalledAnswerer::default();
        let (mut rx, _tx) = input(&["copa do mundo"], true);
        let mut out = Vec::new();

        // Ctrl-C arrives only once the answer is in flight
        let interrupt = async {
            while !answerer.asked.load(std::sync::atomic::Ordering::SeqCst) {
                tokio::task::yield_now().await;
            }
        };

        let summary = run_interactive(&answerer, &mut rx, &mut out, interrupt)
            .await
            .unwrap();

        assert_eq!(summary.answered, 0);
        assert_eq!(summary.failed, 0);
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("PERGUNTA: copa do mundo\n"));
        assert!(!output.contains("RESPOSTA"));
        assert!(output.ends_with("\n\nEncerrando...\n"));
    }
}
