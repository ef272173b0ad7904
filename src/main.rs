use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snapguess::{signing::ScoreSigner, types::RunRecord};

/// Verdict written to stdout for each run record
#[derive(Debug, Serialize)]
struct RunVerdict {
    id: String,
    total_score: u64,
    verified: bool,
}

fn main() -> ExitCode {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Logs go to stderr; stdout carries verdicts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snapguess=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let signer = ScoreSigner::from_env();
    if !signer.is_configured() {
        tracing::error!("Refusing to verify runs without SCORE_SIGNING_SECRET");
        return ExitCode::FAILURE;
    }

    match verify_runs(io::stdin().lock(), io::stdout().lock(), &signer) {
        Ok((verified, rejected)) => {
            tracing::info!(verified, rejected, "Verification finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Verification aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Read newline-delimited run records and write one verdict per record.
/// Returns (verified, rejected) counts; malformed lines count as rejected.
fn verify_runs(
    input: impl BufRead,
    mut output: impl Write,
    signer: &ScoreSigner,
) -> io::Result<(u32, u32)> {
    let mut verified = 0;
    let mut rejected = 0;

    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let run: RunRecord = match serde_json::from_str(&line) {
            Ok(run) => run,
            Err(e) => {
                tracing::warn!(line = line_no + 1, "Skipping malformed run record: {}", e);
                rejected += 1;
                continue;
            }
        };

        let verdict = RunVerdict {
            verified: run.verify(signer),
            id: run.id,
            total_score: run.total_score,
        };
        if verdict.verified {
            verified += 1;
        } else {
            rejected += 1;
        }

        serde_json::to_writer(&mut output, &verdict)?;
        writeln!(output)?;
    }

    output.flush()?;
    Ok((verified, rejected))
}
