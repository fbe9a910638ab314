mod commands;

pub use commands::Command;

use crate::{
    Result,
    api::{FormalizerBackend, HttpBackend},
    config::Config,
    readiness::{PollerHandle, ReadinessPoller},
    session::{Session, SubmitOutcome},
};
use std::{collections::VecDeque, sync::Arc};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::info;

const LOADING_BANNER: &str = "Memuat Model... (biasanya memakan waktu 1-2 menit saat pertama kali)";
const HELP: &str = "Ketik teks informal lalu Enter. :hapus untuk mengosongkan, :keluar untuk keluar.";
const PROMPT: &str = "informal> ";

pub async fn run(config: Config) -> Result<()> {
    let backend: Arc<dyn FormalizerBackend> = Arc::new(HttpBackend::new(&config.backend)?);

    info!("Using formalizer backend at {}", config.backend.base_url);

    let poller = ReadinessPoller::new(backend.clone(), config.backend.poll_interval()).spawn();
    let session = Session::new(backend);

    let stdin = BufReader::new(io::stdin());
    let stdout = io::stdout();

    tokio::select! {
        result = interact(session, poller, stdin, stdout) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            Ok(())
        }
    }
}

/// Waits for the backend, then formalizes each line read from `input` until
/// EOF or a quit command. Lines typed while the model is loading are queued
/// and handled once it is ready; EOF with nothing queued exits right away.
pub async fn interact<R, W>(
    mut session: Session,
    mut poller: PollerHandle,
    input: R,
    mut output: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_line(&mut output, LOADING_BANNER).await?;

    let mut lines = input.lines();
    let mut queued = VecDeque::new();
    let mut input_closed = false;

    let report = loop {
        tokio::select! {
            biased;
            report = poller.wait_ready() => break report?,
            line = lines.next_line(), if !input_closed => match line? {
                Some(line) => queued.push_back(line),
                None if queued.is_empty() => {
                    info!("Input closed while waiting for the backend");
                    poller.stop();
                    return Ok(());
                }
                None => input_closed = true,
            },
        }
    };
    session.observe(&poller.status());
    info!(
        "Backend ready at {} after {} check(s)",
        report.ready_at, report.attempts
    );

    write_line(&mut output, "Model siap!").await?;
    write_line(&mut output, HELP).await?;

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let line = match queued.pop_front() {
            Some(line) => Some(line),
            None if input_closed => None,
            None => lines.next_line().await?,
        };
        let Some(line) = line else {
            break;
        };

        match Command::parse(&line) {
            Command::Quit => break,
            Command::Clear => {
                session.clear();
                write_line(&mut output, "Dikosongkan.").await?;
            }
            Command::Formalize(text) => {
                session.set_input(text);
                let message = match session.submit().await {
                    SubmitOutcome::Formalized(formal) => format!("formal> {}", formal),
                    SubmitOutcome::Rejected(msg) | SubmitOutcome::Failed(msg) => {
                        format!("⚠️ {}", msg)
                    }
                };
                write_line(&mut output, &message).await?;
            }
        }
    }

    poller.stop();
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
