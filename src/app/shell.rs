// SPDX-License-Identifier: MPL-2.0
//! Interactive line-oriented front end.

use crate::app::session::{Session, Step};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPT: &str = "image-depot> ";

/// Reads commands from `input` until `quit` or end of input, writing
/// responses to `output`.
///
/// # Errors
///
/// Returns any I/O error from reading or writing the streams.
pub async fn run<R, W>(session: &mut Session, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let welcome = session.i18n().tr_with_args(
        "shell-welcome",
        &[("backend", &session.gateway().kind().to_string())],
    );
    output.write_all(format!("{welcome}\n").as_bytes()).await?;

    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            output.write_all(b"\n").await?;
            break;
        };
        tracing::debug!(line = %line, "shell input");

        match session.shell_line(&line).await {
            Step::Quit => break,
            Step::Continue(response) => {
                for text in response {
                    output.write_all(format!("{text}\n").as_bytes()).await?;
                }
            }
        }
    }
    output.flush().await
}
