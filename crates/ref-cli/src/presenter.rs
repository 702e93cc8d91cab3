//! Terminal implementations of the fix capabilities.

use std::io::Write;

use async_trait::async_trait;
use ref_fix::{ChoicePresenter, Diagnostics, FixActionType, FixOption};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// Numbered choice list on a writer (stderr by default), answer read line by
/// line. An empty line, `q` or end of input declines.
pub struct TerminalPresenter<R, W> {
    input: R,
    prompt_out: W,
}

impl TerminalPresenter<BufReader<Stdin>, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), std::io::stderr())
    }
}

impl<R, W> TerminalPresenter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub const fn new(input: R, prompt_out: W) -> Self {
        Self { input, prompt_out }
    }

    fn show(&mut self, prompt: &str, options: &[FixOption]) -> std::io::Result<()> {
        writeln!(self.prompt_out)?;
        writeln!(self.prompt_out, "{prompt}")?;
        for (index, option) in options.iter().enumerate() {
            writeln!(self.prompt_out, "  {}) {}", index + 1, option.label)?;
        }
        self.ask(options.len())
    }

    fn ask(&mut self, count: usize) -> std::io::Result<()> {
        write!(self.prompt_out, "choice [1-{count}, q to skip]: ")?;
        self.prompt_out.flush()
    }

    async fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line).await {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(error) => {
                tracing::warn!(%error, "failed to read choice");
                None
            }
        }
    }
}

#[async_trait]
impl<R, W> ChoicePresenter for TerminalPresenter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn present_choice(
        &mut self,
        prompt: &str,
        options: &[FixOption],
    ) -> Option<FixActionType> {
        if options.is_empty() {
            return None;
        }
        if let Err(error) = self.show(prompt, options) {
            tracing::warn!(%error, "failed to write prompt");
            return None;
        }

        loop {
            let answer = self.read_answer().await?;
            if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                return None;
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Some(options[n - 1].action),
                _ => {
                    let retry = writeln!(self.prompt_out, "'{answer}' is not one of the choices")
                        .and_then(|()| self.ask(options.len()));
                    if retry.is_err() {
                        return None;
                    }
                }
            }
        }
    }
}

/// Diagnostics on stderr. `quiet` drops progress lines but never failures.
#[derive(Debug, Clone, Copy)]
pub struct StderrDiagnostics {
    pub quiet: bool,
}

impl Diagnostics for StderrDiagnostics {
    fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("  ok: {message}");
        }
    }

    fn error(&self, message: &str) {
        eprintln!("  failed: {message}");
    }
}
