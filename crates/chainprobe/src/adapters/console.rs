//! Console reporter with the operator-facing line formats.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::outcome::{ProbeOutcome, VerifyEvent};
use crate::ports::outbound::Reporter;

/// Writes one line per reportable event.
///
/// Matching endpoints stay quiet unless the reporter was built verbose, so
/// a healthy fleet prints nothing but the per-network headers.
pub struct ConsoleReporter<W: Write + Send> {
    out: Mutex<W>,
    scheme: String,
    verbose: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(scheme: impl Into<String>, verbose: bool) -> Self {
        Self::new(io::stdout(), scheme, verbose)
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W, scheme: impl Into<String>, verbose: bool) -> Self {
        Self {
            out: Mutex::new(out),
            scheme: scheme.into(),
            verbose,
        }
    }

    fn line(&self, event: &VerifyEvent) -> Option<String> {
        match event {
            VerifyEvent::NetworkStarted { network } => {
                Some(format!("Processing files for {network}:"))
            }
            VerifyEvent::NoConfiguration { service, .. } => {
                Some(format!("No configuration found for {service}"))
            }
            VerifyEvent::SourceFailed { file, error, .. } => {
                Some(format!("Skipping {file}: {error}"))
            }
            VerifyEvent::Endpoint {
                file,
                endpoint,
                outcome,
                ..
            } => {
                let server = format!("{}://{}", self.scheme, endpoint);
                match outcome {
                    ProbeOutcome::Match { observed } => self.verbose.then(|| {
                        format!("OK: File: {file}, Server: {server}, Chain: {observed}")
                    }),
                    ProbeOutcome::Mismatch { expected, observed } => Some(format!(
                        "Mismatch: File: {file}, Server: {server}, Expected: {expected}, Got: {observed}"
                    )),
                    ProbeOutcome::ConnectionFailed { error } => {
                        Some(format!("Failed to connect to {server}: {error}"))
                    }
                }
            }
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap()
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn report(&self, event: &VerifyEvent) {
        let Some(line) = self.line(event) else {
            return;
        };
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{line}");
        }
    }
}
