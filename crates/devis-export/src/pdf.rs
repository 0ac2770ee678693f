//! PDF rendering via headless Chromium.
//!
//! The renderer's whole contract is: hand it a complete markup string,
//! receive PDF bytes or a failure. Markup is written to a temp file and
//! printed with `--print-to-pdf`; temp files are removed on success and
//! failure alike.

use std::env;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::error::ExportError;

const DEFAULT_CHROMIUM_PATH: &str = "/usr/bin/chromium";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// The Chromium CLI exposes no paper-size or margin options, so the sheet
/// is described in CSS injected into the document head.
const PAGE_RULE: &str = "<style>@page { size: A4 landscape; margin: 0; }</style>";

/// Launch flags tuned for memory-constrained containers.
const CHROMIUM_FLAGS: &[&str] = &[
    "--headless",
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--no-first-run",
    "--disable-extensions",
    "--disable-background-networking",
    "--hide-scrollbars",
    "--mute-audio",
    "--no-pdf-header-footer",
];

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    chromium_path: String,
    timeout: Duration,
}

impl PdfRenderer {
    pub fn new(chromium_path: impl Into<String>) -> Self {
        Self {
            chromium_path: chromium_path.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build a renderer from the environment (`CHROMIUM_PATH`).
    pub fn from_env() -> Self {
        let path =
            env::var("CHROMIUM_PATH").unwrap_or_else(|_| DEFAULT_CHROMIUM_PATH.to_string());
        Self::new(path)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Render a markup string to PDF bytes.
    pub fn render(&self, markup: &str) -> Result<Vec<u8>, ExportError> {
        let job = Uuid::new_v4();
        let html_path = env::temp_dir().join(format!("devis-{job}.html"));
        let pdf_path = env::temp_dir().join(format!("devis-{job}.pdf"));

        let result = self.run(markup, &html_path, &pdf_path);

        let _ = fs::remove_file(&html_path);
        let _ = fs::remove_file(&pdf_path);

        result
    }

    fn run(&self, markup: &str, html_path: &Path, pdf_path: &Path) -> Result<Vec<u8>, ExportError> {
        fs::write(html_path, with_page_rule(markup))?;

        let started = Instant::now();
        tracing::debug!(chromium = %self.chromium_path, "launching renderer");

        let mut child = Command::new(&self.chromium_path)
            .args(CHROMIUM_FLAGS)
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", html_path.display()))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExportError::RendererLaunch(format!("{}: {e}", self.chromium_path)))?;

        // Drain stderr on a separate thread; a chatty child that fills the
        // pipe buffer would otherwise block until the timeout kill.
        let stderr_pipe = child.stderr.take();
        let stderr_reader = std::thread::spawn(move || {
            let mut buf = String::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_string(&mut buf);
            }
            buf
        });

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if started.elapsed() > self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExportError::Pdf(format!(
                    "renderer timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
            std::thread::sleep(Duration::from_millis(50));
        };

        if !status.success() {
            let stderr = stderr_reader.join().unwrap_or_default();
            return Err(ExportError::Pdf(format!(
                "renderer exited with {status}: {}",
                stderr_tail(&stderr)
            )));
        }

        let bytes = fs::read(pdf_path)?;
        tracing::info!(
            bytes = bytes.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "pdf rendered"
        );
        Ok(bytes)
    }
}

fn with_page_rule(markup: &str) -> String {
    match markup.find("</head>") {
        Some(at) => {
            let mut out = String::with_capacity(markup.len() + PAGE_RULE.len());
            out.push_str(&markup[..at]);
            out.push_str(PAGE_RULE);
            out.push_str(&markup[at..]);
            out
        }
        None => format!("{PAGE_RULE}{markup}"),
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(5);
    lines[start..].join(" | ")
}
