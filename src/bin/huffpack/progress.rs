//! Utilities for displaying a progress monitor while the input is read
//!
//! The bar is attached to a `tracing` span and drawn by `tracing-indicatif`, so
//! log lines and the bar do not overwrite each other.

use std::io::Read;
use std::time::Instant;

use indicatif::{HumanBytes, ProgressStyle};
use tracing::{info, info_span, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// A wrapper around a reader that keeps track of how many bytes have been read.
///
/// A bar is only drawn when the total size is known up front.
pub struct ProgressMonitor<R: Read> {
    /// The total amount that the reader will read, if known
    pub total: Option<u64>,
    /// Amount read so far
    pub read: u64,
    reader: R,
    span: Span,
    started: Instant,
    finished: bool,
}

impl<R: Read> ProgressMonitor<R> {
    pub fn new(reader: R, total: Option<u64>, label: &str) -> Self {
        let span = info_span!("read", input = label);
        if let Some(total) = total {
            // https://docs.rs/indicatif/latest/indicatif/index.html#templates
            let style = ProgressStyle::with_template(
                "{wide_bar} {binary_bytes}/{binary_total_bytes} [est. {eta} remaining]",
            )
            .expect("progress bar template is valid");
            span.pb_set_style(&style);
            span.pb_set_length(total);
        }
        Self {
            total,
            read: 0,
            reader,
            span,
            started: Instant::now(),
            finished: false,
        }
    }

    fn update(&mut self, delta: usize) {
        self.read += delta as u64;
        if self.total.is_some() {
            self.span.pb_inc(delta as u64);
        }
        if delta == 0 && !self.finished {
            self.finished = true;
            info!(
                elapsed = ?self.started.elapsed(),
                "read {}",
                HumanBytes(self.read)
            );
        }
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let span = self.span.clone();
        let _entered = span.enter();
        // Fall back on the internally stored reader, but filch the number of bytes read
        // along the way
        let out = self.reader.read(buf)?;
        self.update(out);
        Ok(out)
    }
}
