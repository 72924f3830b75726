use indicatif::{ProgressBar, ProgressStyle};
use ticket_core::{BatchProgress, BatchSummary, TicketConversionError};

/// Terminal progress bar for ticket conversion.
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner} Converting tickets [{bar:30}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }
}

impl BatchProgress for ConsoleProgress {
    fn started(&mut self, position: usize, _total: usize, ticket_id: u64) {
        self.bar.set_position(position.saturating_sub(1) as u64);
        self.bar.set_message(format!("#{}", ticket_id));
    }

    fn skipped(&mut self, error: &TicketConversionError) {
        self.bar.println(format!("✗ {}", error));
    }

    fn finished(&mut self, summary: &BatchSummary) {
        self.bar.set_position(summary.total as u64);
        self.bar.finish_and_clear();
    }
}
