//! Console progress reporting for cleaning runs

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use medclean_core::{CleanConfig, CleanObserver, CleanReport, DedupStats, KeyColumns};

/// Prints one status line per pipeline stage to stdout, with a spinner on
/// stderr while the input is being read.
pub struct ConsoleReporter {
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ConsoleReporter {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

impl CleanObserver for ConsoleReporter {
    fn started(&mut self, config: &CleanConfig) {
        println!(
            "Starting data cleaning process for '{}'...",
            config.input.display()
        );
    }

    fn reading(&mut self, _input: &Path) {
        println!("Reading CSV file...");

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} [{elapsed_precise}] {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("reading rows");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn read(&mut self, rows: usize) {
        self.stop_spinner();
        println!("Read {} rows.", rows);
        println!("Initial number of rows: {}", rows);
    }

    fn deduplicating(&mut self, key: &KeyColumns) {
        println!("Removing duplicates based on columns: {}...", key);
    }

    fn deduplicated(&mut self, stats: &DedupStats) {
        println!("Removed {} duplicate rows.", stats.duplicates_found);
        println!("Final number of rows: {}", stats.unique_count);
    }

    fn writing(&mut self, output: &Path) {
        println!("Saving cleaned data to '{}'...", output.display());
    }

    fn finished(&mut self, report: &CleanReport) {
        match &report.output {
            Some(output) => {
                println!("Data cleaning process completed successfully.");
                println!("Cleaned data saved to '{}'.", output.display());
            }
            None => println!("Dry run completed; no output written."),
        }
    }
}

/// Print a formatted summary report
pub fn print_summary_report(report: &CleanReport) {
    println!("\n{}", "═".repeat(60));
    println!("Medicine Data Cleaning Complete");
    println!("{}", "═".repeat(60));
    println!("Input:              {}", report.input.display());

    if let Some(output_path) = &report.output {
        println!("Output:             {}", output_path.display());
    } else {
        println!("Output:             (dry run - no output written)");
    }

    println!("Key columns:        {}", report.key_columns);
    println!("Total rows:         {}", format_with_commas(report.initial_rows));
    println!(
        "Duplicates removed: {} ({:.1}%)",
        format_with_commas(report.rows_removed),
        report.removal_rate()
    );
    println!("Final dataset:      {}", format_with_commas(report.final_rows));

    println!("{}", "═".repeat(60));
}

/// Format number with thousand separators
fn format_with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
