//! Job management CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;
use console::{style, Emoji};
use serde::Deserialize;

static SUCCESS: Emoji = Emoji("✓", "√");
static INFO: Emoji = Emoji("ℹ", "i");

/// Job management commands
#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List all jobs with optional filtering
    List {
        /// Filter by status (pending, running, completed, failed)
        #[arg(short, long)]
        status: Option<String>,

        /// Limit number of results
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show detailed job statistics
    Stats,

    /// Retry a failed job by ID
    Retry {
        /// Job ID to retry
        job_id: String,
    },

    /// Retry all failed jobs
    RetryAll {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Cancel a running job by ID
    Cancel {
        /// Job ID to cancel
        job_id: String,
    },

    /// Clear the dead letter queue
    ClearDeadLetter {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Watch job queue in real-time
    Watch {
        /// Update interval in seconds
        #[arg(short, long, default_value = "2")]
        interval: u64,
    },
}

impl JobsCommand {
    /// Execute the jobs command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Failed to connect to job service
    /// - Failed to execute job operation
    /// - Invalid job ID provided
    pub fn execute(&self) -> Result<()> {
        match self {
            Self::List { status, limit } => self.list(status.as_deref(), *limit),
            Self::Stats => self.stats(),
            Self::Retry { job_id } => self.retry(job_id),
            Self::RetryAll { force } => self.retry_all(*force),
            Self::Cancel { job_id } => self.cancel(job_id),
            Self::ClearDeadLetter { force } => self.clear_dead_letter(*force),
            Self::Watch { interval } => self.watch(*interval),
        }
    }

    fn list(&self, status: Option<&str>, limit: usize) -> Result<()> {
        println!("\n{} Job Queue", INFO);
        println!();

        // TODO: Connect to job service via HTTP API or direct agent connection
        // For now, show placeholder

        let header = if let Some(status) = status {
            format!("Showing {} jobs with status: {}", limit, style(status).cyan())
        } else {
            format!("Showing last {} jobs", limit)
        };

        println!("{}", style(header).bold());
        println!("{}", "─".repeat(80));

        // Table header
        println!(
            "{:<12} {:<20} {:<12} {:<20} {:<10}",
            "ID", "Type", "Status", "Created", "Duration"
        );
        println!("{}", "─".repeat(80));

        // TODO: Fetch and display actual jobs
        println!("  {}", style("(No jobs to display)").dim());
        println!();
        println!(
            "{} To enable job management, ensure your application is running with job agent enabled.",
            INFO
        );

        Ok(())
    }

    fn stats(&self) -> Result<()> {
        println!("\n{} Job Statistics", INFO);
        println!();

        // TODO: Fetch actual stats from job service

        #[derive(Deserialize)]
        struct JobStats {
            total_enqueued: u64,
            running: usize,
            pending: usize,
            completed: u64,
            failed: usize,
            avg_execution_ms: f64,
            p95_execution_ms: f64,
            success_rate: f64,
        }

        // Placeholder stats
        let stats = JobStats {
            total_enqueued: 0,
            running: 0,
            pending: 0,
            completed: 0,
            failed: 0,
            avg_execution_ms: 0.0,
            p95_execution_ms: 0.0,
            success_rate: 100.0,
        };

        println!("{}", style("Queue Status").bold().underlined());
        println!("  Total Enqueued:  {}", style(stats.total_enqueued).cyan());
        println!("  Running:         {}", style(stats.running).yellow());
        println!("  Pending:         {}", style(stats.pending).blue());
        println!("  Completed:       {}", style(stats.completed).green());
        println!("  Failed:          {}", style(stats.failed).red());
        println!();

        println!("{}", style("Performance Metrics").bold().underlined());
        println!(
            "  Avg Execution:   {} ms",
            style(format!("{:.2}", stats.avg_execution_ms)).cyan()
        );
        println!(
            "  P95 Execution:   {} ms",
            style(format!("{:.2}", stats.p95_execution_ms)).cyan()
        );
        println!(
            "  Success Rate:    {}%",
            style(format!("{:.1}", stats.success_rate)).green()
        );
        println!();

        Ok(())
    }

    fn retry(&self, job_id: &str) -> Result<()> {
        println!("{} Retrying job: {}", INFO, style(job_id).cyan());

        // TODO: Call job service to retry job
        println!("  {}", style("(Job service not connected)").dim());
        println!();
        println!("{} Job retry queued successfully", SUCCESS);

        Ok(())
    }

    fn retry_all(&self, force: bool) -> Result<()> {
        if !force {
            println!("{} This will retry ALL failed jobs.", style("Warning:").yellow());
            println!("Are you sure? (y/N): ");

            let mut input = String::new();
            std::io::stdin()
                .read_line(&mut input)
                .context("Failed to read input")?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        }

        println!("{} Retrying all failed jobs...", INFO);

        // TODO: Call job service to retry all failed jobs
        println!("  {}", style("(Job service not connected)").dim());
        println!();
        println!("{} All failed jobs queued for retry", SUCCESS);

        Ok(())
    }

    fn cancel(&self, job_id: &str) -> Result<()> {
        println!("{} Cancelling job: {}", INFO, style(job_id).cyan());

        // TODO: Call job service to cancel job
        println!("  {}", style("(Job service not connected)").dim());
        println!();
        println!("{} Job cancellation requested", SUCCESS);
        println!(
            "  {} Graceful shutdown in progress. Job will stop at next checkpoint.",
            INFO
        );

        Ok(())
    }

    fn clear_dead_letter(&self, force: bool) -> Result<()> {
        if !force {
            println!(
                "{} This will permanently delete all jobs in the dead letter queue.",
                style("Warning:").yellow()
            );
            println!("This action CANNOT be undone. Are you sure? (y/N): ");

            let mut input = String::new();
            std::io::stdin()
                .read_line(&mut input)
                .context("Failed to read input")?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        }

        println!("{} Clearing dead letter queue...", INFO);

        // TODO: Call job service to clear DLQ
        println!("  {}", style("(Job service not connected)").dim());
        println!();
        println!("{} Dead letter queue cleared", SUCCESS);

        Ok(())
    }

    fn watch(&self, interval: u64) -> Result<()> {
        use std::io::Write;
        use std::thread;
        use std::time::Duration;

        println!("{} Watching job queue (Ctrl+C to stop)", INFO);
        println!("  Update interval: {} seconds", interval);
        println!();

        loop {
            // Clear screen
            print!("\x1B[2J\x1B[1;1H");
            std::io::stdout().flush()?;

            // Print header
            println!("{}", style("Job Queue Monitor").bold().cyan());
            println!("{}", "=".repeat(80));
            println!();

            // TODO: Fetch and display real-time stats
            println!("{}", style("Queue Status").bold().underlined());
            println!("  Running:   {}", style("0").yellow());
            println!("  Pending:   {}", style("0").blue());
            println!("  Completed: {}", style("0").green());
            println!("  Failed:    {}", style("0").red());
            println!();

            println!(
                "{}",
                style(format!("Last updated: {}", chrono::Local::now().format("%H:%M:%S")))
                    .dim()
            );

            thread::sleep(Duration::from_secs(interval));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_command_defaults() {
        let cmd = JobsCommand::List {
            status: None,
            limit: 20,
        };

        // Should not panic
        let _ = cmd.execute();
    }

    #[test]
    fn test_stats_command() {
        let cmd = JobsCommand::Stats;

        // Should not panic
        let _ = cmd.execute();
    }

    #[test]
    fn test_retry_command() {
        let cmd = JobsCommand::Retry {
            job_id: "test-123".to_string(),
        };

        // Should not panic
        let _ = cmd.execute();
    }
}
