// Colored terminal rendering of the monitor report

use colored::Colorize;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io;

use crate::core::system_monitor::{ReportLevel, ReportSink};

const RULE: &str = "========================================";

/// Prints each cycle to stdout, redrawing the screen per cycle
pub struct ConsoleSink {
    clear_screen: bool,
    in_alerts: bool,
}

impl ConsoleSink {
    pub fn new(clear_screen: bool) -> Self {
        Self {
            clear_screen,
            in_alerts: false,
        }
    }

    fn clear(&self) {
        if !self.clear_screen {
            return;
        }
        if let Err(e) = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
            log::debug!("Failed to clear terminal: {}", e);
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReportSink for ConsoleSink {
    fn report(&mut self, level: ReportLevel, text: &str) {
        match level {
            ReportLevel::Critical => println!("{}", format!("[CRITICAL] {}", text).red()),
            ReportLevel::Info if self.in_alerts => println!("{}", text.green()),
            _ => match text.split_once(": ") {
                Some((label, rest)) => println!("{} {}", format!("{}:", label).green(), rest),
                None => println!("{}", text),
            },
        }
    }

    fn begin_cycle(&mut self) {
        self.in_alerts = false;
        self.clear();
        println!("{}", RULE.blue());
        println!("{}", "     System Information Monitor".blue());
        println!("{}", RULE.blue());
        println!();
    }

    fn begin_alerts(&mut self) {
        self.in_alerts = true;
        println!();
        println!("{}", "========== ALERTS ==========".blue());
    }

    fn end_cycle(&mut self, next_in_secs: u64) {
        println!("{}", "===========================".blue());
        println!();
        println!(
            "{}",
            format!(
                "Next update in {} seconds (press Ctrl+C to exit)...",
                next_in_secs
            )
            .yellow()
        );
    }

    fn stopped(&mut self) {
        println!();
        println!("{}", "Monitor stopped by user.".yellow());
    }
}
