//! Display and output formatting utilities

use crate::agent::ProbabilityTable;
use crate::game::GameSummary;

/// Format probability tables and game results for the console
pub struct ProbabilityFormatter;

impl ProbabilityFormatter {
    /// One row per card, one column per holder
    pub fn format_table(table: &ProbabilityTable) -> String {
        let holders = table.holders();
        let mut cards = Vec::new();
        for entry in table.entries() {
            if !cards.contains(&entry.card) {
                cards.push(entry.card);
            }
        }

        let card_width = cards.iter().map(|c| c.to_string().len()).max().unwrap_or(4).max(4);
        let headers: Vec<String> = holders.iter().map(|h| h.to_string()).collect();

        let mut output = String::new();
        output.push_str(&format!("{:card_width$}", "Card"));
        for header in &headers {
            output.push_str(&format!(" | {:>11}", header));
        }
        output.push('\n');
        output.push_str(&"-".repeat(card_width));
        for _ in &headers {
            output.push_str(&format!("-|-{}", "-".repeat(11)));
        }
        output.push('\n');

        for card in &cards {
            output.push_str(&format!("{:card_width$}", card.to_string()));
            for &holder in &holders {
                match table.get(holder, *card) {
                    Some(p) => output.push_str(&format!(" | {:>11.2}", p)),
                    None => output.push_str(&format!(" | {:>11}", "-")),
                }
            }
            output.push('\n');
        }

        output
    }

    /// Who solved the crime, and when
    pub fn format_summary(summary: &GameSummary) -> String {
        let mut output = String::new();
        output.push_str(&format!("Crime: {}\n", summary.crime));
        output.push_str(&format!("Turns played: {}\n", summary.turns_played));
        output.push_str("Agent    | Kind     | Solved at\n");
        output.push_str("---------|----------|----------\n");

        for outcome in &summary.outcomes {
            let solved = match outcome.solved_turn {
                Some(turn) => format!("turn {}", turn),
                None => "unsolved".to_string(),
            };
            output.push_str(&format!("{:8} | {:8} | {}\n", outcome.agent_index, outcome.agent_kind, solved));
        }

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
