use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Display;

use super::traits::Renderer;
use crate::args::OutputFormat;
use crate::presentation::view_models::CommandResultViewModel;
use crate::presentation::views::{CreateView, Style};

pub struct ConsoleRenderer {
    format: OutputFormat,
    style: Style,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat) -> Self {
        let color = format == OutputFormat::Plain && std::io::stdout().is_terminal();
        Self {
            format,
            style: Style { color },
        }
    }

    /// Progress line on stderr; silent in JSON mode.
    pub fn progress(&self, message: impl Display) {
        if self.format == OutputFormat::Plain {
            eprintln!("{}", message);
        }
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView,
    {
        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        if let Some(badge) = &result.badge {
            if self.style.color {
                println!("{} {}", badge.icon(), badge.label.bold());
            } else {
                println!("{} {}", badge.icon(), badge.label);
            }
            println!();
        }

        print!("{}", result.content.create_view(self.style));

        if !result.suggestions.is_empty() {
            println!("\nTips:");
            for tip in &result.suggestions {
                print!("  • {}", tip.description);
                if let Some(cmd) = &tip.command {
                    if self.style.color {
                        print!(": {}", cmd.cyan());
                    } else {
                        print!(": {}", cmd);
                    }
                }
                println!();
            }
        }

        Ok(())
    }
}
