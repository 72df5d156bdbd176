//! Charm-style terminal prompts using cliclack

use super::Prompter;
use crate::error::InstallError;
use anyhow::Result;
use std::io::IsTerminal;

/// Reads answers from the attached terminal
pub struct TermPrompter(());

impl TermPrompter {
    /// Fails with [`InstallError::NoTerminal`] when stdin or stdout is not a terminal
    pub fn new() -> Result<Self, InstallError> {
        if !console::user_attended() || !std::io::stdin().is_terminal() {
            return Err(InstallError::NoTerminal);
        }
        Ok(Self(()))
    }
}

impl Prompter for TermPrompter {
    fn text(&mut self, question: &str, default: &str) -> Result<String> {
        let answer: String = cliclack::input(question)
            .placeholder(default)
            .default_input(default)
            .required(false)
            .interact()?;
        Ok(answer)
    }

    fn secret(&mut self, question: &str, _default: &str) -> Result<String> {
        // The default is a password too, so it is never shown
        let prompt = format!("{} (empty keeps the default)", question);
        let answer: String = cliclack::password(prompt)
            .mask('▪')
            .interact()?;
        Ok(answer)
    }

    fn choice(&mut self, question: &str, options: &[&str]) -> Result<String> {
        let mut select = cliclack::select(question);
        for option in options {
            select = select.item(*option, *option, "");
        }
        let selected: &str = select.interact()?;
        Ok(selected.to_string())
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<Option<bool>> {
        let answer: bool = cliclack::confirm(question)
            .initial_value(default)
            .interact()?;
        Ok(Some(answer))
    }
}
