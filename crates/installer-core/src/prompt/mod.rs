//! Interactive questions
//!
//! `Prompter` reads raw answers from somewhere (the terminal, or a script in
//! tests). `PromptService` applies defaults and validates choices on top.

mod term;

pub use term::TermPrompter;

use anyhow::Result;

/// Raw answer source
pub trait Prompter {
    /// Free text; an empty string means "no input"
    fn text(&mut self, question: &str, default: &str) -> Result<String>;

    /// Masked text; an empty string means "no input"
    fn secret(&mut self, question: &str, default: &str) -> Result<String>;

    /// One answer for a single-choice question. May be outside `options`.
    fn choice(&mut self, question: &str, options: &[&str]) -> Result<String>;

    /// Yes/no; `None` accepts the default
    fn confirm(&mut self, question: &str, default: bool) -> Result<Option<bool>>;
}

pub struct PromptService<P> {
    prompter: P,
}

impl<P: Prompter> PromptService<P> {
    pub fn new(prompter: P) -> Self {
        Self { prompter }
    }

    pub fn into_inner(self) -> P {
        self.prompter
    }

    pub fn text(&mut self, question: &str, default: &str) -> Result<String> {
        let answer = self.prompter.text(question, default)?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }

    pub fn secret(&mut self, question: &str, default: &str) -> Result<String> {
        let answer = self.prompter.secret(question, default)?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        Ok(self.prompter.confirm(question, default)?.unwrap_or(default))
    }

    /// Ask until the answer names one of `options`, by label or zero-based index.
    pub fn choose<T: Copy>(&mut self, question: &str, options: &[(T, &str)]) -> Result<T> {
        let labels: Vec<&str> = options.iter().map(|(_, label)| *label).collect();

        loop {
            let answer = self.prompter.choice(question, &labels)?;
            if let Some(value) = match_choice(options, answer.trim()) {
                return Ok(value);
            }
            cliclack::log::warning(format!("Value \"{}\" is invalid", answer.trim()))?;
        }
    }
}

fn match_choice<T: Copy>(options: &[(T, &str)], answer: &str) -> Option<T> {
    if let Some((value, _)) = options.iter().find(|(_, label)| *label == answer) {
        return Some(*value);
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|idx| options.get(idx))
        .map(|(value, _)| *value)
}
