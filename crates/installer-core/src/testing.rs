//! Test doubles for the runner and prompter seams

use crate::error::InstallError;
use crate::process::{CommandLine, CommandOutput, CommandRunner};
use crate::prompt::Prompter;
use anyhow::{anyhow, Result};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Answers questions from a fixed script, in order
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, question: &str) -> Result<String> {
        self.asked.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("script has no answer for {:?}", question))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&mut self, question: &str, _default: &str) -> Result<String> {
        self.next(question)
    }

    fn secret(&mut self, question: &str, _default: &str) -> Result<String> {
        self.next(question)
    }

    fn choice(&mut self, question: &str, _options: &[&str]) -> Result<String> {
        self.next(question)
    }

    fn confirm(&mut self, question: &str, _default: bool) -> Result<Option<bool>> {
        let answer = self.next(question)?;
        match answer.to_lowercase().as_str() {
            "" => Ok(None),
            "y" | "yes" => Ok(Some(true)),
            "n" | "no" => Ok(Some(false)),
            other => Err(anyhow!("unscripted confirm answer {:?}", other)),
        }
    }
}

/// Records commands instead of running them
#[derive(Default)]
pub struct RecordingRunner {
    calls: Vec<(String, PathBuf)>,
    failing: Vec<String>,
    scaffold_env: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command whose display starts with `prefix` fail
    pub fn fail_on(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    /// Simulate `create-project` by writing `.env` with this content into the
    /// project directory it names
    pub fn scaffold_with_env(mut self, content: &str) -> Self {
        self.scaffold_env = Some(content.to_string());
        self
    }

    pub fn commands(&self) -> Vec<&str> {
        self.calls.iter().map(|(cmd, _)| cmd.as_str()).collect()
    }

    pub fn calls(&self) -> &[(String, PathBuf)] {
        &self.calls
    }

    fn simulate_scaffold(&self, command: &CommandLine, dir: &Path) {
        let Some(env) = &self.scaffold_env else {
            return;
        };
        if !command.args.iter().any(|a| a == "create-project") {
            return;
        }
        if let Some(name) = command.args.last() {
            let project = dir.join(name);
            std::fs::create_dir_all(&project).unwrap();
            std::fs::write(project.join(".env"), env).unwrap();
        }
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(
        &mut self,
        command: &CommandLine,
        dir: &Path,
    ) -> Result<CommandOutput, InstallError> {
        let display = command.to_string();
        self.calls.push((display.clone(), dir.to_path_buf()));

        if self.failing.iter().any(|prefix| display.starts_with(prefix)) {
            return Err(InstallError::CommandFailed {
                command: display,
                code: Some(1),
                output: "simulated failure".to_string(),
            });
        }

        self.simulate_scaffold(command, dir);
        Ok(CommandOutput::default())
    }
}
