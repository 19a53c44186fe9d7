//! Interactive questions.
//!
//! Every question has a default. When prompting is disabled (`--no-input`
//! or no terminal) the default is returned without asking.

use std::io::{self, IsTerminal};

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use dmt_model::{MAX_RANK, parse_rank};

pub struct Prompter {
    interactive: bool,
    theme: ColorfulTheme,
}

impl Prompter {
    /// Prompts only when allowed and stdin is a terminal.
    pub fn new(allow_prompts: bool) -> Self {
        Self {
            interactive: allow_prompts && io::stdin().is_terminal(),
            theme: ColorfulTheme::default(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Index of the chosen item.
    pub fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        if !self.interactive || items.is_empty() {
            return Ok(default);
        }
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    /// The chosen item itself.
    pub fn choose(&self, prompt: &str, items: &[String], default: usize) -> Result<String> {
        let index = self.select(prompt, items, default)?;
        Ok(items.get(index).cloned().unwrap_or_default())
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if !self.interactive {
            return Ok(default);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    /// Free text, trimmed; may be empty.
    pub fn text(&self, prompt: &str, default: &str) -> Result<String> {
        if !self.interactive {
            return Ok(default.to_string());
        }
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?.trim().to_string())
    }

    /// Indices of the checked items.
    pub fn multi_select(
        &self,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> Result<Vec<usize>> {
        if !self.interactive {
            return Ok(checked(defaults));
        }
        Ok(MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .defaults(defaults)
            .interact()?)
    }

    /// Non-empty lines entered one at a time, ending at the first blank line.
    pub fn lines(&self, prompt: &str) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        if !self.interactive {
            return Ok(lines);
        }
        loop {
            let label = if lines.is_empty() {
                prompt.to_string()
            } else {
                format!("{prompt} (blank to finish)")
            };
            let line = self.text(&label, "")?;
            if line.is_empty() {
                return Ok(lines);
            }
            lines.push(line);
        }
    }

    /// Rank in `1..=MAX_RANK`, or `None` when left blank.
    pub fn rank(&self, prompt: &str) -> Result<Option<u32>> {
        loop {
            let text = self.text(prompt, "")?;
            if text.is_empty() {
                return Ok(None);
            }
            match parse_rank(&text) {
                Some(rank) => return Ok(Some(rank)),
                None => eprintln!(
                    "Enter a whole number from 1 to {MAX_RANK}, or leave blank to number it automatically."
                ),
            }
        }
    }
}

fn checked(defaults: &[bool]) -> Vec<usize> {
    defaults
        .iter()
        .enumerate()
        .filter_map(|(index, on)| on.then_some(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn disabled_prompter_returns_defaults() {
        let prompter = Prompter::new(false);
        assert!(!prompter.is_interactive());
        assert_eq!(prompter.select("x", &items(&["a", "b"]), 1).unwrap(), 1);
        assert_eq!(prompter.choose("x", &items(&["a", "b"]), 0).unwrap(), "a");
        assert!(prompter.confirm("x", true).unwrap());
        assert_eq!(prompter.text("x", "dflt").unwrap(), "dflt");
        assert_eq!(
            prompter
                .multi_select("x", &items(&["a", "b", "c"]), &[true, false, true])
                .unwrap(),
            vec![0, 2]
        );
        assert!(prompter.lines("x").unwrap().is_empty());
        assert_eq!(prompter.rank("x").unwrap(), None);
    }
}
