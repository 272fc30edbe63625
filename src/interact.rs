//! Interactive prompt surface
//!
//! The pipeline blocks at three prompt boundaries (input fallback choice,
//! auth confirmation, ide-helper confirmation). They run behind the
//! [`Interaction`] trait so a non-interactive run can supply equivalent
//! answers programmatically.

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};
use std::collections::VecDeque;

/// Operator prompt surface
pub trait Interaction {
    /// Present a list of choices. Returns the chosen index, or `None` when
    /// the operator gave no recognizable answer (e.g. aborted the prompt).
    fn choose(
        &mut self,
        prompt: &str,
        options: &[&str],
        default: Option<usize>,
    ) -> Result<Option<usize>>;

    /// Ask a yes/no question with a declared default answer.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Terminal prompts via dialoguer
pub struct ConsoleInteraction {
    theme: ColorfulTheme,
}

impl ConsoleInteraction {
    /// Create a themed prompt surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for ConsoleInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for ConsoleInteraction {
    fn choose(
        &mut self,
        prompt: &str,
        options: &[&str],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        let mut select = Select::with_theme(&self.theme).with_prompt(prompt).items(options);
        if let Some(default) = default {
            select = select.default(default);
        }

        select.interact_opt().context("Choice prompt failed")
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .context("Confirmation prompt failed")
    }
}

/// Pre-scripted answers for non-interactive runs and tests.
///
/// Each queue is consumed in order; once a queue is exhausted the prompt's
/// declared default is answered instead.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    choices: VecDeque<Option<usize>>,
    confirms: VecDeque<bool>,
}

impl ScriptedInteraction {
    /// Answer every prompt with its declared default.
    #[must_use]
    pub fn accept_defaults() -> Self {
        Self::default()
    }

    /// Queue answers for upcoming prompts.
    #[must_use]
    pub fn new<C, F>(choices: C, confirms: F) -> Self
    where
        C: IntoIterator<Item = Option<usize>>,
        F: IntoIterator<Item = bool>,
    {
        Self {
            choices: choices.into_iter().collect(),
            confirms: confirms.into_iter().collect(),
        }
    }
}

impl Interaction for ScriptedInteraction {
    fn choose(
        &mut self,
        _prompt: &str,
        _options: &[&str],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        Ok(self.choices.pop_front().unwrap_or(default))
    }

    fn confirm(&mut self, _prompt: &str, default: bool) -> Result<bool> {
        Ok(self.confirms.pop_front().unwrap_or(default))
    }
}
