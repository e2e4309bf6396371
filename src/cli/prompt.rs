//! Interactive prompts shared by commands.
//!
//! [`Prompter`] owns the global `--yes` behavior and the re-prompt loop for
//! required answers. Where the answers come from is a [`Backend`]: dialoguer
//! widgets on a terminal, or one line per answer when stdin is piped.

use std::io::{self, BufRead, IsTerminal, StdinLock, Stderr, Write};

use console::style;
use dialoguer::{Confirm, Input, Password, Select};
use tracing::debug;

use crate::cli::output;
use crate::error::{PromptError, Result};

/// Message shown when a required answer is empty.
pub const REQUIRED_MESSAGE: &str = "You must enter a value!";

/// Source of answers.
pub trait Backend {
    /// Ask a yes/no question. Unrecognized answers yield `default`.
    fn confirm(&mut self, question: &str, default: bool) -> std::result::Result<bool, PromptError>;

    /// Ask for one of `options`, returning its index.
    fn select(
        &mut self,
        question: &str,
        options: &[String],
        default: Option<usize>,
    ) -> std::result::Result<usize, PromptError>;

    /// Read one free-text answer. `hidden` answers are not echoed.
    fn input(&mut self, question: &str, hidden: bool) -> std::result::Result<String, PromptError>;

    /// Tell the user why an answer was refused.
    fn notice(&mut self, message: &str) -> std::result::Result<(), PromptError>;
}

/// Style a question consistently across every prompt.
pub fn format_question(message: &str) -> String {
    if output::colors_enabled() {
        style(format!(" {}", message)).black().on_cyan().to_string()
    } else {
        format!(" {}", message)
    }
}

/// Check a required answer.
///
/// # Errors
///
/// Returns [`REQUIRED_MESSAGE`] for empty or whitespace-only answers.
pub fn require_value(answer: &str) -> std::result::Result<(), &'static str> {
    if answer.trim().is_empty() {
        Err(REQUIRED_MESSAGE)
    } else {
        Ok(())
    }
}

/// Console question helpers.
pub struct Prompter<B> {
    backend: B,
    assume_yes: bool,
}

impl<B: Backend> Prompter<B> {
    pub fn new(backend: B, assume_yes: bool) -> Self {
        Self {
            backend,
            assume_yes,
        }
    }

    /// Prompt the user to confirm an action.
    ///
    /// With `--yes` this returns `true` without asking.
    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        if self.assume_yes {
            debug!(question, "auto-confirmed");
            return Ok(true);
        }

        Ok(self.backend.confirm(&format_question(question), default)?)
    }

    /// Ask a multiple-choice question and return the chosen option.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::NoOptions` if `options` is empty.
    pub fn ask_choice<S: AsRef<str>>(
        &mut self,
        question: &str,
        options: &[S],
        default: Option<usize>,
    ) -> Result<String> {
        if options.is_empty() {
            return Err(PromptError::NoOptions.into());
        }

        let options: Vec<String> = options.iter().map(|o| o.as_ref().to_string()).collect();
        let default = default.filter(|&i| i < options.len());
        let index = self
            .backend
            .select(&format_question(question), &options, default)?;

        Ok(options[index].clone())
    }

    /// Ask a question that must be answered, re-asking on empty input.
    ///
    /// Whitespace-only answers count as empty. Accepted answers are returned
    /// as typed.
    pub fn ask_required(&mut self, question: &str) -> Result<String> {
        self.ask_until_answered(question, false)
    }

    /// Like [`Prompter::ask_required`], without echoing the answer.
    pub fn ask_secret(&mut self, question: &str) -> Result<String> {
        self.ask_until_answered(question, true)
    }

    fn ask_until_answered(&mut self, question: &str, hidden: bool) -> Result<String> {
        let question = format_question(question);
        loop {
            let answer = self.backend.input(&question, hidden)?;
            match require_value(&answer) {
                Ok(()) => return Ok(answer),
                Err(message) => self.backend.notice(message)?,
            }
        }
    }
}

/// dialoguer widgets on the controlling terminal.
#[derive(Debug, Default)]
pub struct Terminal;

impl Backend for Terminal {
    fn confirm(&mut self, question: &str, default: bool) -> std::result::Result<bool, PromptError> {
        Ok(Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()?)
    }

    fn select(
        &mut self,
        question: &str,
        options: &[String],
        default: Option<usize>,
    ) -> std::result::Result<usize, PromptError> {
        let mut select = Select::new().with_prompt(question).items(options);
        if let Some(index) = default {
            select = select.default(index);
        }
        Ok(select.interact()?)
    }

    fn input(&mut self, question: &str, hidden: bool) -> std::result::Result<String, PromptError> {
        if hidden {
            Ok(Password::new()
                .with_prompt(question)
                .allow_empty_password(true)
                .interact()?)
        } else {
            Ok(Input::<String>::new()
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()?)
        }
    }

    fn notice(&mut self, message: &str) -> std::result::Result<(), PromptError> {
        output::error(message);
        Ok(())
    }
}

/// Line-oriented answers, for piped stdin.
#[derive(Debug)]
pub struct Lines<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Lines<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_answer(&mut self, question: &str) -> std::result::Result<String, PromptError> {
        write!(self.writer, "{} ", question)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        writeln!(self.writer)?;

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Backend for Lines<R, W> {
    fn confirm(&mut self, question: &str, default: bool) -> std::result::Result<bool, PromptError> {
        let answer = self.read_answer(&format!("{} (y/n)", question))?;
        Ok(match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => true,
            "n" | "no" => false,
            _ => default,
        })
    }

    fn select(
        &mut self,
        question: &str,
        options: &[String],
        default: Option<usize>,
    ) -> std::result::Result<usize, PromptError> {
        writeln!(self.writer, "{}", question)?;
        for (i, option) in options.iter().enumerate() {
            let marker = if Some(i) == default { "*" } else { " " };
            writeln!(self.writer, " {}[{}] {}", marker, i + 1, option)?;
        }

        loop {
            let answer = self.read_answer(">")?;
            let answer = answer.trim();

            if answer.is_empty() {
                if let Some(index) = default {
                    return Ok(index);
                }
            } else if let Some(index) = answer
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=options.len()).contains(n))
            {
                return Ok(index - 1);
            } else if let Some(index) = options.iter().position(|o| o == answer) {
                return Ok(index);
            }

            self.notice(&format!("Value \"{}\" is invalid", answer))?;
        }
    }

    fn input(&mut self, question: &str, _hidden: bool) -> std::result::Result<String, PromptError> {
        self.read_answer(question)
    }

    fn notice(&mut self, message: &str) -> std::result::Result<(), PromptError> {
        writeln!(self.writer, "{}", message)?;
        Ok(())
    }
}

/// Terminal when stdin is a TTY, line input otherwise.
pub enum Console {
    Terminal(Terminal),
    Piped(Lines<StdinLock<'static>, Stderr>),
}

impl Console {
    pub fn detect() -> Self {
        if io::stdin().is_terminal() {
            Console::Terminal(Terminal)
        } else {
            debug!("stdin is not a terminal, reading answers line by line");
            Console::Piped(Lines::new(io::stdin().lock(), io::stderr()))
        }
    }
}

impl Backend for Console {
    fn confirm(&mut self, question: &str, default: bool) -> std::result::Result<bool, PromptError> {
        match self {
            Console::Terminal(t) => t.confirm(question, default),
            Console::Piped(l) => l.confirm(question, default),
        }
    }

    fn select(
        &mut self,
        question: &str,
        options: &[String],
        default: Option<usize>,
    ) -> std::result::Result<usize, PromptError> {
        match self {
            Console::Terminal(t) => t.select(question, options, default),
            Console::Piped(l) => l.select(question, options, default),
        }
    }

    fn input(&mut self, question: &str, hidden: bool) -> std::result::Result<String, PromptError> {
        match self {
            Console::Terminal(t) => t.input(question, hidden),
            Console::Piped(l) => l.input(question, hidden),
        }
    }

    fn notice(&mut self, message: &str) -> std::result::Result<(), PromptError> {
        match self {
            Console::Terminal(t) => t.notice(message),
            Console::Piped(l) => l.notice(message),
        }
    }
}
