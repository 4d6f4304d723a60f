//! Console input for the interactive session

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use dialoguer::{Input, Password};

/// Source of answers to session prompts
pub trait Prompt {
    /// Ask for a line of text
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Ask for a secret; terminal implementations do not echo it
    fn password(&mut self, prompt: &str) -> Result<String>;
}

/// Pick the prompt implementation for the current stdin
///
/// Interactive terminals get dialoguer prompts; piped input is read line by
/// line so a session can be scripted.
pub fn for_stdin() -> Box<dyn Prompt> {
    if atty::is(atty::Stream::Stdin) {
        Box::new(TerminalPrompt)
    } else {
        Box::new(LinePrompt::new(io::stdin().lock()))
    }
}

/// dialoguer-backed prompts
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn input(&mut self, prompt: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        let value = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(value)
    }
}

/// Plain line reader for non-terminal input
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            bail!("Input closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead> Prompt for LinePrompt<R> {
    fn input(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_prompt_strips_line_endings() {
        let mut prompt = LinePrompt::new("alice\r\nsecret\n".as_bytes());
        assert_eq!(prompt.input("Username").unwrap(), "alice");
        assert_eq!(prompt.password("Password").unwrap(), "secret");
    }

    #[test]
    fn test_line_prompt_errors_at_end_of_input() {
        let mut prompt = LinePrompt::new("".as_bytes());
        assert!(prompt.input("Username").is_err());
    }
}
