//! Line-oriented prompting over any reader/writer pair
//!
//! The console menu talks to the user only through [`Prompter`], so tests can
//! script a session with in-memory buffers.

use std::io::{BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};

use crate::error::ExpenseResult;

/// Answers accepted as "yes"
const YES: [&str; 5] = ["s", "si", "sí", "y", "yes"];

pub struct Prompter<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear_screen: false,
        }
    }

    /// Clear the terminal between screens (only useful on a real terminal)
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Give back the writer (scripted sessions inspect it)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line
    pub fn say(&mut self, message: impl AsRef<str>) -> ExpenseResult<()> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Print text as-is
    pub fn print(&mut self, text: impl AsRef<str>) -> ExpenseResult<()> {
        write!(self.output, "{}", text.as_ref())?;
        self.output.flush()?;
        Ok(())
    }

    /// Ask for a line; `None` at end of input
    pub fn ask(&mut self, label: &str) -> ExpenseResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask a yes/no question; end of input counts as no
    pub fn confirm(&mut self, question: &str) -> ExpenseResult<bool> {
        let answer = self.ask(&format!("{} (s/n): ", question))?;
        Ok(answer.map(|a| is_yes(&a)).unwrap_or(false))
    }

    /// Ask until `parse` accepts the answer
    ///
    /// A blank answer returns `Ok(Some(None))` when `allow_blank`; end of
    /// input returns `Ok(None)`.
    pub fn ask_until<T, F>(
        &mut self,
        label: &str,
        allow_blank: bool,
        mut parse: F,
    ) -> ExpenseResult<Option<Option<T>>>
    where
        F: FnMut(&str) -> ExpenseResult<T>,
    {
        loop {
            let Some(answer) = self.ask(label)? else {
                return Ok(None);
            };
            if answer.is_empty() && allow_blank {
                return Ok(Some(None));
            }
            match parse(&answer) {
                Ok(value) => return Ok(Some(Some(value))),
                Err(e) => self.say(format!("  {}", e))?,
            }
        }
    }

    /// Clear the screen when enabled
    pub fn clear(&mut self) -> ExpenseResult<()> {
        if self.clear_screen {
            crossterm::execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Wait for Enter before redrawing
    pub fn pause(&mut self) -> ExpenseResult<()> {
        if self.clear_screen {
            self.ask("\nPresione Enter para continuar...")?;
        }
        Ok(())
    }
}

/// Whether an answer means "yes"
pub fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    YES.contains(&answer.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_trims_and_detects_eof() {
        let mut p = prompter("  hola \r\n");
        assert_eq!(p.ask("> ").unwrap(), Some("hola".to_string()));
        assert_eq!(p.ask("> ").unwrap(), None);
    }

    #[test]
    fn test_confirm_answers() {
        for yes in ["s", "SI", "sí", "y", "Yes"] {
            assert!(is_yes(yes), "{}", yes);
        }
        assert!(!is_yes("n"));
        assert!(!is_yes(""));

        let mut p = prompter("no\n");
        assert!(!p.confirm("¿Seguro?").unwrap());
        assert!(!p.confirm("¿Seguro?").unwrap());
    }

    #[test]
    fn test_ask_until_reprompts() {
        let mut p = prompter("abc\n-1\n7\n");
        let value = p
            .ask_until("Número: ", false, |s| {
                s.parse::<u32>()
                    .map_err(|_| crate::error::ExpenseError::Validation("no".into()))
            })
            .unwrap();
        assert_eq!(value, Some(Some(7)));
        let out = String::from_utf8(p.output).unwrap();
        assert_eq!(out.matches("Número: ").count(), 3);
    }

    #[test]
    fn test_ask_until_blank() {
        let mut p = prompter("\n");
        let value = p
            .ask_until("x: ", true, |s| Ok(s.to_string()))
            .unwrap();
        assert_eq!(value, Some(None));
    }
}
