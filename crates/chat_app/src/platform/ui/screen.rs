use std::io;

use console::Term;

/// Terminal output with the input prompt kept on the last line.
///
/// Whatever is written while the prompt is showing starts on a fresh line,
/// then the prompt is drawn again below it.
pub(crate) struct Screen {
    term: Term,
    prompt_shown: bool,
}

impl Screen {
    pub(crate) fn new(term: Term) -> Self {
        Self {
            term,
            prompt_shown: false,
        }
    }

    pub(crate) fn stdout() -> Self {
        Self::new(Term::stdout())
    }

    /// Writes `lines` above the prompt. Nothing is written for an empty frame.
    pub(crate) fn write_above_prompt(&mut self, lines: &[String], prompt: &str) -> io::Result<()> {
        if lines.is_empty() {
            return Ok(());
        }
        self.release_prompt_line()?;
        for line in lines {
            self.term.write_line(line)?;
        }
        self.term.write_str(prompt)?;
        self.prompt_shown = true;
        self.term.flush()
    }

    fn release_prompt_line(&mut self) -> io::Result<()> {
        if !std::mem::take(&mut self.prompt_shown) {
            return Ok(());
        }
        if self.term.is_term() {
            self.term.clear_line()
        } else {
            // Redirected output cannot be rewound; end the prompt line instead.
            self.term.write_line("")
        }
    }
}
