//! The interactive grammar workbench.
//!
//! Lines starting with `:` are commands; any other line is matched against
//! the current grammar.

use std::fmt::Write as _;

use phrasebook_foundation::{Error, ErrorKind, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor, command_keywords};
use crate::session::Session;

const HELP: &str = "\
:grammar <text>      Compile <text> as the current grammar
:grammar             Show the current grammar
:match <input>       Match <input> (a bare line does the same)
:unroll              List every literal string of the grammar
:greedy on|off       Prefer longer (on) or shorter (off) spans
:leftover on|off     Allow unconsumed trailing input
:trace on|off        Print the matcher's steps after each match
:help                Show this help
:quit                Exit (Ctrl+D also works)";

/// What the REPL does with the outcome of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print.
    Text(String),
    /// Nothing to print.
    Silent,
    /// Leave the loop.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (grammar, settings).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(mut editor: E) -> Self {
        editor.set_keywords(command_keywords());
        Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "pb> ".to_string(),
        }
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop until `:quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let line = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        if line.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&line);

        match self.eval(&line) {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Silent) => {}
            Ok(Reply::Quit) => return Ok(false),
            Err(e) => Self::print_error(&e),
        }

        Ok(true)
    }

    /// Evaluates one line of input.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands, bad arguments, grammar compile
    /// errors, or matching before a grammar is set.
    pub fn eval(&mut self, line: &str) -> Result<Reply> {
        let Some(command) = line.strip_prefix(':') else {
            return self.eval_match(line);
        };

        // Everything after the first space is the argument, verbatim.
        let (name, arg) = match command.split_once(' ') {
            Some((name, arg)) => (name, Some(arg)),
            None => (command.trim_end(), None),
        };

        match name {
            "grammar" | "g" => match arg {
                Some(text) => {
                    let pattern = self.session.set_grammar(text)?;
                    Ok(Reply::Text(format!(
                        "grammar: {pattern} ({} nodes)",
                        pattern.len()
                    )))
                }
                None => Ok(Reply::Text(
                    self.session
                        .grammar()
                        .map_or_else(|| "no grammar set".to_string(), str::to_string),
                )),
            },
            "match" | "m" => self.eval_match(arg.unwrap_or("")),
            "unroll" | "u" => {
                let names = self.session.unroll()?;
                if names.is_empty() {
                    return Ok(Reply::Text("(no literal strings)".to_string()));
                }
                let text: Vec<String> = names.into_iter().collect();
                Ok(Reply::Text(text.join("\n")))
            }
            "greedy" => {
                let on = parse_switch(name, arg)?;
                self.session.set_greedy(on);
                Ok(Reply::Silent)
            }
            "leftover" => {
                let on = parse_switch(name, arg)?;
                self.session.set_allow_leftover(on);
                Ok(Reply::Silent)
            }
            "trace" => {
                let on = parse_switch(name, arg)?;
                self.session.set_tracing(on);
                Ok(Reply::Silent)
            }
            "help" | "h" | "?" => Ok(Reply::Text(HELP.to_string())),
            "quit" | "q" | "exit" => Ok(Reply::Quit),
            _ => Err(Error::new(ErrorKind::InvalidArgument(format!(
                "unknown command ':{name}' (try :help)"
            )))),
        }
    }

    fn eval_match(&mut self, input: &str) -> Result<Reply> {
        let report = self.session.match_input(input)?;
        let mut text = report.to_string();
        if self.session.is_tracing() {
            let trace = self.session.trace_output();
            if !trace.is_empty() {
                let _ = write!(text, "\n{trace}");
            }
        }
        Ok(Reply::Text(text))
    }

    fn print_error(error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
        if let Some(context) = &error.context {
            eprint!("{context}");
        }
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mPhrasebook\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Set a grammar with :grammar, then type lines to match. :help lists commands.\n");
    }
}

fn parse_switch(command: &str, arg: Option<&str>) -> Result<bool> {
    match arg.map(str::trim) {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err(Error::new(ErrorKind::InvalidArgument(format!(
            ":{command} expects 'on' or 'off'"
        )))),
    }
}
