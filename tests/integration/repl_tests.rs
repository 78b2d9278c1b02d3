//! REPL sessions driven by a scripted editor.

use phrasebook_foundation::Result;
use phrasebook_runtime::{LineEditor, ReadResult, Repl, Reply, Session};

/// Feeds fixed lines, then reports end of input.
struct ScriptedEditor {
    lines: std::vec::IntoIter<String>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|l| (*l).to_string())
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.next().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_keywords(&mut self, _keywords: Vec<String>) {}
}

fn repl() -> Repl<ScriptedEditor> {
    Repl::with_editor(ScriptedEditor::new(&[])).without_banner()
}

#[test]
fn preloaded_session_is_used() {
    let mut session = Session::new();
    session.set_grammar("x").unwrap();
    let mut repl = Repl::with_editor(ScriptedEditor::new(&[])).with_session(session);
    assert_eq!(repl.eval("x").unwrap(), Reply::Text("match mark=0".to_string()));
}

#[test]
fn scripted_session_updates_settings() {
    let editor = ScriptedEditor::new(&[
        ":grammar take %item% [from %container%]",
        ":greedy off",
        ":leftover on",
        "take lamp from chest",
    ]);
    let mut repl = Repl::with_editor(editor).without_banner();
    repl.run().unwrap();

    let session = repl.session();
    assert_eq!(session.grammar(), Some("take %item% [from %container%]"));
    assert!(!session.greedy());
    assert!(session.allow_leftover());
}

#[test]
fn lazy_session_splits_at_the_optional() {
    let mut repl = repl();
    repl.eval(":grammar take %item% [from %container%]").unwrap();
    repl.eval(":greedy off").unwrap();
    let Reply::Text(out) = repl.eval("take lamp from chest").unwrap() else {
        panic!("expected a report");
    };
    assert_eq!(
        out,
        "match mark=0\n  %item% = \"lamp\"\n  %container% = \"chest\""
    );
}

#[test]
fn leftover_is_shown() {
    let mut repl = repl();
    repl.eval(":grammar (north|n)").unwrap();
    repl.eval(":leftover on").unwrap();
    assert_eq!(
        repl.eval("north quickly").unwrap(),
        Reply::Text("match mark=0\n  leftover: \" quickly\"".to_string())
    );
}

#[test]
fn failure_names_the_node() {
    let mut repl = repl();
    repl.eval(":grammar give %item% to %player%").unwrap();
    let Reply::Text(out) = repl.eval("give sword").unwrap() else {
        panic!("expected a report");
    };
    assert!(out.starts_with("no match (failed at "));
}

#[test]
fn session_match_report_fields() {
    let mut session = Session::new();
    session.set_grammar(r"(1¦buy|2¦sell) <\d+> %item%").unwrap();
    let report = session.match_input("sell 3 apples").unwrap();
    assert!(report.success);
    assert_eq!(report.mark, 2);
    assert_eq!(
        report.captures,
        vec![
            (r"<\d+>".to_string(), "3".to_string()),
            ("%item%".to_string(), "apples".to_string()),
        ]
    );
}
