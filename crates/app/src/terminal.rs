//! Line-oriented quiz runner for terminals.

use std::fmt::Write as _;
use std::sync::Arc;

use quiz_core::model::{ChapterDescriptor, Question, QuizSettings, SessionMode};
use quiz_core::scoring::ScoreReport;
use quiz_core::select::Selector;
use services::sessions::{format_remaining, option_label};
use services::{PresentationBridge, ReviewItem, SessionController, SessionPhase, Ticker};
use storage::QuestionSource;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

//
// ─── COMMANDS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCommand {
    /// One-based chapter number from the list.
    Pick(usize),
    All,
    /// Zero-based option index, typed as a letter.
    Answer(usize),
    Next,
    Previous,
    Submit,
    Yes,
    No,
    Menu,
    Help,
    Quit,
}

impl TerminalCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let token = line.trim().to_ascii_lowercase();
        let cmd = match token.as_str() {
            "all" => Self::All,
            "next" | ">" => Self::Next,
            "prev" | "previous" | "<" => Self::Previous,
            "submit" => Self::Submit,
            "yes" => Self::Yes,
            "no" => Self::No,
            "menu" => Self::Menu,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => {
                if let Ok(n) = token.parse::<usize>() {
                    return (n > 0).then_some(Self::Pick(n));
                }
                let mut chars = token.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_lowercase() => {
                        Some(Self::Answer(usize::from(c as u8 - b'a')))
                    }
                    _ => None,
                };
            }
        };
        Some(cmd)
    }
}

const HELP: &str = "\
Commands:
  <number>   start that chapter        all      start all chapters
  <letter>   choose an answer          next/>   next question
  prev/<     previous question         submit   hand in the quiz
  menu       back to chapters          quit     leave";

//
// ─── BRIDGE ────────────────────────────────────────────────────────────────────
//

/// Renders controller output as text, buffered until the runner flushes it.
///
/// Confirmation works like the desktop banner: an unarmed request prints the
/// prompt and declines; typing `yes` arms the bridge and submits again.
#[derive(Debug, Default)]
pub struct TerminalBridge {
    out: String,
    remaining_secs: Option<u32>,
    pending_confirm: Option<usize>,
    submit_armed: bool,
}

impl TerminalBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }

    #[must_use]
    pub fn pending_confirm(&self) -> Option<usize> {
        self.pending_confirm
    }

    pub fn arm_submit(&mut self) {
        self.submit_armed = true;
    }

    pub fn dismiss_confirm(&mut self) {
        self.pending_confirm = None;
        self.submit_armed = false;
    }

    pub fn note(&mut self, message: &str) {
        let _ = writeln!(self.out, "{message}");
    }
}

impl PresentationBridge for TerminalBridge {
    fn render_chapters(&mut self, chapters: &[ChapterDescriptor], all_chapters_sample: usize) {
        self.remaining_secs = None;
        self.dismiss_confirm();
        let _ = writeln!(self.out, "\nChapters:");
        for (i, chapter) in chapters.iter().enumerate() {
            let badge = chapter
                .week
                .as_deref()
                .map(|week| format!("[{week}] "))
                .unwrap_or_default();
            let _ = writeln!(
                self.out,
                "  {:>2}) {badge}{} ({} questions)",
                i + 1,
                chapter.title,
                chapter.question_count
            );
        }
        if !chapters.is_empty() {
            let _ = writeln!(
                self.out,
                "  all) All chapters ({all_chapters_sample} random questions)"
            );
        }
        let _ = writeln!(self.out, "Pick a chapter, or type help.");
    }

    fn show_loading(&mut self) {
        let _ = writeln!(self.out, "Loading questions...");
    }

    fn show_question(
        &mut self,
        question: &Question,
        index: usize,
        total: usize,
        prior_answer: Option<usize>,
    ) {
        self.pending_confirm = None;
        let clock = self
            .remaining_secs
            .map(|secs| format!("   [{}]", format_remaining(secs)))
            .unwrap_or_default();
        let _ = writeln!(self.out, "\nQuestion {} of {total}{clock}", index + 1);
        let _ = writeln!(self.out, "{}", question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            let marker = if prior_answer == Some(i) { '*' } else { ' ' };
            let _ = writeln!(self.out, " {marker}{}) {}", option_label(i), option.text);
        }
        let hint = if index + 1 >= total { "submit" } else { "next" };
        let _ = writeln!(self.out, "Answer with a letter, then {hint}.");
    }

    fn update_progress(&mut self, _index: usize, _total: usize) {}

    fn update_timer(&mut self, remaining_secs: u32) {
        let first = self.remaining_secs.is_none();
        self.remaining_secs = Some(remaining_secs);
        if !first && remaining_secs > 0 && (remaining_secs % 300 == 0 || remaining_secs == 60) {
            let _ = writeln!(self.out, "[{} left]", format_remaining(remaining_secs));
        }
        if remaining_secs == 0 {
            let _ = writeln!(self.out, "\nTime is up.");
        }
    }

    fn confirm_force_submit(&mut self, unanswered: usize) -> bool {
        if std::mem::take(&mut self.submit_armed) {
            self.pending_confirm = None;
            return true;
        }
        self.pending_confirm = Some(unanswered);
        let _ = writeln!(
            self.out,
            "{unanswered} question(s) unanswered. Submit anyway? (yes/no)"
        );
        false
    }

    fn show_results(&mut self, report: &ScoreReport, review: &[ReviewItem]) {
        self.remaining_secs = None;
        self.dismiss_confirm();
        let _ = writeln!(
            self.out,
            "\nScore: {}/{} ({}%)  correct {}  incorrect {}  unanswered {}",
            report.correct(),
            report.total(),
            report.percentage(),
            report.correct(),
            report.incorrect(),
            report.unanswered()
        );
        for item in review {
            let status = if item.is_correct { "correct" } else { "wrong" };
            let _ = writeln!(self.out, "\n{}. [{status}] {}", item.number, item.prompt);
            match item.user_answer.as_deref() {
                Some(answer) => {
                    let _ = writeln!(self.out, "   your answer: {answer}");
                }
                None => {
                    let _ = writeln!(self.out, "   not answered");
                }
            }
            if !item.is_correct {
                if let Some(correct) = item.correct_answer.as_deref() {
                    let _ = writeln!(self.out, "   correct answer: {correct}");
                }
            }
            if let Some(explanation) = item.explanation.as_deref() {
                let _ = writeln!(self.out, "   {explanation}");
            }
        }
        let _ = writeln!(self.out, "\nType menu for chapters or quit.");
    }

    fn show_error(&mut self, message: &str) {
        let _ = writeln!(self.out, "error: {message}");
    }
}

//
// ─── RUNNER ────────────────────────────────────────────────────────────────────
//

/// Outcome of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn apply(
    ctl: &mut SessionController<TerminalBridge>,
    command: TerminalCommand,
) -> Flow {
    let result = match command {
        TerminalCommand::Quit => return Flow::Quit,
        TerminalCommand::Help => {
            ctl.bridge_mut().note(HELP);
            Ok(())
        }
        TerminalCommand::Pick(n) => match ctl.phase() {
            SessionPhase::Active => {
                ctl.bridge_mut().note("Finish or leave (menu) the current quiz first.");
                Ok(())
            }
            _ => match n.checked_sub(1).and_then(|i| ctl.chapters().get(i)).map(|c| c.id.clone()) {
                Some(id) => ctl.begin(SessionMode::Chapter(id)).await.map(|_| ()),
                None => {
                    ctl.bridge_mut().note("No chapter with that number.");
                    Ok(())
                }
            },
        },
        TerminalCommand::All => match ctl.phase() {
            SessionPhase::Active => {
                ctl.bridge_mut().note("Finish or leave (menu) the current quiz first.");
                Ok(())
            }
            _ => ctl.begin(SessionMode::AllChapters).await.map(|_| ()),
        },
        TerminalCommand::Answer(option) => ctl.record_answer(option),
        TerminalCommand::Next => ctl.go_to_next(),
        TerminalCommand::Previous => ctl.go_to_previous(),
        TerminalCommand::Submit => {
            ctl.submit(false);
            Ok(())
        }
        TerminalCommand::Yes => {
            if ctl.bridge().pending_confirm().is_some() {
                ctl.bridge_mut().arm_submit();
                ctl.submit(false);
            }
            Ok(())
        }
        TerminalCommand::No => {
            ctl.bridge_mut().dismiss_confirm();
            Ok(())
        }
        TerminalCommand::Menu => {
            ctl.back_to_chapters();
            Ok(())
        }
    };

    if let Err(err) = result {
        // Recoverable failures were already surfaced by the controller.
        if !err.is_recoverable() {
            ctl.bridge_mut().show_error(&err.to_string());
        }
    }
    Flow::Continue
}

async fn flush(
    stdout: &mut tokio::io::Stdout,
    ctl: &mut SessionController<TerminalBridge>,
) -> std::io::Result<()> {
    let text = ctl.bridge_mut().take_output();
    if !text.is_empty() {
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}

/// Run an interactive quiz on stdin/stdout until `quit` or end of input.
pub async fn play(
    source: Arc<dyn QuestionSource>,
    settings: QuizSettings,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let selector = seed.map_or_else(Selector::from_os, Selector::from_seed);
    let mut ctl = SessionController::new(source, TerminalBridge::new())
        .with_settings(settings)
        .with_selector(selector);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = Ticker::every_second();

    let opened = ctl.open().await;
    flush(&mut stdout, &mut ctl).await?;
    opened?;

    loop {
        ticker.sync(ctl.timer_token());
        tokio::select! {
            token = ticker.tick() => {
                ctl.tick(token);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let flow = match TerminalCommand::parse(&line) {
                    Some(command) => apply(&mut ctl, command).await,
                    None => {
                        ctl.bridge_mut().note("Unrecognised input; type help.");
                        Flow::Continue
                    }
                };
                if flow == Flow::Quit {
                    break;
                }
            }
        }
        flush(&mut stdout, &mut ctl).await?;
    }

    flush(&mut stdout, &mut ctl).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerOption, ChapterId};
    use storage::InMemorySource;

    #[test]
    fn parses_commands() {
        assert_eq!(TerminalCommand::parse(" 2 "), Some(TerminalCommand::Pick(2)));
        assert_eq!(TerminalCommand::parse("0"), None);
        assert_eq!(TerminalCommand::parse("ALL"), Some(TerminalCommand::All));
        assert_eq!(TerminalCommand::parse("b"), Some(TerminalCommand::Answer(1)));
        assert_eq!(TerminalCommand::parse(">"), Some(TerminalCommand::Next));
        assert_eq!(TerminalCommand::parse("prev"), Some(TerminalCommand::Previous));
        assert_eq!(TerminalCommand::parse("bb"), None);
        assert_eq!(TerminalCommand::parse("7x"), None);
    }

    fn controller() -> SessionController<TerminalBridge> {
        let chapter = ChapterDescriptor {
            id: ChapterId::new("1"),
            title: "Iterators".into(),
            instructor: String::new(),
            date: String::new(),
            description: String::new(),
            question_count: 2,
            source_file: "iter.json".into(),
            week: Some("Week 5".into()),
        };
        let bank = vec![
            Question::new(
                "What does map return?",
                vec![
                    AnswerOption::new("a Vec", false),
                    AnswerOption::new("an adapter", true).with_reason("iterators are lazy"),
                ],
            ),
            Question::new(
                "Which method consumes?",
                vec![AnswerOption::new("collect", true), AnswerOption::new("filter", false)],
            ),
        ];
        let source = InMemorySource::new().with_chapter(chapter, bank);
        SessionController::new(Arc::new(source), TerminalBridge::new())
            .with_selector(Selector::from_seed(5))
    }

    #[tokio::test]
    async fn plays_a_chapter_end_to_end() {
        let mut ctl = controller();
        ctl.open().await.unwrap();
        let menu = ctl.bridge_mut().take_output();
        assert!(menu.contains("[Week 5] Iterators"), "{menu}");
        assert!(menu.contains("all) All chapters (50 random questions)"), "{menu}");

        apply(&mut ctl, TerminalCommand::Pick(1)).await;
        let screen = ctl.bridge_mut().take_output();
        assert!(screen.contains("Question 1 of 2   [20:00]"), "{screen}");

        let right = ctl.active().unwrap().current_question().correct_index().unwrap();
        apply(&mut ctl, TerminalCommand::Answer(right)).await;
        apply(&mut ctl, TerminalCommand::Next).await;
        apply(&mut ctl, TerminalCommand::Submit).await;
        let prompt = ctl.bridge_mut().take_output();
        assert!(prompt.contains("1 question(s) unanswered"), "{prompt}");
        assert_eq!(ctl.phase(), SessionPhase::Active);

        apply(&mut ctl, TerminalCommand::Yes).await;
        let results = ctl.bridge_mut().take_output();
        assert!(results.contains("Score: 1/2 (50%)"), "{results}");
        assert!(results.contains("not answered"), "{results}");
        assert_eq!(ctl.phase(), SessionPhase::Submitted);

        assert_eq!(apply(&mut ctl, TerminalCommand::Quit).await, Flow::Quit);
    }

    #[tokio::test]
    async fn invalid_moves_are_reported_not_fatal() {
        let mut ctl = controller();
        ctl.open().await.unwrap();
        ctl.bridge_mut().take_output();

        apply(&mut ctl, TerminalCommand::Next).await;
        assert!(ctl.bridge_mut().take_output().contains("no quiz is active"));

        apply(&mut ctl, TerminalCommand::Pick(9)).await;
        assert!(ctl.bridge_mut().take_output().contains("No chapter"));

        apply(&mut ctl, TerminalCommand::Pick(1)).await;
        apply(&mut ctl, TerminalCommand::Answer(7)).await;
        assert!(ctl.bridge_mut().take_output().contains("out of range"));
        assert_eq!(ctl.active().unwrap().current_answer(), None);
    }
}
