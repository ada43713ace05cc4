//! The `quizmaker take` command.
//!
//! Reads one command per line from stdin while the session's countdown runs
//! alongside. Commands: `1`-`4` answer, `n` next, `p` previous, `f` finish,
//! `q` leave without results.

use std::io::{BufRead, Write};

use anyhow::Result;
use tokio::sync::mpsc;

use quizmaker_core::model::{format_clock, OPTIONS_PER_QUESTION};
use quizmaker_core::session::FinishReason;
use quizmaker_core::{
    Confirmation, QuizMaker, QuizSession, QuizmakerConfig, SessionError, TickOutcome,
};

use super::{is_yes, open_app};

/// What the next input line answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompt {
    Command,
    ConfirmFinish,
}

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Answer(usize),
    Next,
    Previous,
    Finish,
    Leave,
    Help,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    match line.trim().to_lowercase().as_str() {
        "n" | "next" => Input::Next,
        "p" | "prev" | "previous" => Input::Previous,
        "f" | "finish" => Input::Finish,
        "q" | "quit" => Input::Leave,
        "?" | "h" | "help" => Input::Help,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => Input::Answer(n - 1),
            _ => Input::Unknown,
        },
    }
}

pub async fn execute(config: &QuizmakerConfig, id: String) -> Result<()> {
    let mut app = open_app(config)?;
    let session = app.start_session(&id)?;

    print_intro(session);
    session.arm_timer();
    print_question(session);

    let mut lines = spawn_line_reader();
    let mut prompt = Prompt::Command;

    while session.is_active() {
        tokio::select! {
            Some(outcome) = session.next_tick(), if session.timer_armed() => {
                if let TickOutcome::Remaining(left) = outcome {
                    if left % 60 == 0 || left <= 10 {
                        println!("Time left: {}", format_clock(left));
                    }
                }
            }
            line = lines.recv() => {
                let Some(line) = line.transpose()? else {
                    println!("Leaving quiz.");
                    break;
                };
                match prompt {
                    Prompt::ConfirmFinish => {
                        prompt = Prompt::Command;
                        if session.finish(Confirmation::from(is_yes(&line)))?.is_none() {
                            println!("Continuing quiz.");
                            print_question(session);
                        }
                    }
                    Prompt::Command => match parse_input(&line) {
                        Input::Answer(option) => match session.select_answer(option) {
                            Ok(feedback) => println!("{}", feedback.message()),
                            Err(SessionError::OptionOutOfRange { .. }) => {
                                println!("Choose an option from 1 to {OPTIONS_PER_QUESTION}.");
                            }
                            Err(e) => return Err(e.into()),
                        },
                        Input::Next => {
                            if session.go_next() {
                                print_question(session);
                            } else {
                                println!("This is the last question. Enter f to finish.");
                            }
                        }
                        Input::Previous => {
                            if session.go_previous() {
                                print_question(session);
                            } else {
                                println!("This is the first question.");
                            }
                        }
                        Input::Finish => {
                            if config.confirm_destructive {
                                print!("Are you sure you want to finish the quiz and see your results? [y/N] ");
                                std::io::stdout().flush()?;
                                prompt = Prompt::ConfirmFinish;
                            } else {
                                session.finish(Confirmation::Confirmed)?;
                            }
                        }
                        Input::Leave => {
                            println!("Leaving quiz.");
                            break;
                        }
                        Input::Help => print_help(),
                        Input::Unknown => println!("Unknown command. Enter ? for help."),
                    },
                }
            }
        }
    }

    if session.is_active() {
        app.leave_session();
        return Ok(());
    }

    print_results(session);
    app.leave_session();
    Ok(())
}

/// Read stdin on a plain thread so a pending read never holds up runtime
/// shutdown once the session is over.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn print_intro(session: &QuizSession) {
    let quiz = session.quiz();
    println!("{}", quiz.title);
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    if let Some(seconds) = session.remaining_seconds() {
        println!("Time left: {}", format_clock(seconds));
    }
    println!("Enter ? for help.");
}

fn print_question(session: &QuizSession) {
    let Some(question) = session.current_question() else {
        return;
    };
    let (number, total) = session.progress();

    println!();
    println!("Question {number} of {total}");
    println!("{}", question.text);
    let selected = session.current_answer();
    for (i, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(i) { "*" } else { " " };
        println!(" {marker}{}) {option}", i + 1);
    }
    if let Some(feedback) = selected.and_then(|i| session.feedback_for(i)) {
        println!("{}", feedback.message());
    }
}

fn print_help() {
    println!("  1-4  select an answer");
    println!("  n    next question");
    println!("  p    previous question");
    println!("  f    finish and see results");
    println!("  q    leave without results");
}

fn print_results(session: &QuizSession) {
    let summary = QuizMaker::score_of(session);

    println!();
    if session.finish_reason() == Some(FinishReason::TimeUp) {
        println!("Time left: 00:00");
        println!("Time is up! Showing your results.");
    }
    println!("{}", summary.headline());

    for line in summary.details(session.quiz()) {
        let verdict = if line.is_correct { "correct" } else { "incorrect" };
        println!();
        println!("Q{}. {} [{verdict}]", line.number, line.question);
        println!("  Your answer: {}", line.user_answer_text());
        println!("  Correct answer: {}", line.correct_answer);
    }
}
