//! End-to-end behavior of question sessions and mode cycling through the
//! public API.

use tiller_rs::prelude::*;

/// Host that counts every directive it receives.
#[derive(Default)]
struct CountingHost {
    focus: Vec<Focus>,
    marks: Vec<(usize, bool)>,
}

impl FocusTarget for CountingHost {
    fn focus(&mut self, focus: Focus) {
        self.focus.push(focus);
    }

    fn mark_active(&mut self, tab: usize, active: bool) {
        self.marks.push((tab, active));
    }
}

fn question(text: &str, labels: &[&str]) -> Question {
    Question::new(text, labels.iter().map(|l| Choice::new(*l)).collect())
}

/// Feed commands until one finishes the session, collecting every outcome.
fn run(session: &mut QuestionSession, commands: &[SessionCommand]) -> Vec<SessionOutcome> {
    let mut host = CountingHost::default();
    session.start(&mut host);
    commands
        .iter()
        .filter_map(|cmd| match session.dispatch(*cmd, &mut host) {
            Dispatch::Finished(outcome) => Some(outcome),
            _ => None,
        })
        .collect()
}

#[test]
fn submit_without_navigation_uses_defaults() {
    let mut session = QuestionSession::new(vec![
        question("Q1 text", &["yes", "no"]),
        question("Q2 text", &[]),
    ]);

    let outcomes = run(&mut session, &[SessionCommand::Submit]);

    assert_eq!(
        outcomes,
        vec![SessionOutcome::Answered(vec![
            AnswerRecord {
                question: "Q1 text".into(),
                answer: "yes".into(),
                is_other: false,
            },
            AnswerRecord {
                question: "Q2 text".into(),
                answer: String::new(),
                is_other: true,
            },
        ])]
    );
}

#[test]
fn escape_in_free_text_input_cancels_exactly_once() {
    let mut session = QuestionSession::new(vec![
        question("Q1 text", &["yes", "no"]),
        question("Q2 text", &[]),
    ]);

    let outcomes = run(
        &mut session,
        &[
            SessionCommand::MoveUp,
            SessionCommand::InsertChar('h'),
            SessionCommand::InsertChar('i'),
            SessionCommand::Escape,
            SessionCommand::Escape,
            SessionCommand::Submit,
        ],
    );

    assert_eq!(outcomes, vec![SessionOutcome::Cancelled]);
}

#[test]
fn escape_reaches_session_from_either_focus() {
    let from_panel = run(
        &mut QuestionSession::new(vec![question("Q", &["a"])]),
        &[SessionCommand::Escape],
    );
    let from_input = run(
        &mut QuestionSession::new(vec![question("Q", &[])]),
        &[SessionCommand::Escape],
    );
    assert_eq!(from_panel, vec![SessionOutcome::Cancelled]);
    assert_eq!(from_input, vec![SessionOutcome::Cancelled]);
}

#[test]
fn answers_follow_question_order_not_active_tab() {
    let mut session = QuestionSession::new(vec![
        question("A", &["a1", "a2"]),
        question("B", &["b1", "b2", "b3"]),
    ]);

    let outcomes = run(
        &mut session,
        &[
            SessionCommand::NextTab,
            SessionCommand::MoveDown,
            SessionCommand::MoveDown,
            SessionCommand::Submit,
        ],
    );

    let [SessionOutcome::Answered(answers)] = outcomes.as_slice() else {
        panic!("expected one Answered outcome, got {outcomes:?}");
    };
    let pairs: Vec<(&str, &str)> = answers
        .iter()
        .map(|a| (a.question.as_str(), a.answer.as_str()))
        .collect();
    assert_eq!(pairs, vec![("A", "a1"), ("B", "b3")]);
}

#[test]
fn other_answer_is_trimmed_on_submit() {
    let mut session = QuestionSession::new(vec![question("Q", &["a"])]);
    let mut commands = vec![SessionCommand::MoveDown];
    commands.extend("  hi  ".chars().map(SessionCommand::InsertChar));
    commands.push(SessionCommand::Submit);

    let outcomes = run(&mut session, &commands);
    assert_eq!(
        outcomes,
        vec![SessionOutcome::Answered(vec![AnswerRecord {
            question: "Q".into(),
            answer: "hi".into(),
            is_other: true,
        }])]
    );
}

#[test]
fn next_tab_len_times_returns_to_start() {
    for len in 1..=4 {
        let questions = (0..len).map(|i| question(&format!("Q{i}"), &["x"])).collect();
        let mut session = QuestionSession::new(questions);
        let mut host = CountingHost::default();
        session.start(&mut host);

        session.dispatch(SessionCommand::NextTab, &mut host);
        let after_one = session.active_tab();
        for _ in 1..len {
            session.dispatch(SessionCommand::NextTab, &mut host);
        }
        assert_eq!(session.active_tab(), 0, "len = {len}");
        if len == 1 {
            assert_eq!(after_one, 0);
            assert_eq!(host.marks, vec![(0, true)]);
        }
    }
}

#[test]
fn selection_arithmetic_holds_for_any_sequence() {
    for choices in 0..4 {
        let labels: Vec<String> = (0..choices).map(|i| format!("c{i}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let k = choices + 1;

        for n in 0..(2 * k + 1) {
            let mut down = QuestionSession::new(vec![question("Q", &refs)]);
            run(&mut down, &vec![SessionCommand::MoveDown; n]);
            assert_eq!(down.panels()[0].selected_option(), n % k);

            let mut up = QuestionSession::new(vec![question("Q", &refs)]);
            run(&mut up, &vec![SessionCommand::MoveUp; n]);
            assert_eq!(up.panels()[0].selected_option(), (k - n % k) % k);

            for panel in down.panels().iter().chain(up.panels()) {
                assert_eq!(
                    panel.is_other_mode(),
                    panel.selected_option() == choices
                );
            }
        }
    }
}

#[test]
fn mode_cycle_and_parse() {
    assert_eq!(next_mode(AgentMode::AutoApprove), AgentMode::Plan);
    assert_eq!(next_mode(AgentMode::Plan), AgentMode::Default);
    assert_eq!(next_mode(AgentMode::Default), AgentMode::AutoApprove);

    assert_eq!(parse_mode("plan"), Some(AgentMode::Plan));
    assert_eq!(parse_mode("PLAN"), Some(AgentMode::Plan));
    assert_eq!(parse_mode("bogus"), None);

    let mut indicator = ModeIndicator::default();
    let seen: Vec<AgentMode> = (0..3).map(|_| indicator.cycle()).collect();
    assert_eq!(
        seen,
        vec![AgentMode::Plan, AgentMode::Default, AgentMode::AutoApprove]
    );
}
