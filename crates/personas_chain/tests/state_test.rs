use personas_chain::{ChainState, ContextBudget};
use personas_core::ChainStep;
use personas_error::{ChainErrorKind, PersonasErrorKind};

fn steps(n: usize) -> Vec<ChainStep> {
    (0..n)
        .map(|i| ChainStep::new(format!("step {i}"), format!("prompt {i}")))
        .collect()
}

fn budget() -> ContextBudget {
    ContextBudget::new(3000, 3).unwrap()
}

fn chain_kind(err: &personas_error::PersonasError) -> &ChainErrorKind {
    match err.kind() {
        PersonasErrorKind::Chain(e) => &e.kind,
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_initialize_gives_input_to_first_step_only() {
    let chain = ChainState::initialize(&steps(3), "transcript", budget()).unwrap();

    assert_eq!(*chain.progress(), 0.0);
    assert_eq!(chain.final_output(), &None);
    assert_eq!(chain.original_input(), "transcript");
    assert_eq!(chain.steps()[0].input().as_deref(), Some("transcript"));
    assert!(chain.steps()[1..].iter().all(|s| s.input().is_none()));
    assert!(*chain.steps()[2].is_last());
    assert!(!*chain.steps()[1].is_last());
    assert_eq!(chain.input_char_budget(), 6000);
    assert_eq!(chain.reserved_output_budget(), 1000);
}

#[test]
fn test_empty_chain_is_rejected() {
    let err = ChainState::initialize(&[], "transcript", budget()).unwrap_err();
    assert_eq!(chain_kind(&err), &ChainErrorKind::EmptyChain);
}

#[test]
fn test_progress_is_monotonic_and_ends_at_one() {
    for n in 1..=9 {
        let mut chain = ChainState::initialize(&steps(n), "x", budget()).unwrap();
        let mut last = *chain.progress();
        for i in 0..n {
            chain = chain.complete_step(i, format!("out {i}")).unwrap();
            assert!(*chain.progress() >= last);
            last = *chain.progress();
        }
        assert_eq!(*chain.progress(), 1.0);
        assert!(chain.is_finished());
        assert_eq!(chain.final_output().as_deref(), Some(format!("out {}", n - 1).as_str()));
    }
}

#[test]
fn test_sequential_dependency_and_single_active_step() {
    let mut chain = ChainState::initialize(&steps(4), "x", budget()).unwrap();
    for i in 0..4 {
        let active: Vec<_> = chain.steps().iter().filter(|s| s.is_active()).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(*active[0].index(), i);

        for j in 1..4 {
            let prev = &chain.steps()[j - 1];
            let step = &chain.steps()[j];
            assert_eq!(step.input().is_some(), *prev.is_complete());
            if *prev.is_complete() {
                assert_eq!(step.input(), prev.output());
            }
        }
        chain = chain.complete_step(i, format!("out {i}")).unwrap();
    }
    assert!(chain.active_step().is_none());
    assert!(chain.next_incomplete_step().is_none());
    assert_eq!(chain.completed_steps(), 4);
}

#[test]
fn test_complete_step_leaves_previous_snapshot_untouched() {
    let first = ChainState::initialize(&steps(2), "original", budget()).unwrap();
    let second = first.complete_step(0, "A").unwrap();

    assert!(first.steps()[0].output().is_none());
    assert!(first.steps()[1].input().is_none());
    assert_eq!(second.steps()[1].input().as_deref(), Some("A"));
    assert_eq!(second.original_input(), "original");
    assert_eq!(second.steps()[0].input().as_deref(), Some("original"));
}

#[test]
fn test_complete_step_rejects_out_of_order_indices() {
    let chain = ChainState::initialize(&steps(3), "x", budget()).unwrap();

    let err = chain.complete_step(7, "nope").unwrap_err();
    assert_eq!(chain_kind(&err), &ChainErrorKind::StepOutOfRange { index: 7, len: 3 });

    let err = chain.complete_step(1, "too early").unwrap_err();
    assert!(matches!(chain_kind(&err), ChainErrorKind::InvariantViolation(_)));

    let chain = chain.complete_step(0, "A").unwrap();
    let err = chain.complete_step(0, "again").unwrap_err();
    assert!(matches!(chain_kind(&err), ChainErrorKind::InvariantViolation(_)));
}

#[test]
fn test_progress_rounds_for_three_steps() {
    let chain = ChainState::initialize(&steps(3), "x", budget()).unwrap();
    let chain = chain.complete_step(0, "A").unwrap();
    assert_eq!(*chain.progress(), 0.33);
    let chain = chain.complete_step(1, "B").unwrap();
    assert_eq!(*chain.progress(), 0.67);
    assert!(!chain.is_finished());
}
