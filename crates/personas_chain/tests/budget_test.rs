use personas_chain::{ContextBudget, DEFAULT_CHARS_PER_TOKEN, InMemoryModelRegistry};
use personas_core::ModelInfo;
use personas_error::{ChainErrorKind, PersonasErrorKind};

#[test]
fn test_budget_split_for_3000_token_model() {
    let budget = ContextBudget::new(3000, DEFAULT_CHARS_PER_TOKEN).unwrap();
    assert_eq!(*budget.context_tokens(), 3000);
    assert_eq!(*budget.reserved_output_tokens(), 1000);
    assert_eq!(*budget.input_tokens(), 2000);
    assert_eq!(*budget.input_chars(), 6000);
    assert_eq!(budget.max_output_tokens(), 1000);
}

#[test]
fn test_reserved_output_floors() {
    let budget = ContextBudget::new(8192, 3).unwrap();
    assert_eq!(*budget.reserved_output_tokens(), 2730);
    assert_eq!(*budget.input_tokens(), 5462);
    assert_eq!(*budget.input_chars(), 16386);
}

#[test]
fn test_custom_chars_per_token() {
    let budget = ContextBudget::new(3000, 4).unwrap();
    assert_eq!(*budget.input_chars(), 8000);
}

#[test]
fn test_degenerate_budgets_are_rejected() {
    let err = ContextBudget::new(2, 3).unwrap_err();
    assert!(matches!(err.kind(), PersonasErrorKind::Config(_)));

    let err = ContextBudget::new(3000, 0).unwrap_err();
    assert!(matches!(err.kind(), PersonasErrorKind::Config(_)));

    assert!(ContextBudget::new(usize::MAX, usize::MAX).is_err());
}

#[test]
fn test_resolve_through_registry() {
    let registry = InMemoryModelRegistry::new()
        .with_model(ModelInfo::new("small", 3000))
        .with_model(ModelInfo::new("large", 128_000));

    let budget = ContextBudget::resolve(&registry, "large", 3).unwrap();
    assert_eq!(*budget.reserved_output_tokens(), 42_666);

    let err = ContextBudget::resolve(&registry, "missing", 3).unwrap_err();
    match err.kind() {
        PersonasErrorKind::Chain(e) => {
            assert_eq!(e.kind, ChainErrorKind::ModelNotFound("missing".to_string()))
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.user_message(), "model 'missing' not found");
}
