use seqpipe::pipeline::Pipeline;
use seqpipe::PipelineError;

#[test]
fn test_count() {
    assert_eq!(Pipeline::from_iter(["abc", "def"]).count().unwrap(), 2);
    assert_eq!(Pipeline::<i32>::empty().count().unwrap(), 0);
}

#[test]
fn test_any_match() {
    assert!(Pipeline::from_iter(["abc", "def"]).any_match(|s| s.starts_with('a')).unwrap());
    assert!(!Pipeline::from_iter(["abc", "def"]).any_match(|s| s.starts_with('z')).unwrap());
}

#[test]
fn test_all_match() {
    assert!(Pipeline::from_iter([2, 4, 6]).all_match(|n| n % 2 == 0).unwrap());
    assert!(!Pipeline::from_iter([2, 3, 6]).all_match(|n| n % 2 == 0).unwrap());
}

#[test]
fn test_none_match() {
    assert!(Pipeline::from_iter([1, 3, 5]).none_match(|n| n % 2 == 0).unwrap());
    assert!(!Pipeline::from_iter([1, 4, 5]).none_match(|n| n % 2 == 0).unwrap());
}

#[test]
fn test_match_predicates_on_empty() {
    assert!(!Pipeline::<i32>::empty().any_match(|_| true).unwrap());
    assert!(Pipeline::<i32>::empty().all_match(|_| false).unwrap());
    assert!(Pipeline::<i32>::empty().none_match(|_| true).unwrap());
}

#[test]
fn test_find_first() {
    assert_eq!(Pipeline::from_iter([10, 20]).find_first().unwrap(), Some(10));
    assert_eq!(Pipeline::<i32>::empty().find_first().unwrap(), None);
}

#[test]
fn test_reduce_folds_left_to_right() {
    let concatenated = Pipeline::from_iter(["a", "b", "c"])
        .map(str::to_string)
        .reduce(|acc, item| acc + &item)
        .unwrap();
    assert_eq!(concatenated, Some("abc".to_string()));
}

#[test]
fn test_reduce_on_empty_is_absent() {
    assert_eq!(Pipeline::<i32>::empty().reduce(|a, b| a + b).unwrap(), None);
}

#[test]
fn test_fold_with_identity() {
    assert_eq!(Pipeline::from_iter([1, 2, 3, 4]).fold(0, |acc, n| acc + n).unwrap(), 10);
    assert_eq!(Pipeline::<i32>::empty().fold(99, |acc, n| acc + n).unwrap(), 99);
}

#[test]
fn test_min_max_natural_order() {
    assert_eq!(Pipeline::from_iter([3, 1, 2]).min().unwrap(), Some(1));
    assert_eq!(Pipeline::from_iter([3, 1, 2]).max().unwrap(), Some(3));
    assert_eq!(Pipeline::<i32>::empty().min().unwrap(), None);
    assert_eq!(Pipeline::<i32>::empty().max().unwrap(), None);
}

#[test]
fn test_min_by_ties_keep_first_seen() {
    let result = Pipeline::from_iter([("first", 1), ("second", 1), ("third", 2)])
        .min_by(|a, b| a.1.cmp(&b.1))
        .unwrap();
    assert_eq!(result, Some(("first", 1)));
}

#[test]
fn test_max_by_ties_keep_first_seen() {
    let result = Pipeline::from_iter([("first", 2), ("second", 2), ("third", 1)])
        .max_by(|a, b| a.1.cmp(&b.1))
        .unwrap();
    assert_eq!(result, Some(("first", 2)));
}

#[test]
fn test_for_each_runs_in_encounter_order() {
    let mut seen = Vec::new();
    Pipeline::from_iter([1, 2, 3]).for_each(|n| seen.push(n)).unwrap();
    assert_eq!(seen, vec![1, 2, 3]);
}

#[test]
fn test_second_terminal_call_is_reuse_error() {
    let mut pipeline = Pipeline::from_iter([1, 2, 3]);
    assert_eq!(pipeline.count().unwrap(), 3);
    assert_eq!(pipeline.count().unwrap_err(), PipelineError::Reused);
}

#[test]
fn test_mixed_terminals_also_reuse_error() {
    let mut pipeline = Pipeline::from_iter([1, 2, 3]);
    assert_eq!(pipeline.find_first().unwrap(), Some(1));
    assert_eq!(pipeline.max().unwrap_err(), PipelineError::Reused);
}

#[test]
fn test_poisoned_pipeline_reports_poison_then_reuse() {
    let mut pipeline = Pipeline::generate(|| 3).sorted();
    assert_eq!(pipeline.count().unwrap_err(), PipelineError::UnboundedSort);
    assert_eq!(pipeline.count().unwrap_err(), PipelineError::Reused);
}

#[test]
fn test_chaining_on_consumed_pipeline_poisons_with_reuse() {
    let mut pipeline = Pipeline::from_iter([1, 2, 3]);
    pipeline.count().unwrap();
    let err = pipeline.map(|n| n + 1).count().unwrap_err();
    assert_eq!(err, PipelineError::Reused);
}
