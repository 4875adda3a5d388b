use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use unitmatch_matcher::{
    Hint, HookOutput, JsObject, MatchError, ObjectKind, Operation, Primitive, Result,
    StringMatcher, Thrown, Value, WrapperObject,
};

type Log = Rc<RefCell<String>>;

/// Receiver, offset and search wrappers that append to a shared log
struct Scenario {
    log: Log,
    receiver: Rc<WrapperObject>,
    offset: Rc<WrapperObject>,
    search: Rc<WrapperObject>,
}

fn recording(
    log: &Log,
    mark: &'static str,
) -> impl Fn() -> std::result::Result<HookOutput, Thrown> {
    let log = Rc::clone(log);
    move || {
        log.borrow_mut().push_str(mark);
        Ok(HookOutput::This)
    }
}

fn raising() -> std::result::Result<HookOutput, Thrown> {
    Err(Thrown::new("error"))
}

impl Scenario {
    fn new(text: &str, offset: f64, search: &str) -> Self {
        let log: Log = Rc::default();
        let receiver = Rc::new(WrapperObject::string(text));
        let offset = Rc::new(WrapperObject::number(offset));
        let search = Rc::new(WrapperObject::string(search));
        receiver.set_to_string(recording(&log, "A"));
        offset.set_value_of(recording(&log, "B"));
        search.set_to_string(recording(&log, "C"));
        Self {
            log,
            receiver,
            offset,
            search,
        }
    }

    fn run(&self, operation: Operation) -> Result<bool> {
        self.log.borrow_mut().clear();
        let receiver = Value::from(Rc::clone(&self.receiver));
        let search = Value::from(Rc::clone(&self.search));
        let offset = Value::from(Rc::clone(&self.offset));
        let matcher = StringMatcher::new();
        match operation {
            Operation::StartsWith => matcher.starts_with(&receiver, Some(&search), Some(&offset)),
            Operation::EndsWith => matcher.ends_with(&receiver, Some(&search), Some(&offset)),
            Operation::Includes => matcher.includes(&receiver, Some(&search), Some(&offset)),
        }
    }

    fn log(&self) -> String {
        self.log.borrow().clone()
    }
}

fn scenarios() -> [(Operation, Scenario); 3] {
    [
        (Operation::StartsWith, Scenario::new("foo bar", 0.0, "foo")),
        (Operation::EndsWith, Scenario::new("foo bar", 7.0, "bar")),
        (Operation::Includes, Scenario::new("foo bar", 0.0, "foo")),
    ]
}

#[test]
fn conversions_run_receiver_then_position_then_search() {
    for (operation, scenario) in scenarios() {
        assert_eq!(scenario.run(operation), Ok(true), "{operation:?}");
        assert_eq!(scenario.log(), "ABC", "{operation:?}");
    }
}

#[test]
fn receiver_failure_stops_everything() {
    for (operation, scenario) in scenarios() {
        scenario.receiver.set_to_string(raising);
        assert_eq!(
            scenario.run(operation),
            Err(MatchError::thrown("error")),
            "{operation:?}"
        );
        assert_eq!(scenario.log(), "", "{operation:?}");
    }
}

#[test]
fn position_failure_skips_search_conversion() {
    for (operation, scenario) in scenarios() {
        scenario.offset.set_value_of(raising);
        assert_eq!(
            scenario.run(operation),
            Err(MatchError::thrown("error")),
            "{operation:?}"
        );
        assert_eq!(scenario.log(), "A", "{operation:?}");
    }
}

#[test]
fn search_failure_happens_last() {
    for (operation, scenario) in scenarios() {
        scenario.search.set_to_string(raising);
        assert_eq!(
            scenario.run(operation),
            Err(MatchError::thrown("error")),
            "{operation:?}"
        );
        assert_eq!(scenario.log(), "AB", "{operation:?}");
    }
}

#[test]
fn each_hook_runs_once_per_call() {
    let (operation, scenario) = scenarios().into_iter().next().unwrap();
    assert_eq!(scenario.run(operation), Ok(true));
    assert_eq!(scenario.run(operation), Ok(true));
    assert_eq!(scenario.log(), "ABC");
}

#[test]
fn raised_object_comes_back_by_identity() {
    let payload = Value::object(WrapperObject::plain());
    let raised = payload.clone();
    let receiver = Value::object(
        WrapperObject::string("foo").with_to_string(move || Err(Thrown::new(raised.clone()))),
    );

    let err = StringMatcher::new()
        .includes(&receiver, Some(&Value::from("f")), None)
        .unwrap_err();
    assert_eq!(err.thrown_value(), Some(&payload));
}

/// A pattern-flagged object that records any attempt to convert it
#[derive(Debug)]
struct SpyPattern(Log);

impl JsObject for SpyPattern {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Pattern
    }

    fn to_primitive(&self, _hint: Hint) -> Result<Primitive> {
        self.0.borrow_mut().push('P');
        Ok(Primitive::String("/x/".into()))
    }
}

#[test]
fn pattern_argument_is_rejected_before_position_and_search_conversion() {
    for (operation, scenario) in scenarios() {
        let receiver = Value::from(Rc::clone(&scenario.receiver));
        let offset = Value::from(Rc::clone(&scenario.offset));
        let pattern = Value::object(SpyPattern(Rc::clone(&scenario.log)));

        let result = StringMatcher::new().evaluate(
            operation,
            unitmatch_matcher::MatchRequest::new(&receiver)
                .search(&pattern)
                .position(&offset),
        );

        assert_eq!(result, Err(MatchError::PatternArgument), "{operation:?}");
        assert_eq!(scenario.log(), "A", "{operation:?}");
    }
}

#[test]
fn pattern_argument_with_plain_receiver_runs_no_hooks() {
    let log: Log = Rc::default();
    let pattern = Value::object(SpyPattern(Rc::clone(&log)));
    let offset = Value::object(WrapperObject::number(0.0).with_value_of(recording(&log, "B")));

    for operation in Operation::ALL {
        let receiver = Value::from("foo bar");
        let result = StringMatcher::new().evaluate(
            operation,
            unitmatch_matcher::MatchRequest::new(&receiver)
                .search(&pattern)
                .position(&offset),
        );
        assert_eq!(result, Err(MatchError::PatternArgument));
    }
    assert_eq!(log.borrow().as_str(), "");
}
