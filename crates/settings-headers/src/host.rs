//! Event delivery for a single build.

use std::error::Error;

use settings_headers_rewriter::{BuildEvent, EventSpy, ExecutionRequest};

/// Deliver the events of one build to `spy`, in order.
///
/// Stops at the first event the spy rejects.
pub fn run_build<S: EventSpy>(spy: &S, request: &mut ExecutionRequest) -> Result<(), S::Error> {
    spy.on_event(BuildEvent::SessionStarted)?;
    spy.on_event(BuildEvent::ExecutionRequest(request))?;
    spy.on_event(BuildEvent::SessionEnded)
}

/// Render an error followed by its chain of causes.
pub fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Journal {
        seen: RefCell<Vec<&'static str>>,
        reject_request: bool,
    }

    impl EventSpy for Journal {
        type Error = std::io::Error;

        fn on_event(&self, event: BuildEvent<'_>) -> Result<(), Self::Error> {
            let kind = match event {
                BuildEvent::SessionStarted => "session-started",
                BuildEvent::ExecutionRequest(_) => "execution-request",
                BuildEvent::SessionEnded => "session-ended",
                BuildEvent::Other(_) => "other",
            };
            self.seen.borrow_mut().push(kind);
            if self.reject_request && kind == "execution-request" {
                return Err(std::io::Error::other("rejected"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_events_delivered_in_order() {
        let spy = Journal::default();
        run_build(&spy, &mut ExecutionRequest::default()).unwrap();
        assert_eq!(
            *spy.seen.borrow(),
            vec!["session-started", "execution-request", "session-ended"]
        );
    }

    #[test]
    fn test_rejection_stops_delivery() {
        let spy = Journal {
            reject_request: true,
            ..Journal::default()
        };
        assert!(run_build(&spy, &mut ExecutionRequest::default()).is_err());
        assert_eq!(
            *spy.seen.borrow(),
            vec!["session-started", "execution-request"]
        );
    }

    #[test]
    fn test_error_chain() {
        #[derive(Debug)]
        struct Outer(std::io::Error);

        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("outer")
            }
        }

        impl Error for Outer {
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                Some(&self.0)
            }
        }

        let err = Outer(std::io::Error::other("inner"));
        assert_eq!(error_chain(&err), "outer: inner");
    }
}
