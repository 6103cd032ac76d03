//! Boundary to the embedded interpreter.
//!
//! The interpreter itself is external; the console only needs to ask
//! whether buffered text is a complete statement and to run it, either
//! synchronously or through an asynchronous entry point.

use std::rc::Rc;

use futures::{future::LocalBoxFuture, FutureExt};

use crate::error::CommandError;

/// Status an asynchronous evaluation reports on success.
pub const ASYNC_SUCCESS: i32 = 1;

pub trait Evaluator {
    /// Whether `text` forms one complete statement. Must not have side
    /// effects.
    fn is_complete(&self, text: &str) -> bool;

    fn eval(&self, text: &str) -> Result<(), String>;

    /// Non-blocking evaluation resolving to a status code, or `None` when
    /// the interpreter has no asynchronous entry point.
    fn eval_async(&self, _text: &str) -> Option<LocalBoxFuture<'static, Result<i32, String>>> {
        None
    }
}

/// Folds the evaluator's calling conventions into one result type.
#[derive(Clone)]
pub struct EvalAdapter {
    evaluator: Rc<dyn Evaluator>,
}

impl EvalAdapter {
    pub fn new(evaluator: Rc<dyn Evaluator>) -> Self {
        Self { evaluator }
    }

    pub fn is_complete(&self, text: &str) -> bool {
        self.evaluator.is_complete(text)
    }

    pub fn run(&self, text: &str) -> Result<(), CommandError> {
        self.evaluator.eval(text).map_err(CommandError::Evaluation)
    }

    pub fn run_async(&self, text: &str) -> LocalBoxFuture<'static, Result<(), CommandError>> {
        let Some(pending) = self.evaluator.eval_async(text) else {
            return futures::future::ready(Err(CommandError::Evaluation(
                "asynchronous evaluation is not supported by this interpreter".to_string(),
            )))
            .boxed_local();
        };

        async move {
            match pending.await {
                Ok(ASYNC_SUCCESS) => Ok(()),
                Ok(status) => Err(CommandError::Evaluation(format!(
                    "asynchronous command finished with status {}",
                    status
                ))),
                Err(message) => Err(CommandError::Evaluation(message)),
            }
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    struct Fixed {
        status: i32,
    }

    impl Evaluator for Fixed {
        fn is_complete(&self, text: &str) -> bool {
            !text.ends_with('{')
        }

        fn eval(&self, text: &str) -> Result<(), String> {
            if text == "bad" {
                Err("invalid command name \"bad\"".to_string())
            } else {
                Ok(())
            }
        }

        fn eval_async(&self, _text: &str) -> Option<LocalBoxFuture<'static, Result<i32, String>>> {
            Some(futures::future::ready(Ok(self.status)).boxed_local())
        }
    }

    struct SyncOnly;

    impl Evaluator for SyncOnly {
        fn is_complete(&self, _text: &str) -> bool {
            true
        }

        fn eval(&self, _text: &str) -> Result<(), String> {
            Ok(())
        }
    }

    #[test]
    fn test_sync_errors_become_evaluation_errors() {
        let adapter = EvalAdapter::new(Rc::new(Fixed { status: 1 }));
        assert_eq!(adapter.run("good"), Ok(()));
        assert_eq!(
            adapter.run("bad"),
            Err(CommandError::Evaluation("invalid command name \"bad\"".to_string()))
        );
        assert!(!adapter.is_complete("proc {"));
    }

    #[test]
    fn test_async_status_codes() {
        let ok = EvalAdapter::new(Rc::new(Fixed { status: ASYNC_SUCCESS }));
        assert_eq!(block_on(ok.run_async("x")), Ok(()));

        let failed = EvalAdapter::new(Rc::new(Fixed { status: 0 }));
        assert!(matches!(
            block_on(failed.run_async("x")),
            Err(CommandError::Evaluation(_))
        ));
    }

    #[test]
    fn test_async_unsupported() {
        let adapter = EvalAdapter::new(Rc::new(SyncOnly));
        assert!(matches!(
            block_on(adapter.run_async("x")),
            Err(CommandError::Evaluation(_))
        ));
    }
}
