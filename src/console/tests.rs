use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Duration};

use futures::{
    channel::oneshot,
    executor::LocalPool,
    future::LocalBoxFuture,
    task::LocalSpawnExt,
    FutureExt,
};

use super::*;
use crate::{
    commands::testing::{fixture, Fixture},
    input::Key,
    render::BufferRenderer,
};

type Log = Rc<RefCell<Vec<String>>>;

/// Interpreter double: braces decide completeness, `bad*` fails, async
/// commands wait for a gate opened by the test.
#[derive(Default)]
struct Scripted {
    log: Log,
    gates: RefCell<HashMap<String, oneshot::Receiver<i32>>>,
}

impl Scripted {
    fn gate(&self, text: &str) -> oneshot::Sender<i32> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(text.to_string(), rx);
        tx
    }
}

impl Evaluator for Scripted {
    fn is_complete(&self, text: &str) -> bool {
        text.matches('{').count() <= text.matches('}').count()
    }

    fn eval(&self, text: &str) -> Result<(), String> {
        self.log.borrow_mut().push(format!("eval {}", text));
        if text.starts_with("bad") {
            Err(format!("invalid command name \"{}\"", text))
        } else {
            Ok(())
        }
    }

    fn eval_async(&self, text: &str) -> Option<LocalBoxFuture<'static, Result<i32, String>>> {
        self.log.borrow_mut().push(format!("start {}", text));
        let gate = self.gates.borrow_mut().remove(text);
        let log = self.log.clone();
        let text = text.to_string();
        Some(
            async move {
                let status = match gate {
                    Some(rx) => rx.await.map_err(|_| "cancelled".to_string())?,
                    None => 1,
                };
                log.borrow_mut().push(format!("end {}", text));
                Ok::<i32, String>(status)
            }
            .boxed_local(),
        )
    }
}

struct Harness {
    console: Console,
    output: BufferRenderer,
    evaluator: Rc<Scripted>,
    log: Log,
    fx: Fixture,
}

fn harness() -> Harness {
    let output = BufferRenderer::new();
    let console = Console::with_styler(
        Box::new(output.clone()),
        ConsoleConfig::default(),
        MessageStyler::plain(),
    );
    let evaluator = Rc::new(Scripted::default());
    let log = evaluator.log.clone();
    console.attach_evaluator(evaluator.clone());
    Harness {
        console,
        output,
        evaluator,
        log,
        fx: fixture(),
    }
}

impl Harness {
    fn dispatcher(&self) -> Dispatcher {
        match Dispatcher::new(&self.console, self.fx.host(), Rc::new(NoDelay)) {
            Ok(dispatcher) => dispatcher,
            Err(e) => panic!("dispatcher: {}", e),
        }
    }

    fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

#[test]
fn test_input_ignored_until_evaluator_attached() {
    let output = BufferRenderer::new();
    let console = Console::with_styler(
        Box::new(output.clone()),
        ConsoleConfig::default(),
        MessageStyler::plain(),
    );
    assert_eq!(console.state(), ConsoleState::Loading);
    assert!(console.load_progress());

    console.on_data("help\r");
    assert_eq!(console.pending(), 0);
    assert_eq!(console.input(), "");
    assert_eq!(output.contents(), ".");

    console.attach_evaluator(Rc::new(Scripted::default()));
    assert_eq!(console.state(), ConsoleState::Ready);
    assert!(!console.load_progress());
    assert_eq!(output.contents(), ".\n\rrepl[1]> ");
}

#[test]
fn test_submission_records_history_and_queues() {
    let h = harness();
    h.console.on_data("help\r");

    assert_eq!(h.console.history(), vec!["help".to_string()]);
    assert_eq!(h.console.pending(), 1);
    assert_eq!(h.console.input(), "");

    assert!(!h.console.on_key(KeyEvent::down(Key::Up)));
    assert_eq!(h.console.input(), "help");
}

#[test]
fn test_empty_submission_only_reprompts() {
    let h = harness();
    h.console.on_data("\r");

    assert!(h.console.history().is_empty());
    assert_eq!(h.console.pending(), 0);
    assert_eq!(h.console.terminal().prompt_count(), 2);
}

#[test]
fn test_comment_and_multiline_commands_skip_history() {
    let h = harness();
    h.console.on_data("# setup\r");
    h.console.on_data("proc f {} {\r");
    h.console.on_data("}\r");

    assert!(h.console.history().is_empty());
    assert_eq!(h.console.pending(), 2);
}

#[test]
fn test_commands_run_in_order_without_overlap() {
    let h = harness();
    let release = h.evaluator.gate("slow");
    let mut pool = LocalPool::new();
    pool.spawner()
        .spawn_local(h.dispatcher().run())
        .unwrap_or_else(|e| panic!("spawn: {:?}", e));

    h.console.on_data("jsasync slow\r");
    pool.run_until_stalled();
    assert_eq!(h.log(), vec!["start slow"]);

    h.console.on_data("a\r");
    h.console.on_data("b\r");
    h.console.on_data("c\r");
    pool.run_until_stalled();
    assert_eq!(h.log(), vec!["start slow"]);
    assert_eq!(h.console.pending(), 3);
    assert!(h.console.is_busy());

    release.send(1).unwrap_or_else(|_| panic!("gate closed"));
    pool.run_until_stalled();
    assert_eq!(
        h.log(),
        vec!["start slow", "end slow", "eval a", "eval b", "eval c"]
    );
    assert!(!h.console.is_busy());
    // initial prompt plus one per command
    assert_eq!(h.console.terminal().prompt_count(), 5);
}

#[test]
fn test_typing_continues_while_command_pending() {
    let h = harness();
    let release = h.evaluator.gate("slow");
    let mut pool = LocalPool::new();
    pool.spawner()
        .spawn_local(h.dispatcher().run())
        .unwrap_or_else(|e| panic!("spawn: {:?}", e));

    h.console.on_data("jsasync slow\r");
    pool.run_until_stalled();

    h.console.on_data("puts");
    assert_eq!(h.console.input(), "puts");
    h.console.on_data(" 1\r");
    assert_eq!(h.console.pending(), 1);

    release.send(1).unwrap_or_else(|_| panic!("gate closed"));
    pool.run_until_stalled();
    assert_eq!(h.log(), vec!["start slow", "end slow", "eval puts 1"]);
}

#[test]
fn test_failure_does_not_drop_following_commands() {
    let h = harness();
    let mut dispatcher = h.dispatcher();
    h.console.on_data("bad\rgood\r");
    h.output.take();

    let ran = futures::executor::block_on(dispatcher.drain());

    assert_eq!(ran, 2);
    assert_eq!(h.log(), vec!["eval bad", "eval good"]);
    let out = h.output.contents();
    assert_eq!(
        out,
        "\n\rinvalid command name \"bad\"\n\rrepl[2]> good\n\rrepl[3]> "
    );
}

#[test]
fn test_async_failure_status_is_reported() {
    let h = harness();
    let release = h.evaluator.gate("vinit");
    let mut pool = LocalPool::new();
    pool.spawner()
        .spawn_local(h.dispatcher().run())
        .unwrap_or_else(|e| panic!("spawn: {:?}", e));

    h.console.on_data("jsasync vinit\r");
    pool.run_until_stalled();
    release.send(0).unwrap_or_else(|_| panic!("gate closed"));
    pool.run_until_stalled();

    assert!(h
        .output
        .contents()
        .contains("asynchronous command finished with status 0"));
    assert!(!h.console.is_busy());
}

#[test]
fn test_reserved_commands_go_through_queue() {
    let h = harness();
    h.fx.fs.insert("shape.png", b"png");
    let mut dispatcher = h.dispatcher();

    h.console.on_data("download shape.png out.png\r");
    h.console.on_data("download\r");
    futures::executor::block_on(dispatcher.drain());

    assert_eq!(h.fx.transfer.saved().len(), 1);
    assert_eq!(h.fx.transfer.saved()[0].0, "out.png");
    // `download` without arguments is not reserved and reaches the interpreter
    assert_eq!(h.log(), vec!["eval download"]);
}

#[test]
fn test_reserved_syntax_error_is_rendered() {
    let h = harness();
    let mut dispatcher = h.dispatcher();
    h.console.on_data("download a b c\r");
    futures::executor::block_on(dispatcher.drain());

    assert!(h
        .output
        .contents()
        .contains("Syntax error: wrong number of arguments"));
    assert!(h.log().is_empty());
}

#[test]
fn test_paste_script_echoes_all_but_first() {
    let h = harness();
    let mut dispatcher = h.dispatcher();
    h.output.take();

    h.console.paste_script("a\nb");
    futures::executor::block_on(dispatcher.drain());

    assert_eq!(h.log(), vec!["eval a", "eval b"]);
    assert_eq!(h.output.contents(), "a\n\rrepl[2]> b\n\rrepl[3]> ");
}

#[test]
fn test_burst_leftover_shows_after_last_prompt() {
    let h = harness();
    let mut dispatcher = h.dispatcher();
    h.output.take();

    h.console.on_data("a\rb\rpartial");
    futures::executor::block_on(dispatcher.drain());

    assert_eq!(h.log(), vec!["eval a", "eval b"]);
    assert_eq!(h.console.input(), "partial");
    assert_eq!(h.output.contents(), "a\n\rrepl[2]> b\n\rrepl[3]> partial");
}

#[test]
fn test_help_registered_before_first_prompt() {
    let output = BufferRenderer::new();
    let console = Console::with_styler(
        Box::new(output.clone()),
        ConsoleConfig::default(),
        MessageStyler::plain(),
    );
    let evaluator = Rc::new(Scripted::default());
    console.attach_evaluator_with_help(evaluator.clone(), &CommandTable::standard());

    let log = evaluator.log.borrow().clone();
    let names: Vec<&str> = log
        .iter()
        .filter_map(|entry| entry.strip_prefix("eval help "))
        .filter_map(|rest| rest.split(' ').next())
        .collect();
    assert_eq!(names, vec!["jsdownload", "jsupload", "jsasync"]);
    assert_eq!(log.len(), 3);
    assert!(log.iter().all(|entry| entry.ends_with("{JavaScript commands}")));
    assert_eq!(console.state(), ConsoleState::Ready);
    assert_eq!(output.contents(), "\n\rrepl[1]> ");
}

#[test]
fn test_help_registration_failure_is_ignored() {
    struct Rejecting;

    impl Evaluator for Rejecting {
        fn is_complete(&self, _: &str) -> bool {
            true
        }

        fn eval(&self, text: &str) -> Result<(), String> {
            Err(format!("invalid command name \"{}\"", text))
        }
    }

    let output = BufferRenderer::new();
    let console = Console::with_styler(
        Box::new(output.clone()),
        ConsoleConfig::default(),
        MessageStyler::plain(),
    );
    console.attach_evaluator_with_help(Rc::new(Rejecting), &CommandTable::standard());
    assert_eq!(console.state(), ConsoleState::Ready);
    assert_eq!(output.contents(), "\n\rrepl[1]> ");
}

#[test]
fn test_dispatch_waits_configured_delay() {
    #[derive(Default)]
    struct Recording(RefCell<Vec<Duration>>);

    impl Sleeper for Recording {
        fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
            self.0.borrow_mut().push(duration);
            futures::future::ready(()).boxed_local()
        }
    }

    let h = harness();
    let sleeper = Rc::new(Recording::default());
    let mut dispatcher = match Dispatcher::new(&h.console, h.fx.host(), sleeper.clone()) {
        Ok(d) => d,
        Err(e) => panic!("dispatcher: {}", e),
    };
    h.console.on_data("a\rb\r");
    futures::executor::block_on(dispatcher.drain());

    assert_eq!(
        *sleeper.0.borrow(),
        vec![Duration::from_millis(10), Duration::from_millis(10)]
    );
}

#[test]
fn test_only_one_dispatcher() {
    let h = harness();
    let _first = h.dispatcher();
    assert!(matches!(
        Dispatcher::new(&h.console, h.fx.host(), Rc::new(NoDelay)),
        Err(crate::error::ConsoleError::DispatcherTaken)
    ));
}

#[test]
fn test_fatal_load_stops_everything() {
    let output = BufferRenderer::new();
    let console = Console::with_styler(
        Box::new(output.clone()),
        ConsoleConfig::default(),
        MessageStyler::plain(),
    );
    let fx = fixture();
    let dispatcher = match Dispatcher::new(&console, fx.host(), Rc::new(NoDelay)) {
        Ok(d) => d,
        Err(e) => panic!("dispatcher: {}", e),
    };

    console.fail_load("WebAssembly initialization has failed");
    console.fail_load("second report");
    console.attach_evaluator(Rc::new(Scripted::default()));

    assert_eq!(console.state(), ConsoleState::Failed);
    assert_eq!(output.contents(), "\n\rWebAssembly initialization has failed");

    console.on_data("help\r");
    assert_eq!(console.pending(), 0);

    let mut pool = LocalPool::new();
    // returns because the console failed
    pool.run_until(dispatcher.run());
}
