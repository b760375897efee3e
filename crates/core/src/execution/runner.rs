//! High-level task runner
//!
//! This module resolves a target against a [`TaskRegistry`] and executes the
//! resulting plan one task at a time, in order, on the calling thread. The
//! first failing action stops the run.

use std::time::{Duration, Instant};

use crate::execution::reporter::{Progress, RunReporter, TracingReporter};
use crate::plan::ExecutionPlan;
use crate::registry::TaskRegistry;
use crate::types::{RunbookError, RunbookResult};

static DEFAULT_REPORTER: TracingReporter = TracingReporter;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub target: String,
    /// Tasks whose action ran, in order
    pub executed: Vec<String>,
    /// Grouping tasks that had no action
    pub skipped: Vec<String>,
    pub elapsed: Duration,
}

/// Executes tasks from a registry. The registry is borrowed for the runner's
/// lifetime, so it cannot be modified while a run is in progress.
pub struct TaskRunner<'a> {
    registry: &'a TaskRegistry,
    reporter: &'a dyn RunReporter,
}

impl<'a> TaskRunner<'a> {
    pub fn new(registry: &'a TaskRegistry) -> Self {
        Self {
            registry,
            reporter: &DEFAULT_REPORTER,
        }
    }

    pub fn with_reporter(mut self, reporter: &'a dyn RunReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Resolve `target` and execute its plan
    pub fn run(&self, target: &str) -> RunbookResult<RunSummary> {
        let plan = self.registry.resolve(target)?;
        self.execute_plan(&plan)
    }

    /// Execute an already resolved plan
    pub fn execute_plan(&self, plan: &ExecutionPlan) -> RunbookResult<RunSummary> {
        let started = Instant::now();
        let total = plan.len();
        let mut executed = Vec::new();
        let mut skipped = Vec::new();

        for (i, &step) in plan.steps().iter().enumerate() {
            let task = self.registry.task_at(step);
            let progress = Progress {
                position: i + 1,
                total,
            };

            let Some(action) = &task.action else {
                self.reporter.task_skipped(&task.name, progress);
                skipped.push(task.name.clone());
                continue;
            };

            self.reporter.task_started(&task.name, progress);
            let task_started = Instant::now();

            if let Err(cause) = action.execute() {
                self.reporter.task_failed(&task.name, progress, &cause);
                return Err(RunbookError::TaskFailure {
                    task: task.name.clone(),
                    cause,
                });
            }

            self.reporter
                .task_finished(&task.name, progress, task_started.elapsed());
            executed.push(task.name.clone());
        }

        Ok(RunSummary {
            target: plan.target.clone(),
            executed,
            skipped,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn none() -> Vec<String> {
        Vec::new()
    }

    fn recording(log: &Log, name: &'static str) -> impl Fn() -> anyhow::Result<()> {
        let log = Rc::clone(log);
        move || -> anyhow::Result<()> {
            log.borrow_mut().push(name.to_string());
            Ok(())
        }
    }

    fn failing(log: &Log, name: &'static str) -> impl Fn() -> anyhow::Result<()> {
        let log = Rc::clone(log);
        move || -> anyhow::Result<()> {
            log.borrow_mut().push(name.to_string());
            anyhow::bail!("{} exited with status 1", name)
        }
    }

    #[derive(Default)]
    struct EventLog {
        events: RefCell<Vec<String>>,
    }

    impl RunReporter for EventLog {
        fn task_started(&self, task: &str, progress: Progress) {
            self.events
                .borrow_mut()
                .push(format!("start {} {}/{}", task, progress.position, progress.total));
        }

        fn task_finished(&self, task: &str, _progress: Progress, _elapsed: Duration) {
            self.events.borrow_mut().push(format!("finish {}", task));
        }

        fn task_failed(&self, task: &str, _progress: Progress, cause: &anyhow::Error) {
            self.events
                .borrow_mut()
                .push(format!("fail {}: {}", task, cause));
        }

        fn task_skipped(&self, task: &str, _progress: Progress) {
            self.events.borrow_mut().push(format!("skip {}", task));
        }
    }

    #[test]
    fn test_run_executes_in_plan_order() {
        let log: Log = Rc::default();
        let mut registry = TaskRegistry::new();
        registry.register_fn("clean", none(), recording(&log, "clean")).unwrap();
        registry.register_fn("build", none(), recording(&log, "build")).unwrap();
        registry
            .register_fn("update-version", none(), recording(&log, "update-version"))
            .unwrap();
        registry
            .register_fn("deploy", ["build", "update-version"], recording(&log, "deploy"))
            .unwrap();
        registry
            .register_fn("docker-build", ["deploy"], recording(&log, "docker-build"))
            .unwrap();
        registry
            .register_group("ci", ["clean", "update-version", "deploy", "docker-build"])
            .unwrap();

        let plan = registry.resolve("ci").unwrap();
        let summary = TaskRunner::new(&registry).run("ci").unwrap();

        assert_eq!(
            *log.borrow(),
            ["clean", "update-version", "build", "deploy", "docker-build"]
        );
        assert_eq!(summary.executed, *log.borrow());
        assert_eq!(summary.skipped, ["ci"]);
        assert_eq!(summary.target, "ci");

        let planned_actions: Vec<_> = plan
            .task_names()
            .iter()
            .filter(|name| !registry.get(name).unwrap().is_group())
            .cloned()
            .collect();
        assert_eq!(planned_actions, *log.borrow());
    }

    #[test]
    fn test_shared_dependency_runs_once() {
        let log: Log = Rc::default();
        let mut registry = TaskRegistry::new();
        registry.register_fn("d", none(), recording(&log, "d")).unwrap();
        registry.register_fn("b", ["d"], recording(&log, "b")).unwrap();
        registry.register_fn("c", ["d"], recording(&log, "c")).unwrap();
        registry.register_fn("a", ["b", "c"], recording(&log, "a")).unwrap();

        TaskRunner::new(&registry).run("a").unwrap();
        assert_eq!(*log.borrow(), ["d", "b", "c", "a"]);
    }

    #[test]
    fn test_run_stops_at_first_failure() {
        let log: Log = Rc::default();
        let mut registry = TaskRegistry::new();
        registry.register_fn("a", none(), recording(&log, "a")).unwrap();
        registry.register_fn("b", ["a"], failing(&log, "b")).unwrap();
        registry.register_fn("c", ["b"], recording(&log, "c")).unwrap();

        let err = TaskRunner::new(&registry).run("c").unwrap_err();

        assert_eq!(*log.borrow(), ["a", "b"]);
        assert_eq!(err.failed_task(), Some("b"));
        match err {
            RunbookError::TaskFailure { task, cause } => {
                assert_eq!(task, "b");
                assert_eq!(cause.to_string(), "b exited with status 1");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_resolution_errors_run_nothing() {
        let log: Log = Rc::default();
        let mut registry = TaskRegistry::new();
        registry.register_fn("a", none(), recording(&log, "a")).unwrap();
        registry.register_fn("b", ["a", "missing"], recording(&log, "b")).unwrap();
        registry.register_fn("x", ["y"], recording(&log, "x")).unwrap();
        registry.register_fn("y", ["x"], recording(&log, "y")).unwrap();

        let runner = TaskRunner::new(&registry);
        assert!(matches!(
            runner.run("b"),
            Err(RunbookError::UnknownTarget { .. })
        ));
        assert!(matches!(
            runner.run("x"),
            Err(RunbookError::CyclicDependency { .. })
        ));
        assert!(matches!(
            runner.run("nope"),
            Err(RunbookError::UnknownTarget { .. })
        ));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_each_run_executes_actions_again() {
        let log: Log = Rc::default();
        let mut registry = TaskRegistry::new();
        registry.register_fn("build", none(), recording(&log, "build")).unwrap();

        let runner = TaskRunner::new(&registry);
        runner.run("build").unwrap();
        runner.run("build").unwrap();
        assert_eq!(*log.borrow(), ["build", "build"]);
    }

    #[test]
    fn test_reporter_receives_lifecycle_events() {
        let log: Log = Rc::default();
        let mut registry = TaskRegistry::new();
        registry.register_fn("build", none(), recording(&log, "build")).unwrap();
        registry.register_fn("test", ["build"], failing(&log, "test")).unwrap();
        registry.register_group("ci", ["test"]).unwrap();
        registry.register_group("prepare", none()).unwrap();
        registry.register_group("all", ["prepare", "build"]).unwrap();

        let reporter = EventLog::default();
        let runner = TaskRunner::new(&registry).with_reporter(&reporter);

        runner.run("all").unwrap();
        runner.run("ci").unwrap_err();

        assert_eq!(
            *reporter.events.borrow(),
            [
                "skip prepare",
                "start build 2/3",
                "finish build",
                "skip all",
                "start build 1/3",
                "finish build",
                "start test 2/3",
                "fail test: test exited with status 1",
            ]
        );
    }
}
