//! Test doubles for the process and filesystem seams.

use crate::core::{
    error::{GitFlowError, Result},
    process::{CommandOutput, CommandRequest, LaunchPlan, ProcessHandle, ProcessRunner},
    resolver::ExecutableProbe,
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum Scripted {
    Stdout(String),
    Stderr(String),
}

/// Answers git invocations from a script keyed by the joined argument list.
///
/// Unscripted commands fail with `CommandFailed`.
#[derive(Default)]
pub struct FakeRunner {
    script: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<CommandRequest>>,
    spawned: Mutex<Vec<LaunchPlan>>,
    processes: Mutex<Vec<Arc<FakeProcess>>>,
    fail_spawn: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

#[derive(Default)]
pub struct FakeProcess {
    pub terminated: AtomicBool,
    pub exited: AtomicBool,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, args: &[&str], stdout: &str) {
        self.script
            .lock()
            .unwrap()
            .insert(args.join(" "), Scripted::Stdout(stdout.to_string()));
    }

    pub fn fail(&self, args: &[&str], stderr: &str) {
        self.script
            .lock()
            .unwrap()
            .insert(args.join(" "), Scripted::Stderr(stderr.to_string()));
    }

    pub fn fail_spawns(&self) {
        self.fail_spawn.store(true, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<CommandRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, args: &[&str]) -> usize {
        let key = args.join(" ");
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.args.join(" ") == key)
            .count()
    }

    pub fn spawned(&self) -> Vec<LaunchPlan> {
        self.spawned.lock().unwrap().clone()
    }

    pub fn processes(&self) -> Vec<Arc<FakeProcess>> {
        self.processes.lock().unwrap().clone()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(request.clone());
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        let key = request.args.join(" ");
        match self.script.lock().unwrap().get(&key) {
            Some(Scripted::Stdout(stdout)) => Ok(CommandOutput {
                stdout: stdout.clone(),
                stderr: String::new(),
                exit_code: Some(0),
            }),
            Some(Scripted::Stderr(stderr)) => {
                Err(GitFlowError::command_failed(request.display(), stderr.clone()))
            }
            None => Err(GitFlowError::command_failed(
                request.display(),
                format!("unscripted command: {key}"),
            )),
        }
    }

    fn spawn(&self, plan: &LaunchPlan) -> Result<Box<dyn ProcessHandle>> {
        if self.fail_spawn.load(Ordering::SeqCst) {
            return Err(GitFlowError::launch_failed(&plan.program, "No such file or directory"));
        }
        self.spawned.lock().unwrap().push(plan.clone());
        let process = Arc::new(FakeProcess::default());
        let mut processes = self.processes.lock().unwrap();
        processes.push(process.clone());
        Ok(Box::new(FakeHandle {
            id: processes.len() as u32,
            process,
        }))
    }
}

struct FakeHandle {
    id: u32,
    process: Arc<FakeProcess>,
}

impl ProcessHandle for FakeHandle {
    fn id(&self) -> u32 {
        self.id
    }

    fn has_exited(&mut self) -> bool {
        self.process.exited.load(Ordering::SeqCst) || self.process.terminated.load(Ordering::SeqCst)
    }

    fn wait(&mut self) -> Result<Option<i32>> {
        self.process.exited.store(true, Ordering::SeqCst);
        Ok(Some(0))
    }

    fn terminate(&mut self) -> Result<()> {
        self.process.terminated.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Filesystem and PATH lookups answered from fixed tables
#[derive(Default, Clone)]
pub struct FakeProbe {
    existing: HashSet<PathBuf>,
    on_path: HashMap<String, PathBuf>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing.insert(path.into());
        self
    }

    /// `name` resolves to `path` through the search path; `path` is also made to exist
    pub fn with_program(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.existing.insert(path.clone());
        self.on_path.insert(name.to_string(), path);
        self
    }

    /// `name` resolves through the search path to a file that does not exist
    pub fn with_stale_program(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.on_path.insert(name.to_string(), path.into());
        self
    }
}

impl ExecutableProbe for FakeProbe {
    fn exists(&self, path: &Path) -> bool {
        self.existing.contains(path)
    }

    fn search(&self, name: &str) -> Option<PathBuf> {
        self.on_path.get(name).cloned()
    }
}
