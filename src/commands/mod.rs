use clap::Args;
use serde::Serialize;

use ztasks::{Context, Target, TaskConfig};

pub type CmdResult<T> = ztasks::Result<(T, i32)>;

/// Flags shared by every task.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Run commands on this host over ssh: [user@]host[:port]
    #[arg(long, global = true, value_name = "HOST")]
    pub host: Option<String>,

    /// SSH identity file for --host
    #[arg(long, global = true, value_name = "PATH")]
    pub identity_file: Option<String>,

    /// Print commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Nesting level for log framing
    #[arg(long, global = true, default_value_t = 1)]
    pub level: u32,
}

/// Summary printed after a task finishes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReport {
    pub task: String,
    pub target: String,
    pub dry_run: bool,
    pub commands: Vec<String>,
}

/// Resolved config plus the runner for one invocation.
pub(crate) struct Session {
    pub config: TaskConfig,
    pub ctx: Context,
    pub level: u32,
}

impl Session {
    pub fn open(global: &GlobalArgs, config: TaskConfig) -> ztasks::Result<Self> {
        let target = Target::from_host(global.host.as_deref(), global.identity_file.as_deref())?;
        Ok(Self {
            config,
            ctx: Context::new(target).with_dry_run(global.dry_run),
            level: global.level,
        })
    }

    pub fn report(&self, task: &str) -> TaskReport {
        TaskReport {
            task: task.to_string(),
            target: self.ctx.target().describe(),
            dry_run: self.ctx.is_dry_run(),
            commands: self.ctx.issued(),
        }
    }
}

pub mod config;
pub mod docker;
pub mod file;
pub mod git;
pub mod npm;
pub mod php;
pub mod workflow;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $session:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $session))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
    task_config: TaskConfig,
) -> (ztasks::Result<serde_json::Value>, i32) {
    let mut session = match Session::open(global, task_config) {
        Ok(session) => session,
        Err(err) => return crate::output::map_cmd_result_to_json::<serde_json::Value>(Err(err)),
    };

    match command {
        crate::Commands::Docker(args) => dispatch!(args, &mut session, docker),
        crate::Commands::Git(args) => dispatch!(args, &mut session, git),
        crate::Commands::Npm(args) => dispatch!(args, &mut session, npm),
        crate::Commands::Php(args) => dispatch!(args, &mut session, php),
        crate::Commands::Workflow(args) => dispatch!(args, &mut session, workflow),
        crate::Commands::File(args) => dispatch!(args, &mut session, file),
        crate::Commands::Config(args) => dispatch!(args, &mut session, config),
    }
}
