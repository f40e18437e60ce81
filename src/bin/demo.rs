use std::str::FromStr;
use std::thread;
use std::time::Duration;

use failure::Fail;
use log::{error, info};
use structopt::StructOpt;

use threadbridge::{AwaitError, NativeThreads, StdThreads, ThreadBridge, ThreadError};
use threadbridge::config::ThreadConfig;
#[cfg(unix)]
use threadbridge::PosixThreads;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
enum Backend {
    #[cfg(unix)]
    Posix,
    Std,
}

#[derive(Debug, Eq, PartialEq, Clone, Fail)]
#[fail(display = "No such backend: {}", _0)]
struct NoSuchBackend(String);

impl FromStr for Backend {
    type Err = NoSuchBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            #[cfg(unix)]
            "posix" => Ok(Backend::Posix),
            "std" => Ok(Backend::Std),
            _ => Err(NoSuchBackend(s.to_owned())),
        }
    }
}

#[derive(Debug, StructOpt, Clone)]
#[structopt(name = "bridge-demo",
about = env ! ("CARGO_PKG_DESCRIPTION"),
author = env ! ("CARGO_PKG_AUTHORS"),
version = env ! ("CARGO_PKG_VERSION"))]
struct DemoOpt {
    /// how many workers to launch, one per cpu by default.
    #[structopt(long = "--workers")]
    workers: Option<usize>,
    /// how long each worker sleeps before answering.
    #[structopt(default_value = "10", long = "--delay-ms")]
    delay_ms: u64,
    /// the stack size of every worker, in bytes.
    #[structopt(long = "--stack-size")]
    stack_size: Option<usize>,
    /// `posix` or `std`.
    #[structopt(
    default_value = "std",
    parse(try_from_str = str::parse),
    long = "--backend"
    )]
    backend: Backend,
    /// make every n-th worker fail, 0 never fails.
    #[structopt(default_value = "0", long = "--fail-every")]
    fail_every: usize,
}

#[derive(Debug, Fail)]
#[fail(display = "worker {} was unlucky", index)]
struct Unlucky {
    index: usize,
}

fn run<T: NativeThreads>(bridge: ThreadBridge<T>, opt: &DemoOpt) -> Result<(), ThreadError> {
    let workers = opt.workers.unwrap_or_else(num_cpus::get);
    let delay = Duration::from_millis(opt.delay_ms);
    let fail_every = opt.fail_every;
    let mut handles = Vec::with_capacity(workers);
    for index in 0..workers {
        let handle = bridge.spawn(index, move |index: usize| {
            thread::sleep(delay);
            if fail_every != 0 && index % fail_every == 0 {
                return Err(Unlucky { index });
            }
            Ok(index * index)
        })?;
        info!("worker {} launched as {}.", index, handle.launch_id());
        handles.push((index, handle));
    }
    for (index, handle) in handles {
        match handle.join() {
            Ok(square) => info!("worker {} answered {}.", index, square),
            Err(AwaitError::Thread(err)) => return Err(err),
            Err(err) => error!(target: "app::error", "worker {}: {}", index, err),
        }
    }
    Ok(())
}

fn main() {
    let opt: DemoOpt = DemoOpt::from_args();
    if let Err(err) = log4rs::init_config(threadbridge::config::log4rs::config()) {
        eprintln!("unable to init logger: {}", err);
    }
    info!("config: {:?}", opt);
    let mut config = ThreadConfig::new().with_name("bridge-demo-worker");
    if let Some(size) = opt.stack_size {
        config = config.with_stack_size(size);
    }
    let result = match opt.backend {
        #[cfg(unix)]
        Backend::Posix => run(ThreadBridge::with_config(PosixThreads, config), &opt),
        Backend::Std => run(ThreadBridge::with_config(StdThreads, config), &opt),
    };
    match result {
        Ok(()) => info!("goodbye."),
        Err(err) => {
            error!(target: "app::error", "err: {}; the demo stops.", err);
            std::process::exit(1);
        }
    }
}
