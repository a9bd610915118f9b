//! TagLog CLI - demonstration and diagnostics binary
//!
//! Drives the taglog facade end to end against the real tracing backend:
//! every severity, extended mode from a struct and from a closure, thread
//! info, fault propagation, and a simulated lifecycle source. Useful for
//! eyeballing tag alignment and for verifying a host environment resolves
//! stack symbols.

use clap::{Parser, ValueEnum};
use std::sync::{Arc, Mutex};
use taglog::lifecycle::{
    LifecycleAutoLogger, LifecycleEvent, LifecycleObserver, LifecycleSource,
};
use taglog::{Fault, TagStyle};
use thiserror::Error;

mod error;

use error::CliError;

#[derive(Debug, Clone, ValueEnum)]
enum StyleArg {
    /// Pad tags to a running maximum width (default)
    Aligned,
    /// Emit bare tags without padding
    Plain,
}

impl From<StyleArg> for TagStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Aligned => TagStyle::Aligned,
            StyleArg::Plain => TagStyle::Plain,
        }
    }
}

#[derive(Parser)]
#[command(name = "taglog")]
#[command(version = taglog::VERSION)]
#[command(about = "Exercise the taglog diagnostic logger", long_about = None)]
struct Args {
    /// Stamp prefixed to every tag (e.g. a build id)
    #[arg(long)]
    stamp: Option<String>,

    /// Tag rendering style
    #[arg(long, value_enum, default_value = "aligned")]
    style: StyleArg,

    /// Disable the facade to demonstrate the short-circuit path
    #[arg(long)]
    disabled: bool,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    log_dir: String,

    /// Log filename
    #[arg(long, default_value = "taglog.log")]
    log_file: String,
}

#[derive(Debug, Error)]
#[error("tile fetch timed out")]
struct FetchTimeout;

impl Fault for FetchTimeout {}

#[derive(Debug, Error)]
#[error("lookup table index out of range")]
struct TableOverrun;

impl Fault for TableOverrun {
    fn is_unrecoverable(&self) -> bool {
        true
    }
}

/// Demo component that logs in extended mode with `self` as context.
struct TileCache;

impl TileCache {
    fn warm(&self, count: usize) {
        let log = taglog::global();
        log.info_with(self, &format!("warmed {} tiles", count));
        let on_evict = || {
            log.debug("eviction listener fired");
        };
        // A closure as context demonstrates the anonymous marker.
        log.debug_with(&on_evict, "registered eviction listener");
        on_evict();
    }
}

/// In-process lifecycle source standing in for a host framework.
#[derive(Default)]
struct SimulatedHost {
    observers: Mutex<Vec<Arc<dyn LifecycleObserver>>>,
}

impl SimulatedHost {
    fn drive(&self, subject_type: &str) {
        let events = [
            LifecycleEvent::Created,
            LifecycleEvent::Started,
            LifecycleEvent::Resumed,
            LifecycleEvent::Paused,
            LifecycleEvent::SaveState,
            LifecycleEvent::Stopped,
            LifecycleEvent::Destroyed,
        ];
        for event in events {
            let observers = match self.observers.lock() {
                Ok(guard) => guard.clone(),
                Err(_) => return,
            };
            for observer in observers {
                observer.on_lifecycle_event(subject_type, event);
            }
        }
    }
}

impl LifecycleSource for SimulatedHost {
    fn register(&self, observer: Arc<dyn LifecycleObserver>) {
        if let Ok(mut observers) = self.observers.lock() {
            if !observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
                observers.push(observer);
            }
        }
    }

    fn unregister(&self, observer: &Arc<dyn LifecycleObserver>) {
        if let Ok(mut observers) = self.observers.lock() {
            observers.retain(|o| !Arc::ptr_eq(o, observer));
        }
    }
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        err.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let _guard = taglog::logging::init_logging(&args.log_dir, &args.log_file).map_err(|source| {
        CliError::LoggingInit {
            dir: args.log_dir.clone(),
            source,
        }
    })?;

    if let Some(stamp) = &args.stamp {
        taglog::set_stamp(stamp.clone());
    }
    taglog::set_style(args.style.clone().into());
    taglog::set_enabled(!args.disabled);

    taglog::trace("trace line");
    taglog::debug("debug line");
    taglog::info("info line");
    taglog::warn("warn line");
    taglog::error("error line");
    taglog::fatal("fatal line");

    TileCache.warm(128);

    let log = taglog::global();
    log.error_err("download failed", &FetchTimeout);
    log.thread_info("main thread checking in");
    log.stack_trace("stack at demo point");

    log.debug(&taglog::pretty::hex(&[0x0F, 0xCD, 0xAD, 0x42]));
    log.debug(&taglog::pretty::map([
        ("stamp", args.stamp.as_deref().unwrap_or("<none>")),
        ("log_dir", args.log_dir.as_str()),
    ]));

    match log.log_or_propagate("fetch failed, continuing", FetchTimeout) {
        Ok(()) => {}
        Err(fault) => log.fatal_cause(&fault),
    }
    if let Err(fault) = log.log_or_propagate("must not be swallowed", TableOverrun) {
        // An unrecoverable fault comes back unlogged; the demo reports it
        // instead of crashing.
        log.fatal_err("propagated programming fault", &fault);
    }

    let host = SimulatedHost::default();
    let auto = LifecycleAutoLogger::new(Arc::clone(log));
    auto.attach(&host);
    host.drive("taglog_cli::MainWindow");
    auto.detach(&host);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingObserver {
        events: AtomicUsize,
    }

    impl LifecycleObserver for CountingObserver {
        fn on_lifecycle_event(&self, _subject_type: &str, _event: LifecycleEvent) {
            self.events.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_simulated_host_deduplicates_observers() {
        let host = SimulatedHost::default();
        let observer = Arc::new(CountingObserver {
            events: AtomicUsize::new(0),
        });
        // One erased handle, so pointer-identity dedup sees the same Arc.
        let erased: Arc<dyn LifecycleObserver> = observer.clone();
        host.register(erased.clone());
        host.register(erased.clone());

        host.drive("demo::MainWindow");
        assert_eq!(observer.events.load(Ordering::Relaxed), 7);

        host.unregister(&erased);
        host.drive("demo::MainWindow");
        assert_eq!(observer.events.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn test_simulated_host_survives_a_poisoned_observer_list() {
        let host = Arc::new(SimulatedHost::default());
        let poisoner = Arc::clone(&host);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.observers.lock().unwrap();
            panic!("poison the observer list");
        })
        .join();

        let observer = Arc::new(CountingObserver {
            events: AtomicUsize::new(0),
        });
        host.register(observer.clone());
        host.drive("demo::MainWindow");
        let erased: Arc<dyn LifecycleObserver> = observer;
        host.unregister(&erased);
    }
}
