//! Line-oriented command front end.
//!
//! Stands in for the button-driven UI: each input line maps to one
//! controller command.

use std::io::BufRead;
use std::path::PathBuf;
use std::str::FromStr;

use crate::controller::{ControllerState, TaskController};

/// One shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Known(PathBuf),
    Unknown(PathBuf),
    Acquire,
    StopAll,
    Monitor,
    StopMonitor,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        let path = |name: &str| {
            if arg.is_empty() {
                Err(format!("usage: {} <path>", name))
            } else {
                Ok(PathBuf::from(arg))
            }
        };

        match verb {
            "known" => path("known").map(Command::Known),
            "unknown" => path("unknown").map(Command::Unknown),
            "acquire" => Ok(Command::Acquire),
            "stop-all" => Ok(Command::StopAll),
            "monitor" => Ok(Command::Monitor),
            "stop-monitor" => Ok(Command::StopMonitor),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

const HELP: &str = "commands: known <path> | unknown <path> | acquire | stop-all | \
                    monitor | stop-monitor | status | quit";

/// Execute one command. Returns `false` when the shell should exit.
///
/// Command failures are already reported as status lines by the
/// controller, so they are only logged here.
pub fn execute(controller: &TaskController, command: Command) -> bool {
    let result = match command {
        Command::Known(path) => controller.select_known_file(path),
        Command::Unknown(path) => controller.select_unknown_file(path),
        Command::Acquire => controller.start_acquisition(),
        Command::StopAll => {
            controller.stop_all();
            Ok(())
        }
        Command::Monitor => controller.start_monitoring(),
        Command::StopMonitor => {
            controller.stop_monitoring();
            Ok(())
        }
        Command::Status => {
            println!("{}", describe(controller));
            Ok(())
        }
        Command::Help => {
            println!("{}", HELP);
            Ok(())
        }
        Command::Quit => return false,
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {}", e);
    }
    true
}

fn describe(controller: &TaskController) -> String {
    let state = match controller.state() {
        ControllerState::Idle => "idle",
        ControllerState::AcquisitionRunning => "acquisition running",
        ControllerState::MonitoringRunning => "monitoring running",
    };
    let registry = controller.registry();
    let show = |path: Option<PathBuf>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "<not set>".to_string())
    };

    format!(
        "state: {} | known: {} ({} addresses) | unknown: {} ({} addresses)",
        state,
        show(registry.known_file()),
        registry.known_count(),
        show(registry.unknown_file()),
        registry.unknown_count()
    )
}

/// Read commands until `quit` or end of input.
///
/// A line that is not valid UTF-8 is reported and skipped; only read
/// failures end the loop with an error.
pub fn run<R: BufRead>(controller: &TaskController, mut input: R) -> std::io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Ignoring unreadable input line: {}", e);
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if !execute(controller, command) {
                    break;
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::scripted::ScriptedFactory;
    use crate::registry::AddressRegistry;
    use crate::reporter::MemoryReporter;
    use std::io::Cursor;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "known /tmp/known.txt".parse::<Command>().unwrap(),
            Command::Known(PathBuf::from("/tmp/known.txt"))
        );
        assert_eq!(
            "unknown   /tmp/my list.txt ".parse::<Command>().unwrap(),
            Command::Unknown(PathBuf::from("/tmp/my list.txt"))
        );
        assert_eq!("acquire".parse::<Command>().unwrap(), Command::Acquire);
        assert_eq!("stop-all".parse::<Command>().unwrap(), Command::StopAll);
        assert_eq!("monitor".parse::<Command>().unwrap(), Command::Monitor);
        assert_eq!("stop-monitor".parse::<Command>().unwrap(), Command::StopMonitor);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("known".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    #[test]
    fn test_run_script() {
        let factory = Arc::new(ScriptedFactory::default());
        let sink = Arc::new(MemoryReporter::new());
        let controller = TaskController::new(
            Arc::new(AddressRegistry::new()),
            factory.clone(),
            sink.clone(),
        )
        .with_window(Duration::from_millis(30));

        let script = "monitor\n\nbogus\nmonitor\nstop-monitor\nquit\nacquire\n";
        run(&controller, Cursor::new(script)).unwrap();

        assert_eq!(factory.opened(), 6);
        assert_eq!(factory.alive(), 0);
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(sink.count_containing("Starting MAC address acquisition"), 0);
    }

    #[test]
    fn test_run_skips_undecodable_line() {
        let factory = Arc::new(ScriptedFactory::default());
        let controller = TaskController::new(
            Arc::new(AddressRegistry::new()),
            factory.clone(),
            Arc::new(MemoryReporter::new()),
        )
        .with_window(Duration::from_millis(30));

        let script: &[u8] = b"\xff\xfe\nmonitor\nstop-monitor\nquit\n";
        run(&controller, Cursor::new(script)).unwrap();

        assert_eq!(factory.opened(), 3);
        assert_eq!(factory.alive(), 0);
        assert_eq!(controller.state(), ControllerState::Idle);
    }
}
