//! Lean running as external process.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::time::Duration;
use traduko::lean::{Error, LeanServer, Response};

#[derive(Serialize)]
struct Request<'a> {
    text: &'a str,
    lines: &'a [usize],
}

#[derive(Deserialize)]
struct Answer {
    states: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Lean command that is run once per request.
pub struct Process {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Process {
    /// Split a command line at whitespace into program and arguments.
    pub fn new(command: &str, timeout: Duration) -> Option<Self> {
        let mut words = command.split_whitespace().map(String::from);
        let program = words.next()?;
        let args = words.collect();
        Some(Self { program, args, timeout })
    }
}

fn parse_answer(out: &str, lines: &[usize]) -> Result<Response, Error> {
    let answer: Answer = serde_json::from_str(out).map_err(|e| Error::Protocol(e.to_string()))?;
    if answer.states.len() != lines.len() {
        let msg = format!("expected {} states, got {}", lines.len(), answer.states.len());
        return Err(Error::Protocol(msg));
    }
    Ok(Response {
        states: answer.states,
        error: answer.error,
    })
}

impl LeanServer for Process {
    fn states(&mut self, text: &str, lines: &[usize]) -> Result<Response, Error> {
        let request = serde_json::to_string(&Request { text, lines });
        let request = request.map_err(|e| Error::Protocol(e.to_string()))?;

        log::info!("Running {}", self.program);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let stdin = child.stdin.take();
        let stdout = child.stdout.take();

        let (sender, receiver) = flume::bounded(1);
        std::thread::spawn(move || {
            let communicate = || -> std::io::Result<String> {
                // closing stdin signals the end of the request
                stdin.map_or(Ok(()), |mut i| i.write_all(request.as_bytes()))?;
                let mut out = String::new();
                stdout.map_or(Ok(0), |mut o| o.read_to_string(&mut out))?;
                Ok(out)
            };
            // the receiver is gone after a timeout
            let _ = sender.send(communicate());
        });

        match receiver.recv_timeout(self.timeout) {
            Ok(out) => {
                let status = child.wait()?;
                if !status.success() {
                    log::warn!("{} failed with {}", self.program, status);
                    return Err(Error::Protocol(format!("Lean exited with {}", status)));
                }
                parse_answer(&out?, lines)
            }
            Err(_) => {
                log::warn!("Lean timed out, killing it");
                child.kill()?;
                child.wait()?;
                Err(Error::Timeout(self.timeout))
            }
        }
    }
}

#[test]
fn answers() {
    let out = r#"{"states": ["⊢ is_limit b l", "no goals"], "error": null}"#;
    let response = parse_answer(out, &[17, 18]).unwrap();
    assert_eq!(response.states[1], "no goals");
    assert_eq!(response.error, None);

    assert!(matches!(parse_answer(out, &[17]), Err(Error::Protocol(_))));
    assert!(matches!(parse_answer("states", &[]), Err(Error::Protocol(_))));
    let out = r#"{"states": [], "error": "unknown identifier"}"#;
    assert_eq!(parse_answer(out, &[]).unwrap().error.as_deref(), Some("unknown identifier"));
}

#[cfg(unix)]
#[test]
fn exit_status() {
    let mut failing = Process::new("false", traduko::lean::TIMEOUT).unwrap();
    match failing.states("", &[]) {
        Err(Error::Protocol(msg)) => assert!(msg.contains("exited")),
        other => panic!("unexpected result {:?}", other),
    }
    // `cat` succeeds, but echoes the request instead of answering
    let mut echo = Process::new("cat", traduko::lean::TIMEOUT).unwrap();
    assert!(matches!(echo.states("", &[]), Err(Error::Protocol(_))));
}

#[test]
fn command_line() {
    let p = Process::new("lean-states --project  lean ", traduko::lean::TIMEOUT).unwrap();
    assert_eq!(p.program, "lean-states");
    assert_eq!(p.args, ["--project", "lean"]);
    assert!(Process::new("  ", traduko::lean::TIMEOUT).is_none());
}
