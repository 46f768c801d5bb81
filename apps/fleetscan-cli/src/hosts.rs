//! Host-name input: positional arguments or lines piped on stdin.

use std::io::{BufRead, IsTerminal};

/// # Errors
/// Fails when no hosts were passed and stdin is a terminal (nothing piped),
/// or when the piped list turns out empty.
pub fn resolve(args: Vec<String>) -> anyhow::Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("no hosts given (pass HOST arguments or pipe a list on stdin)");
    }

    let mut hosts = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        let host = line.trim();
        if host.is_empty() || host.starts_with('#') {
            continue;
        }
        hosts.push(host.to_owned());
    }

    if hosts.is_empty() {
        anyhow::bail!("host list on stdin is empty");
    }
    Ok(hosts)
}
