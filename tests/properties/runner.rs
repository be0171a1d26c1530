//! Property tests for task traversal and reporting.

use std::collections::HashSet;

use proptest::prelude::*;

use deckhand::{report_uptime, ExecError, Host, LineSink, RemoteExecutor, Role, Task, TaskRunner};

/// Fails for every address in `failing`, echoes the address otherwise
struct Scripted {
    failing: HashSet<String>,
}

impl RemoteExecutor for Scripted {
    fn execute(&self, host: &Host, _command: &str) -> Result<String, ExecError> {
        if self.failing.contains(host.address()) {
            Err(ExecError::RemoteCommand {
                status: 1,
                stderr: String::new(),
            })
        } else {
            Ok(format!("up on {}", host.address()))
        }
    }
}

fn role() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("app".to_string()),
        Just("web".to_string()),
        Just("db".to_string()),
        proptest::string::string_regex("[a-z][a-z0-9_-]{0,6}")
            .unwrap()
            .prop_filter("reserved", |r| r != "all"),
    ]
}

/// Hosts with unique addresses plus the set of addresses that fail
fn fleet() -> impl Strategy<Value = (Vec<Host>, HashSet<String>)> {
    proptest::collection::vec(
        (proptest::collection::vec(role(), 1..4), any::<bool>()),
        0..12,
    )
    .prop_map(|entries| {
        let mut hosts = Vec::new();
        let mut failing = HashSet::new();
        for (i, (roles, fails)) in entries.into_iter().enumerate() {
            let address = format!("host{i}.example.com");
            let roles = roles.iter().map(|r| Role::new(r).unwrap());
            hosts.push(Host::new(address.clone(), roles).unwrap());
            if fails {
                failing.insert(address);
            }
        }
        (hosts, failing)
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: exactly one line per host, in input order, each with the host prefix.
    #[test]
    fn property_one_line_per_host_in_order((hosts, failing) in fleet()) {
        let executor = Scripted { failing: failing.clone() };
        let mut out = Vec::new();
        let summary = report_uptime(&hosts, &executor, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        prop_assert_eq!(lines.len(), hosts.len());
        for (line, host) in lines.iter().zip(&hosts) {
            let prefix = format!("{}\t", host.report_prefix());
            prop_assert!(line.starts_with(&prefix), "{} does not start with {}", line, prefix);
            let is_error = line[prefix.len()..].starts_with("error: ");
            prop_assert_eq!(is_error, failing.contains(host.address()));
        }
        prop_assert_eq!(summary.hosts, hosts.len());
        prop_assert_eq!(summary.failures, failing.len());
    }

    /// PROPERTY: parallel execution produces the same report as sequential.
    #[test]
    fn property_parallel_matches_sequential((hosts, failing) in fleet()) {
        let executor = Scripted { failing };
        let task = Task::uptime();
        let selected: Vec<&Host> = hosts.iter().collect();

        let mut sequential = LineSink::new(Vec::new());
        TaskRunner::new(&executor).run(&task, &selected, &mut sequential).unwrap();

        let mut parallel = LineSink::new(Vec::new());
        TaskRunner::new(&executor)
            .parallel(true)
            .run(&task, &selected, &mut parallel)
            .unwrap();

        prop_assert_eq!(sequential.into_inner(), parallel.into_inner());
    }
}
