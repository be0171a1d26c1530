//! Task entity - a named remote command

/// Name of the built-in uptime task
pub const UPTIME_TASK: &str = "uptime";

/// A named command run once per selected host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    command: String,
}

impl Task {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }

    /// The "Report Uptimes" task: runs `uptime` on every host
    pub fn uptime() -> Self {
        Self::new(UPTIME_TASK, "uptime")
    }

    /// An ad hoc task built from command-line words
    pub fn ad_hoc(words: &[String]) -> Self {
        Self::new("run", words.join(" "))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_task_runs_uptime() {
        let task = Task::uptime();
        assert_eq!(task.name(), "uptime");
        assert_eq!(task.command(), "uptime");
    }

    #[test]
    fn ad_hoc_task_joins_words() {
        let task = Task::ad_hoc(&["df".to_string(), "-h".to_string()]);
        assert_eq!(task.name(), "run");
        assert_eq!(task.command(), "df -h");
    }
}
