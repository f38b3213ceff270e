#[cfg(test)]
mod tests {
    use assert_cmd::Command;

    /// Runs the test binary and returns its stdout and stderr.
    fn run(args: &[&str]) -> (String, String) {
        let output = Command::new(env!("CARGO_BIN_EXE_runner_test_logging"))
            .args(args)
            .output()
            .expect("Failed to run runner_test_logging");
        assert!(output.status.success());
        (
            String::from_utf8(output.stdout).expect("stdout is not UTF-8"),
            String::from_utf8(output.stderr).expect("stderr is not UTF-8"),
        )
    }

    /// Finds the line written for `message`, which ends with `": <message>"` for annotated
    /// handles.
    fn find_line<'a>(output: &'a str, message: &str) -> Option<&'a str> {
        let suffix = format!(": {message}");
        output.lines().find(|line| line.ends_with(&suffix))
    }

    /// Checks `line` has the form `<prefix><YYYY/MM/DD> <HH:MM:SS> runner_test_logging.rs:<n>: ..`.
    fn assert_annotated(line: &str, prefix: &str) {
        let rest = line
            .strip_prefix(prefix)
            .unwrap_or_else(|| panic!("missing prefix {prefix:?} in {line:?}"));
        let fields: Vec<&str> = rest.splitn(4, ' ').collect();
        assert_eq!(fields.len(), 4, "too few fields in {line:?}");

        let date: Vec<&str> = fields[0].split('/').collect();
        assert_eq!(date.len(), 3, "bad date in {line:?}");
        assert_eq!(date[0].len(), 4);
        assert!(date
            .iter()
            .all(|part| part.chars().all(|c| c.is_ascii_digit())));

        let time: Vec<&str> = fields[1].split(':').collect();
        assert_eq!(time.len(), 3, "bad time in {line:?}");
        assert!(time
            .iter()
            .all(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_digit())));

        let location = fields[2]
            .strip_prefix("runner_test_logging.rs:")
            .and_then(|rest| rest.strip_suffix(':'))
            .unwrap_or_else(|| panic!("bad location in {line:?}"));
        assert!(location.parse::<u32>().is_ok(), "bad line number in {line:?}");
    }

    #[test]
    fn test_debug_enabled() {
        let (stdout, stderr) = run(&["--debug"]);

        let line = find_line(&stdout, "a debug message").expect("debug message missing");
        assert_annotated(line, "DEBUG: ");
        let line =
            find_line(&stdout, "a handle debug message").expect("handle debug message missing");
        assert_annotated(line, "DEBUG: ");

        assert!(!stderr.contains("DEBUG: "));
    }

    #[test]
    fn test_debug_disabled() {
        let (stdout, stderr) = run(&[]);

        for output in [&stdout, &stderr] {
            assert!(!output.contains("DEBUG: "));
            assert!(!output.contains("debug message"));
        }
        // The other handles are unaffected.
        assert!(find_line(&stdout, "an info message").is_some());
    }

    #[test]
    fn test_handles_route_to_their_streams() {
        for args in [&[][..], &["--debug"][..]] {
            let (stdout, stderr) = run(args);

            let line = find_line(&stdout, "an info message").expect("info message missing");
            assert_annotated(line, "INFO: ");
            let line = find_line(&stdout, "a warning message").expect("warning message missing");
            assert_annotated(line, "WARNING: ");
            assert!(!stdout.contains("an error message"));

            let line = find_line(&stderr, "an error message").expect("error message missing");
            assert_annotated(line, "ERROR: ");
            assert_eq!(stderr.lines().count(), 1);
        }
    }

    #[test]
    fn test_stdout_handle_is_bare() {
        let (stdout, stderr) = run(&[]);
        assert!(stdout.lines().any(|line| line == "a plain message"));
        assert!(!stderr.contains("a plain message"));
    }

    #[test]
    fn test_second_init_replaces_the_first() {
        // Debug on, then off.
        let (stdout, _) = run(&["--debug", "--switch-debug"]);
        assert!(find_line(&stdout, "a debug message").is_some());
        assert!(!stdout.contains("a debug message after switching"));
        assert!(find_line(&stdout, "an info message after switching").is_some());

        // Debug off, then on.
        let (stdout, _) = run(&["--switch-debug"]);
        assert!(find_line(&stdout, "a debug message").is_none());
        let line = find_line(&stdout, "a debug message after switching")
            .expect("debug message after switching missing");
        assert_annotated(line, "DEBUG: ");
        // Exactly one info handle is installed after switching.
        let count = stdout
            .lines()
            .filter(|line| line.ends_with(": an info message after switching"))
            .count();
        assert_eq!(count, 1);
    }
}
