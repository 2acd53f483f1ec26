use coverage_verify::commands::{execute_normalize, NormalizeArgs};
use std::fs;

#[test]
fn test_normalize_command_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let trace = dir.path().join("coverage_cmd.txt");
    fs::write(&trace, "Jitted=2:mB\nInlined=2:mA\nJitted=3:mC\n").unwrap();
    let output = dir.path().join("normalized.txt");

    execute_normalize(NormalizeArgs {
        trace_file: trace,
        assemblies: vec!["2".to_string()],
        output: Some(output.clone()),
    })
    .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "2:mA\n2:mB");
}

#[test]
fn test_normalize_command_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = execute_normalize(NormalizeArgs {
        trace_file: dir.path().join("absent.txt"),
        assemblies: vec!["2".to_string()],
        output: None,
    });
    assert!(result.is_err());
}

#[cfg(unix)]
mod verify_command {
    use coverage_verify::commands::{execute_verify, VerifyArgs, VerifyVerdict};
    use coverage_verify::output::read_report;
    use coverage_verify::profiler::Bitness;
    use std::fs;
    use std::path::PathBuf;

    fn args_for(dir: &std::path::Path, script: &str, reference: &str) -> VerifyArgs {
        let trace_dir = dir.join("traces");
        fs::create_dir_all(&trace_dir).unwrap();
        let reference_path = dir.join("reference.txt");
        fs::write(&reference_path, reference).unwrap();

        VerifyArgs {
            executable: PathBuf::from("/bin/sh"),
            arguments: vec!["-c".to_string(), script.to_string()],
            working_dir: None,
            trace_dir,
            profiler_dir: PathBuf::from("/opt/profiler"),
            bitness: Bitness::X64,
            light_mode: false,
            assemblies: vec!["2".to_string()],
            reference_trace: reference_path,
            success_marker: None,
            report: None,
            runtime_version: None,
            skip_gate: true,
        }
    }

    #[test]
    fn test_verify_command_pass_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args_for(
            dir.path(),
            &format!(
                "printf 'Jitted=2:mA\\n' > {}/traces/coverage_cmd.txt",
                dir.path().display()
            ),
            "Inlined=2:mA\n",
        );
        let report_path = dir.path().join("report.json");
        args.report = Some(report_path.clone());

        let verdict = execute_verify(args).unwrap();
        assert_eq!(verdict, VerifyVerdict::Pass);

        let report = read_report(&report_path).unwrap();
        assert_eq!(report.verdict, "pass");
        assert_eq!(report.normalized_actual, "2:mA");
    }

    #[test]
    fn test_verify_command_mismatch_is_failed_verdict_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(
            dir.path(),
            &format!(
                "printf 'Jitted=2:mA\\n' > {}/traces/coverage_cmd.txt",
                dir.path().display()
            ),
            "Jitted=2:mA\nJitted=2:mB\n",
        );

        let verdict = execute_verify(args).unwrap();
        assert_eq!(verdict, VerifyVerdict::Failed);
    }

    #[test]
    fn test_verify_command_setup_problem_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args_for(dir.path(), "true", "Jitted=2:mA\n");
        args.executable = PathBuf::from("/nonexistent/testee.exe");

        assert!(execute_verify(args).is_err());
    }
}
