use near_workspaces::result::ExecutionFinalResult;
use ref_ve_sandbox::{ErrorPath, FailureReport};

pub trait TestResult {
    fn assert_ok(&self);
    fn assert_failed(&self, message: &str);
}

impl TestResult for ExecutionFinalResult {
    #[track_caller]
    fn assert_ok(&self) {
        assert!(
            self.is_success(),
            "Tx status mismatch. Want success. Have {:?}",
            self.failures()
        );
    }

    #[track_caller]
    fn assert_failed(&self, message: &str) {
        assert!(
            self.is_failure(),
            "Tx status mismatch. Want an execution error. Have success"
        );
        let report = FailureReport::from_result(self);
        let error = ErrorPath::default()
            .extract(report.document())
            .unwrap_or_else(|err| panic!("Tx status mismatch. Want an execution error. {err}: {report}"));

        assert!(
            error.contains(message),
            "Tx error message mismatch. Want message to contain \"{message}\". Have message \"{error}\"",
        );
    }
}
