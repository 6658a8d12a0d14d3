//! Scenario runner
//!
//! Wraps a scenario future with start and outcome logging. Failures
//! propagate to the caller; nothing is retried.

use std::future::Future;

use tracing::{error, info};

use crate::E2eResult;

/// Run a named scenario, logging its outcome
pub async fn run_test<Fut>(name: &str, fut: Fut) -> E2eResult<()>
where
    Fut: Future<Output = E2eResult<()>>,
{
    info!("[TESTING...] {}", name);
    match fut.await {
        Ok(()) => {
            info!("[SUCCESS] {}", name);
            Ok(())
        }
        Err(e) => {
            error!("[FAILED] {}: {}", name, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::E2eError;

    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let result = run_test("noop", async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let result = run_test("failing", async {
            Err(E2eError::Assertion("expected 1, got 2".to_string()))
        })
        .await;
        assert!(matches!(result, Err(E2eError::Assertion(_))));
    }

    #[tokio::test]
    async fn test_run_logs_start_and_success_lines_with_name() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = CaptureWriter(Arc::clone(&buffer));
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let guard = tracing::subscriber::set_default(subscriber);
        run_test("balance check", async { Ok(()) }).await.unwrap();
        drop(guard);

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("[TESTING...] balance check"), "{}", output);
        assert!(output.contains("[SUCCESS] balance check"), "{}", output);
    }

    #[tokio::test]
    async fn test_run_logs_failure_with_context() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = CaptureWriter(Arc::clone(&buffer));
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let guard = tracing::subscriber::set_default(subscriber);
        let result = run_test("doomed", async {
            Err(E2eError::Assertion("count mismatch".to_string()))
        })
        .await;
        drop(guard);

        assert!(result.is_err());
        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("[FAILED] doomed"), "{}", output);
        assert!(output.contains("count mismatch"), "{}", output);
    }
}
