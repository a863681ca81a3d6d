use std::io;
use std::sync::{Arc, Mutex};

use secretshare::modules::deletion::model::Deletion;
use secretshare::modules::user::model::{Share, User};
use secretshare::services::memory::InMemoryStore;
use secretshare::services::processor::DeletionProcessor;

/// Collects everything the fmt layer writes.
#[derive(Clone, Default)]
struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn position(output: &str, line: &str) -> usize {
    output
        .find(line)
        .unwrap_or_else(|| panic!("missing {:?} in output:\n{}", line, output))
}

#[tokio::test]
async fn test_progress_lines_for_each_unit_of_work() {
    let captured = CapturedOutput::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let store = InMemoryStore::new();
    let holder = store
        .insert_user(User::new("u@example.com", vec![Share::new("A", "w1"), Share::new("B", "w2")]))
        .await;
    let with_holder = store.insert_deletion(Deletion::new("A")).await;
    let without_holder = store.insert_deletion(Deletion::new("Z")).await;

    DeletionProcessor::new(store).run().await.unwrap();

    let output = captured.contents();
    let expected = [
        "Processing deletion A.".to_string(),
        format!("Deleted shares for user {}.", holder.to_hex()),
        format!("Deleted deletion {}.", with_holder.to_hex()),
        "Processing deletion Z.".to_string(),
        format!("Deleted deletion {}.", without_holder.to_hex()),
    ];

    let positions: Vec<usize> = expected.iter().map(|line| position(&output, line)).collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "progress lines out of order:\n{}",
        output
    );
    assert_eq!(output.matches("Deleted shares for user").count(), 1);
}
