use std::time::Duration;

/// Sleeps until the wall clock reaches `timestamp_ms` (milliseconds since epoch)
///
/// Returns immediately if that moment has already passed.
pub async fn until(timestamp_ms: i64) {
    let now = chrono::Utc::now().timestamp_millis();
    if now < timestamp_ms {
        let wait = Duration::from_millis(timestamp_ms.abs_diff(now));
        tracing::debug!(?wait, "waiting until timestamp");
        tokio::time::sleep(wait).await;
    }
}

/// Marks a scenario as skipped
pub fn skip(name: &str) {
    tracing::debug!("Skipping test {name} ...");
}
