/// Liveness probe; no dependencies are exercised.
pub async fn health() -> &'static str {
    "OK"
}
