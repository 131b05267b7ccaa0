/// Development utilities module
///
/// Fixture-backed stand-ins for the live API, used by tests, benchmarks
/// and `--mock` runs.
pub mod mock_client;
