// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive CLI.
//
// Module responsibilities:
// - `config`: One explicit struct for every environment-derived setting
//   (API key, company profile, endpoint, output directory).
// - `generator`: Builds prompts per content type, calls the Anthropic
//   Messages API, and normalizes success or failure into a result record.
// - `storage`: Saves results as headed text artifacts and lists them.
// - `ui`: Implements the terminal menu flows and delegates to the above.
//
// Keeping this separation makes it easy to test the generation and storage
// logic without a terminal attached.
pub mod config;
pub mod generator;
pub mod storage;
pub mod ui;
