//! Keystroke-driven QSO logging: a compact token language that builds ADIF
//! contact records incrementally, with SQLite and ADI persistence.
//!
//! # Examples
//!
//! Evaluating tokens directly with [`console::Console`]:
//! ```
//! use qsocc::{config::StationConfig, console::Console, qso::Field};
//!
//! let cfg = StationConfig::new("DL1ABC", "JO30uj", "Tom");
//! let mut console = Console::new(&cfg).expect("config");
//! for token in ["20m", "cw", "k1abc", "'Bob", "@FN42"] {
//!     assert!(!console.evaluate(token).is_error());
//! }
//! assert_eq!(console.current_qso().get(Field::RstSent), Some("599"));
//! console.finalize();
//! assert_eq!(console.pop().map(|q| q.call().to_string()).as_deref(), Some("K1ABC"));
//! ```
//!
//! Runtime usage with a SQLite sink:
//! ```no_run
//! use qsocc::{
//!     config::StationConfig,
//!     console::Console,
//!     persist::{sqlite::SqliteLog, LogHistory},
//!     runtime::handle::{spawn_console, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let log = SqliteLog::open("qsocc.db").expect("open sqlite");
//! let history = LogHistory::load(&log).expect("history");
//! let cfg = StationConfig::from_json_file("station.json").expect("config");
//! let console = Console::with_history(&cfg, history).expect("console");
//! let handle = spawn_console(console, Some(Box::new(log)), RuntimeConfig::default());
//! for c in "40m ssb k1abc\n".chars() {
//!     handle.append_char(c).await.expect("input");
//! }
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```

/// Station configuration loaded at startup.
pub mod config;
/// Input accumulator and record lifecycle.
pub mod console;
/// Session state, finalized stack and worked-station index.
pub mod core;
/// Token application and event exchange handling.
pub mod engine;
/// Value normalizers shared by the evaluator.
pub mod normalize;
/// Record sinks and sources: SQLite and ADI.
pub mod persist;
/// Contact record and field vocabulary.
pub mod qso;
/// Single-writer async runtime around a console.
pub mod runtime;
/// Per-keystroke outcome reported to the input loop.
pub mod status;
/// Token classification.
pub mod token;
/// Band, mode and activation program tables.
pub mod types;
/// Syntax checks for callsigns, locators, dates, times and reports.
pub mod validate;

/// Program name written into ADI headers and the version query.
pub const PROJ_NAME: &str = "QsoCC";

/// `QsoCC: v<version>`, answered to `-V`.
pub fn version_string() -> String {
    format!("{PROJ_NAME}: v{}", env!("CARGO_PKG_VERSION"))
}
