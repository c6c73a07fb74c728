/*!
 * # loctrans - Game Localization Batch Translator
 *
 * A Rust library for batch machine translation of game-mod localization
 * files.
 *
 * ## Features
 *
 * - Parse and classify localization lines (`key:version "value"`)
 * - Repair common format defects before translation
 * - Protect game variables, color codes and named terms across the API
 *   round trip with reversible placeholders
 * - Translate through pluggable backends:
 *   - DeepL API
 *   - Youdao API (signed requests, global rate limiting)
 * - Resolve `$KEY$` cross-references against already-translated entries
 * - Persist a growing glossary and a translation quality log
 * - Batch processing with a bounded worker pool
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `localization`: Line parsing, classification and repair
 * - `protect`: Placeholder masking and restoration
 * - `glossary`: Glossary and protected-terms stores
 * - `translation`: Translation plumbing:
 *   - `translation::client`: Fail-open client with retries
 *   - `translation::references`: Cross-reference resolution
 *   - `translation::context`: Context-tag heuristics
 * - `providers`: Backend implementations:
 *   - `providers::deepl`: DeepL API client
 *   - `providers::youdao`: Youdao API client
 * - `pipeline`: Per-file processing pipeline
 * - `app_controller`: Directory orchestrator
 * - `file_utils`: File system operations
 * - `quality`: Translation quality log
 * - `stats`: Shared run counters
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod glossary;
pub mod localization;
pub mod pipeline;
pub mod protect;
pub mod providers;
pub mod quality;
pub mod stats;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{BackendKind, Config};
pub use app_controller::Controller;
pub use errors::{AppError, ProviderError};
pub use glossary::{Glossary, ProtectedTerms};
pub use localization::{LocEntry, LocLine};
pub use translation::{GlobalTranslationMap, TranslationClient};
