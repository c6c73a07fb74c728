/*!
 * Translation services built on top of the backend clients:
 * - `translation::client`: fail-open adapter over a backend
 * - `translation::references`: `$KEY$` cross-reference resolution
 * - `translation::context`: context-tag heuristics for better translations
 * - `translation::postprocess`: target-language cleanup after restoration
 */

pub mod client;
pub mod context;
pub mod postprocess;
pub mod references;

pub use client::TranslationClient;
pub use references::GlobalTranslationMap;
