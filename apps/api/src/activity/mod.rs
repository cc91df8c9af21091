// Team activity: per-author commit summaries over a recent window.
// The aggregator and formatter are pure; all I/O happens behind CommitLogSource.

pub mod aggregator;
pub mod formatter;
pub mod handlers;
pub mod models;
pub mod window;
