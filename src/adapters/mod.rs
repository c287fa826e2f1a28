// Adapters layer: readers for build metadata produced by external tools.

pub mod pom;
