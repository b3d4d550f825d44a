//! Configuration for the classification engine.

/// Configuration for normalization and classification
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Gender synthesized for every row when a sheet has no gender column
    pub default_gender: String,
    /// Number of decimals BMI values are rounded to
    pub bmi_decimals: u32,
    /// Classify students on the rayon pool instead of sequentially
    pub parallel: bool,
    /// Size of the worker pool installed by the binary
    pub worker_threads: usize,
    /// Log every header-to-field mapping decision
    pub log_mappings: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_gender: "M".to_string(),
            bmi_decimals: 2,
            parallel: true,
            worker_threads: num_cpus::get(),
            log_mappings: true,
        }
    }
}
