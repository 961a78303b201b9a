/// Switches shared by both analysis passes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Drop warnings and hints.
    pub fatal_only: bool,
    /// Enable rules for language extensions, currently the `_` placeholder.
    pub extra_features: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            fatal_only: false,
            extra_features: true,
        }
    }
}

impl AnalysisOptions {
    #[must_use]
    pub fn fatal_only(mut self, enabled: bool) -> Self {
        self.fatal_only = enabled;
        self
    }

    #[must_use]
    pub fn extra_features(mut self, enabled: bool) -> Self {
        self.extra_features = enabled;
        self
    }
}
