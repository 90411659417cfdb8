/// Global configuration for the Prism runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            profiling: ProfilingMode::Off,
        }
    }
}

impl Config {
    /// Apply the configuration to the process-wide subsystems.
    pub fn apply(&self) {
        match self.profiling {
            ProfilingMode::Off => crate::profiling::set_enabled(false),
            ProfilingMode::On => crate::profiling::set_enabled(true),
            #[cfg(feature = "profiling")]
            ProfilingMode::WithWebServer => {
                crate::profiling::init_profiling(crate::profiling::ProfilingBackend::PuffinHttp)
            }
            #[cfg(not(feature = "profiling"))]
            ProfilingMode::WithWebServer => {
                tracing::warn!("puffin web server requested but the `profiling` feature is off");
                crate::profiling::set_enabled(true);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Profiling scopes are compiled in but disabled
    Off,
    /// Scopes are recorded and can be read through the global profiler
    On,
    /// Scopes are recorded and served to 'puffin_viewer' over HTTP
    WithWebServer,
}
