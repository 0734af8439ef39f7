//! Configuration for the arithmetic front end
//!
//! Limits are generated at build time from `config/<profile>.toml`;
//! user preferences are resolved at runtime in [`runtime`].

// Generated by build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("ARITH_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("ARITH_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_generated_limits_are_consistent() {
        assert!(compile_time::file_processing::MAX_FILE_SIZE > 0);
        assert!(
            compile_time::lexical::MAX_INPUT_LENGTH as u64
                >= compile_time::file_processing::MAX_FILE_SIZE
        );
        assert!(compile_time::syntax::MAX_PARSE_DEPTH > 0);
        assert!(compile_time::logging::MAX_LOG_EVENTS_PER_FILE > 0);
    }

    #[test]
    fn test_build_info() {
        assert!(super::build_info::source_info().ends_with(".toml"));
    }
}
