/// Validate that every pipeline stage is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;
    crate::syntax::init_syntax_logging()?;

    let config = crate::frontend::standard_lexer_config()
        .map_err(|e| format!("Standard lexer configuration is invalid: {}", e))?;

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 3,
        "token_kinds" => config.len()
    );

    Ok(())
}
