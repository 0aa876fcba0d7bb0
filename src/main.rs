use ci_param_gen::core::ConfigProvider;
use ci_param_gen::utils::{logger, validation::Validate};
use ci_param_gen::{
    CliConfig, GeneratorSettings, LocalStorage, ParamError, ParameterEngine, ParameterPipeline,
};
use clap::Parser;

fn fail(e: &ParamError, context: &str) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_format);

    tracing::info!("Starting ci-param-gen");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match GeneratorSettings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => fail(&e, "Failed to load configuration"),
    };

    if let Err(e) = settings.validate() {
        fail(&e, "Configuration validation failed");
    }

    tracing::info!(
        "Branch: {}, main branches: {}",
        settings.branch().unwrap_or("<unset>"),
        settings.main_branches().join(", ")
    );

    let pipeline = ParameterPipeline::new(LocalStorage::default(), settings);
    let engine = ParameterEngine::new(pipeline);

    let result = if cli.dry_run {
        engine.dry_run().await
    } else {
        engine.run().await
    };

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => fail(&e, "Parameter generation failed"),
    };

    let summary = outcome.parameters.to_json()?;
    println!("Generated pipeline parameters: {}", summary);
    if let Some(path) = &outcome.output_path {
        tracing::info!("📁 Output saved to: {}", path);
    } else {
        tracing::info!(
            "Would write to: {}",
            engine.pipeline().config().output_file()
        );
    }

    Ok(())
}
