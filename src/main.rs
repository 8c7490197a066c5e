// Chart builders, one module per figure
mod charts;

// Application constants
mod constants;

// Data module for Polars-based loading and reshaping
mod data;

// Error handling
mod error;

mod logging;

// Profiling helpers
mod perf;

mod pipeline;

// Raster rendering and PNG output
mod render;

use pipeline::PipelineConfig;

fn main() {
    logging::init_logging();

    let result = pipeline::resolve_root().and_then(|root| {
        let config = PipelineConfig::from_root(&root);
        tracing::info!(
            data = %config.data_dir.display(),
            output = %config.output_dir.display(),
            dpi = config.dpi,
            "starting chart generation"
        );
        pipeline::run(&config)
    });

    match result {
        Ok(figures) => {
            println!("Generated figures:");
            for path in figures {
                println!("{}", path.display());
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "chart generation failed");
            eprintln!("{}: {}", e.title(), e.user_message());
            std::process::exit(1);
        }
    }
}
