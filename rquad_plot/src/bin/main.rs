mod common;

use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use rquad_plot::BenchmarkLogParser;

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    common::init_tracing();

    let app = common::app(
        "rquad_plot",
        "Plots time per operation of each rquad benchmark.",
    );
    let matches = common::with_plot_args(app).get_matches();

    let filename = match common::filename(&matches) {
        Some(filename) => filename,
        // without a benchmark log there's nothing to do
        None => return Ok(()),
    };
    let config = common::plot_config(&matches)?;
    let palette = common::palette(&matches)?;
    tracing::debug!("config: {:?}", config);

    let results = BenchmarkLogParser::new(&config)
        .parse_file(filename)
        .wrap_err("parse benchmark log")?;
    let paths = rquad_plot::benchmark_plots(&results, &config, &palette)?;
    tracing::info!("saved {} plots", paths.len());
    Ok(())
}
