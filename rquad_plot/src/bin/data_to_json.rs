mod common;

use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use rquad_plot::BenchmarkLogParser;

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    common::init_tracing();

    let app = common::app(
        "data_to_json",
        "Prints the data points of each rquad benchmark as JSON.",
    );
    let matches = app.get_matches();

    let filename = match common::filename(&matches) {
        Some(filename) => filename,
        // without a benchmark log there's nothing to do
        None => return Ok(()),
    };
    let config = common::plot_config(&matches)?;

    let results = BenchmarkLogParser::new(&config)
        .parse_file(filename)
        .wrap_err("parse benchmark log")?;
    let json = serde_json::to_string_pretty(&results)
        .wrap_err("serialize benchmark data")?;
    println!("{}", json);
    Ok(())
}
