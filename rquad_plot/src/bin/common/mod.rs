use clap::{App, Arg, ArgMatches};
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use rquad_plot::{ImageFormat, Palette, PlotConfig, SortOrder, TimeUnit, XAxis};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Logs go to stderr so that stdout only has the output of the binary.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Creates an `App` with the arguments needed to parse a benchmark log.
pub fn app<'a, 'b>(name: &str, about: &'b str) -> App<'a, 'b> {
    App::new(name)
        .version("0.1")
        .author("Vitor Enes <vitorenesduarte@gmail.com>")
        .about(about)
        .arg(
            Arg::with_name("filename")
                .value_name("FILENAME")
                .help("output of `go test -bench`")
                .index(1),
        )
        .arg(
            Arg::with_name("x_axis")
                .long("x-axis")
                .value_name("X_AXIS")
                .help("quantity on the x axis; default: nodes")
                .possible_values(&["nodes", "resolution"])
                .takes_value(true),
        )
}

/// Adds the arguments that only affect how charts are drawn.
#[allow(dead_code)]
pub fn with_plot_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("unit")
            .long("unit")
            .value_name("UNIT")
            .help("unit of time per operation; default: ns")
            .possible_values(&["ns", "us"])
            .takes_value(true),
    )
    .arg(
        Arg::with_name("order")
            .long("order")
            .value_name("ORDER")
            .help(
                "order of points along the x axis; default: asc for nodes \
                 and desc for resolution",
            )
            .possible_values(&["asc", "desc"])
            .takes_value(true),
    )
    .arg(
        Arg::with_name("output_dir")
            .long("output-dir")
            .value_name("OUTPUT_DIR")
            .help("directory where charts are saved; default: .")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("format")
            .long("format")
            .value_name("FORMAT")
            .help("image format of charts; default: png")
            .possible_values(&["png", "pdf", "svg"])
            .takes_value(true),
    )
    .arg(
        Arg::with_name("title")
            .long("title")
            .value_name("NAME=TITLE")
            .help("title (and file name) of the chart of benchmark NAME")
            .takes_value(true)
            .multiple(true)
            .number_of_values(1),
    )
    .arg(
        Arg::with_name("styles")
            .long("styles")
            .value_name("STYLES")
            .help("comma-separated matplotlib line styles; default: r,g")
            .takes_value(true),
    )
}

/// Builds a `PlotConfig` from parsed arguments. Arguments not set keep their
/// default value.
pub fn plot_config(matches: &ArgMatches<'_>) -> Result<PlotConfig, Report> {
    let x_axis = parse_value(matches, "x_axis", XAxis::parse)?
        .unwrap_or(XAxis::Nodes);
    let mut config = PlotConfig::new(x_axis);

    if let Some(unit) = parse_value(matches, "unit", TimeUnit::parse)? {
        config.set_time_unit(unit);
    }
    if let Some(order) = parse_value(matches, "order", SortOrder::parse)? {
        config.set_order(order);
    }
    if let Some(format) = parse_value(matches, "format", ImageFormat::parse)?
    {
        config.set_format(format);
    }
    if let Some(output_dir) = matches.value_of("output_dir") {
        config.set_output_dir(output_dir);
    }
    if let Some(titles) = matches.values_of("title") {
        for title in titles {
            let (name, title) = parse_title(title)?;
            config.set_title(name, title);
        }
    }
    Ok(config)
}

/// Parses a `NAME=TITLE` pair. Titles are also file names, so they can't be
/// empty or contain path separators.
fn parse_title(value: &str) -> Result<(&str, &str), Report> {
    let (name, title) = value
        .split_once('=')
        .ok_or_else(|| eyre::eyre!("title {:?} should be NAME=TITLE", value))?;
    if title.is_empty() || title.chars().any(std::path::is_separator) {
        eyre::bail!("title {:?} is not a valid file name", title);
    }
    Ok((name, title))
}

/// Returns the benchmark log given as argument. If there's none, prints the
/// usage and returns `None`.
pub fn filename<'m>(matches: &'m ArgMatches<'_>) -> Option<&'m str> {
    let filename = matches.value_of("filename");
    if filename.is_none() {
        println!("{}", matches.usage());
    }
    filename
}

#[allow(dead_code)]
pub fn palette(matches: &ArgMatches<'_>) -> Result<Palette, Report> {
    match matches.value_of("styles") {
        Some(styles) => {
            let styles: Vec<_> = styles
                .split(',')
                .map(str::trim)
                .filter(|style| !style.is_empty())
                .collect();
            Palette::new(styles)
                .ok_or_else(|| eyre::eyre!("at least one style is needed"))
        }
        None => Ok(Palette::default()),
    }
}

fn parse_value<T>(
    matches: &ArgMatches<'_>,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, Report> {
    matches
        .value_of(name)
        .map(|value| {
            parse(value)
                .ok_or_else(|| eyre::eyre!("invalid value {:?}", value))
                .wrap_err_with(|| format!("parse {}", name))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args<'a>(args: &[&str]) -> ArgMatches<'a> {
        let app = with_plot_args(app("rquad_plot", "test"));
        let args = std::iter::once("rquad_plot").chain(args.iter().copied());
        app.get_matches_from_safe(args).expect("arguments should be valid")
    }

    #[test]
    fn missing_filename() {
        assert_eq!(filename(&parse_args(&[])), None);
        assert_eq!(filename(&parse_args(&["--unit", "us"])), None);
        assert_eq!(filename(&parse_args(&["bench.txt"])), Some("bench.txt"));
    }

    #[test]
    fn default_config() {
        let config = plot_config(&parse_args(&["bench.txt"])).unwrap();
        assert_eq!(config.x_axis(), XAxis::Nodes);
        assert_eq!(config.time_unit(), TimeUnit::Nanos);
        assert_eq!(config.order(), SortOrder::Ascending);
        assert_eq!(config.format(), ImageFormat::Png);
        assert_eq!(palette(&parse_args(&[])).unwrap(), Palette::default());
    }

    #[test]
    fn config_from_args() {
        let args = [
            "bench.txt",
            "--x-axis",
            "resolution",
            "--unit",
            "us",
            "--format",
            "svg",
            "--title",
            "Creation=creation",
            "--styles",
            "b.-, k",
        ];
        let matches = parse_args(&args);
        let config = plot_config(&matches).unwrap();
        assert_eq!(config.x_axis(), XAxis::Resolution);
        assert_eq!(config.time_unit(), TimeUnit::Micros);
        assert_eq!(config.order(), SortOrder::Descending);
        assert_eq!(config.title("Creation"), "creation");
        assert_eq!(
            config.output_path("Creation"),
            std::path::PathBuf::from("creation.svg")
        );
        let expected = Palette::new(vec!["b.-", "k"]).unwrap();
        assert_eq!(palette(&matches).unwrap(), expected);
    }

    #[test]
    fn invalid_titles() {
        for title in vec!["Creation", "Creation=", "Creation=a/b"] {
            let matches = parse_args(&["bench.txt", "--title", title]);
            assert!(plot_config(&matches).is_err(), "{}", title);
        }
    }
}
