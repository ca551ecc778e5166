pub mod config;
pub mod fmt;
pub mod group;
pub mod parser;
pub mod unit;

#[cfg(feature = "pyo3")]
pub mod plot;

// Re-exports.
pub use config::{ImageFormat, PlotConfig, SortOrder, XAxis, DIMENSIONS};
pub use fmt::{Palette, PlotFmt};
pub use group::{group_and_order, Series};
pub use parser::{
    parse_file, BenchmarkLogParser, DataPoint, GroupedResults, ParseError,
    Variant, LINE_PATTERN,
};
pub use unit::TimeUnit;

#[cfg(feature = "pyo3")]
pub use render::{benchmark_plot, benchmark_plots};

/// Evaluates a `PyResult`. On error, the python exception is printed and a
/// `Report` is returned.
#[cfg(feature = "pyo3")]
#[macro_export]
macro_rules! pytry {
    ($py:expr, $e:expr) => {{
        match $e {
            Ok(v) => v,
            Err(e) => {
                e.print($py);
                ::color_eyre::eyre::bail!(
                    "python error at {}:{}",
                    file!(),
                    line!()
                )
            }
        }
    }};
}

/// Creates a `PyDict` from `(key, value)` pairs.
#[cfg(feature = "pyo3")]
#[macro_export]
macro_rules! pydict {
    ($py:expr, $($tup:expr),* $(,)?) => {{
        let dict = ::pyo3::types::PyDict::new($py);
        let result: ::pyo3::PyResult<&::pyo3::types::PyDict> = (|| {
            $(
                let (key, value) = $tup;
                dict.set_item(key, value)?;
            )*
            Ok(dict)
        })();
        result
    }};
}

#[cfg(feature = "pyo3")]
mod render {
    use crate::config::PlotConfig;
    use crate::fmt::{Palette, PlotFmt};
    use crate::group::group_and_order;
    use crate::parser::{DataPoint, GroupedResults};
    use crate::plot::pyplot::PyPlot;
    use color_eyre::eyre::WrapErr;
    use color_eyre::Report;
    use pyo3::prelude::*;
    use std::path::PathBuf;

    /// Draws the chart of benchmark `name`: time per operation of each
    /// variant along the configured x axis. Returns the path of the saved
    /// chart.
    pub fn benchmark_plot(
        name: &str,
        points: &[DataPoint],
        config: &PlotConfig,
        palette: &Palette,
    ) -> Result<PathBuf, Report> {
        tracing::info!("plotting: {}", name);
        let gil = Python::acquire_gil();
        let py = gil.python();
        let plt = pytry!(py, PyPlot::new(py));

        let (fig, ax) = pytry!(py, plt.subplots());
        let (width, height) = PlotFmt::FIG_SIZE;
        pytry!(py, fig.set_size_inches(width, height));

        let font = pytry!(py, pydict!(py, ("fontsize", PlotFmt::FONT_SIZE)));
        pytry!(py, ax.set_title(config.title(name), Some(font)));

        // each chart starts from the first style of the palette
        let series = group_and_order(points, config.order());
        for (index, series) in series.into_iter().enumerate() {
            let label = PlotFmt::variant_name(series.variant);
            tracing::debug!("{} {}: x = {:?}", name, label, series.xs());
            let kwargs = pytry!(py, pydict!(py, ("label", label)));
            pytry!(
                py,
                ax.plot(
                    series.xs(),
                    series.ys(config.time_unit()),
                    Some(palette.style(index)),
                    Some(kwargs),
                )
            );
        }

        pytry!(py, ax.set_xscale("linear"));
        pytry!(py, ax.set_yscale("linear"));
        pytry!(py, ax.set_xlabel(config.x_label(), Some(font)));
        pytry!(py, ax.set_ylabel(&config.y_label(), Some(font)));
        pytry!(py, ax.legend(Some(font)));

        // save figure
        let path = config.output_path(name);
        let kwargs =
            pytry!(py, pydict!(py, ("format", config.format().extension())));
        pytry!(py, fig.savefig(&path.display().to_string(), Some(kwargs)));
        pytry!(py, plt.close(fig));
        tracing::info!("output plot: {}", path.display());
        Ok(path)
    }

    /// Draws one chart per benchmark. Returns the paths of all saved charts,
    /// in benchmark name order.
    pub fn benchmark_plots(
        results: &GroupedResults,
        config: &PlotConfig,
        palette: &Palette,
    ) -> Result<Vec<PathBuf>, Report> {
        if let Some(dir) = config.output_dir() {
            std::fs::create_dir_all(dir).wrap_err_with(|| {
                format!("create output directory {:?}", dir)
            })?;
        }
        results
            .iter()
            .map(|(name, points)| {
                benchmark_plot(name, points, config, palette)
                    .wrap_err_with(|| format!("plot benchmark {}", name))
            })
            .collect()
    }

}
