use crate::unit::TimeUnit;
use std::collections::HashMap;
use std::path::{is_separator, PathBuf};

/// Side of the square image used by each benchmark. The number of nodes of a
/// tree built with resolution `res` is `dimension * dimension / res`.
pub const DIMENSIONS: [(&str, u64); 3] =
    [("Creation", 4096), ("PointLocation", 1024), ("Neighbours", 4096)];

/// What is shown on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XAxis {
    /// Number of nodes, derived from the resolution and the benchmark's
    /// dimension.
    Nodes,
    /// Raw resolution, as found in the benchmark name.
    Resolution,
}

impl XAxis {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nodes => "Number of nodes",
            Self::Resolution => "Resolution",
        }
    }

    pub fn parse(x_axis: &str) -> Option<Self> {
        match x_axis {
            "nodes" => Some(Self::Nodes),
            "resolution" | "res" => Some(Self::Resolution),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn parse(order: &str) -> Option<Self> {
        match order {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Pdf,
    Svg,
}

impl ImageFormat {
    /// File extension, which is also the name matplotlib expects in
    /// `savefig(format=...)`.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Svg => "svg",
        }
    }

    pub fn parse(format: &str) -> Option<Self> {
        match format {
            "png" => Some(Self::Png),
            "pdf" => Some(Self::Pdf),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// quantity on the x axis
    x_axis: XAxis,
    /// per-benchmark dimension, used to derive the number of nodes
    dimensions: HashMap<String, u64>,
    /// unit of the y axis
    time_unit: TimeUnit,
    /// order of the points along the x axis
    order: SortOrder,
    /// maps benchmark names to chart titles (and file names)
    titles: HashMap<String, String>,
    // where charts are saved; if not set, the current directory is used
    output_dir: Option<PathBuf>,
    format: ImageFormat,
}

impl PlotConfig {
    /// Creates a `PlotConfig` with the given x axis. Points are sorted in
    /// ascending order for `XAxis::Nodes` and in descending order for
    /// `XAxis::Resolution`, so that both charts show performance degrading
    /// from left to right.
    pub fn new(x_axis: XAxis) -> Self {
        let dimensions = DIMENSIONS
            .iter()
            .map(|(name, dimension)| (name.to_string(), *dimension))
            .collect();
        let order = match x_axis {
            XAxis::Nodes => SortOrder::Ascending,
            XAxis::Resolution => SortOrder::Descending,
        };
        Self {
            x_axis,
            dimensions,
            time_unit: TimeUnit::Nanos,
            order,
            titles: HashMap::new(),
            output_dir: None,
            format: ImageFormat::Png,
        }
    }

    /// Time per operation (in nanoseconds) vs number of nodes.
    pub fn nodes() -> Self {
        Self::new(XAxis::Nodes)
    }

    /// Time per operation (in microseconds) vs resolution.
    pub fn resolution() -> Self {
        let mut config = Self::new(XAxis::Resolution);
        config.set_time_unit(TimeUnit::Micros);
        config
    }

    pub fn x_axis(&self) -> XAxis {
        self.x_axis
    }

    /// Checks whether the x value must be derived from the dimension table.
    pub fn derives_nodes(&self) -> bool {
        self.x_axis == XAxis::Nodes
    }

    pub fn dimension(&self, name: &str) -> Option<u64> {
        self.dimensions.get(name).copied()
    }

    /// Adds (or replaces) the dimension of benchmark `name`.
    pub fn set_dimension(&mut self, name: impl Into<String>, dimension: u64) {
        self.dimensions.insert(name.into(), dimension);
    }

    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    pub fn set_time_unit(&mut self, time_unit: TimeUnit) {
        self.time_unit = time_unit;
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    /// Title of the chart of benchmark `name`; defaults to the name itself.
    pub fn title<'a>(&'a self, name: &'a str) -> &'a str {
        self.titles.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn set_title(
        &mut self,
        name: impl Into<String>,
        title: impl Into<String>,
    ) {
        self.titles.insert(name.into(), title.into());
    }

    pub fn output_dir(&self) -> Option<&PathBuf> {
        self.output_dir.as_ref()
    }

    pub fn set_output_dir(&mut self, output_dir: impl Into<PathBuf>) {
        self.output_dir = Some(output_dir.into());
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn set_format(&mut self, format: ImageFormat) {
        self.format = format;
    }

    /// Path of the chart of benchmark `name`: `<title>.<extension>`, inside
    /// the output directory if one is set.
    ///
    /// Path separators in the title are replaced by `_`, so that charts are
    /// always saved directly in the output directory.
    pub fn output_path(&self, name: &str) -> PathBuf {
        let stem: String = self
            .title(name)
            .chars()
            .map(|c| if is_separator(c) { '_' } else { c })
            .collect();
        let file_name = format!("{}.{}", stem, self.format.extension());
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    pub fn x_label(&self) -> &'static str {
        self.x_axis.label()
    }

    pub fn y_label(&self) -> String {
        format!("Time per operation ({})", self.time_unit.name())
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::nodes()
    }
}
