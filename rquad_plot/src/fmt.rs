use crate::parser::Variant;

pub struct PlotFmt;

impl PlotFmt {
    /// Font size of titles, axis labels and legends.
    pub const FONT_SIZE: usize = 22;

    /// Figure size, in inches.
    pub const FIG_SIZE: (f64, f64) = (18.0, 9.0);

    pub fn variant_name(variant: Variant) -> &'static str {
        variant.tag()
    }
}

/// Line styles used by one chart, in matplotlib's `fmt` notation (e.g. `"r"`
/// for a red line, `"g.-"` for green dots joined by a line).
///
/// The i-th series of a chart is drawn with the i-th style, wrapping around
/// when there are more series than styles. Every chart starts from the first
/// style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    styles: Vec<String>,
}

impl Palette {
    /// Creates a new `Palette`. Returns `None` if `styles` is empty.
    pub fn new<S: Into<String>>(styles: Vec<S>) -> Option<Self> {
        if styles.is_empty() {
            return None;
        }
        let styles = styles.into_iter().map(Into::into).collect();
        Some(Self { styles })
    }

    pub fn style(&self, index: usize) -> &str {
        &self.styles[index % self.styles.len()]
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for Palette {
    // red and green lines
    fn default() -> Self {
        Self {
            styles: vec![String::from("r"), String::from("g")],
        }
    }
}
