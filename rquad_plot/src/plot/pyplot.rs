use crate::plot::axes::Axes;
use crate::plot::figure::Figure;
use pyo3::prelude::*;

pub struct PyPlot<'p> {
    plt: &'p PyModule,
}

impl<'p> PyPlot<'p> {
    pub fn new(py: Python<'p>) -> PyResult<Self> {
        let plt = PyModule::import(py, "matplotlib.pyplot")?;
        Ok(Self { plt })
    }

    /// Creates a figure with a single `Axes`.
    pub fn subplots(&self) -> PyResult<(Figure<'_>, Axes<'_>)> {
        let result = self.plt.call_method0("subplots")?;
        let (fig, ax): (&PyAny, &PyAny) = result.extract()?;
        Ok((Figure::new(fig), Axes::new(ax)))
    }

    pub fn close(&self, figure: Figure<'_>) -> PyResult<()> {
        self.plt.call_method1("close", (figure.fig(),))?;
        Ok(())
    }
}
