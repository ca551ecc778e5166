use pyo3::prelude::*;
use pyo3::types::PyDict;

// https://matplotlib.org/stable/api/figure_api.html#matplotlib.figure.Figure
pub struct Figure<'a> {
    fig: &'a PyAny,
}

impl<'a> Figure<'a> {
    pub fn new(fig: &'a PyAny) -> Self {
        Self { fig }
    }

    pub fn fig(&self) -> &PyAny {
        self.fig
    }

    pub fn set_size_inches(&self, width: f64, height: f64) -> PyResult<()> {
        self.fig.call_method1("set_size_inches", (width, height))?;
        Ok(())
    }

    pub fn savefig(&self, path: &str, kwargs: Option<&PyDict>) -> PyResult<()> {
        self.fig.call_method("savefig", (path,), kwargs)?;
        Ok(())
    }
}
