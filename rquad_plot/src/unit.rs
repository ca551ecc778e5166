use std::fmt;

/// Unit in which times are shown on a chart.
///
/// Times are always stored in nanoseconds (the `ns/op` reported by the go
/// benchmark runner); a `TimeUnit` is only applied when the y series and the
/// y label are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Nanos,
    Micros,
}

impl TimeUnit {
    /// Converts a time in nanoseconds into this unit.
    pub fn from_nanos(&self, nanos: f64) -> f64 {
        match self {
            Self::Nanos => nanos,
            Self::Micros => nanos * 1e-3,
        }
    }

    /// Long name, as shown in axis labels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nanos => "nanoseconds",
            Self::Micros => "microseconds",
        }
    }

    pub fn parse(unit: &str) -> Option<Self> {
        match unit {
            "ns" | "nanos" | "nanoseconds" => Some(Self::Nanos),
            "us" | "micros" | "microseconds" => Some(Self::Micros),
            _ => None,
        }
    }
}

impl Default for TimeUnit {
    fn default() -> Self {
        Self::Nanos
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nanos => write!(f, "ns"),
            Self::Micros => write!(f, "us"),
        }
    }
}
