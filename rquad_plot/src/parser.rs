use crate::config::PlotConfig;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Pattern of a benchmark line, e.g.
/// `BenchmarkCNTreePointLocationRes32-8   1000   250 ns/op`.
///
/// Captures: variant tag, benchmark name, resolution, and time per operation.
/// The field after the dash (`GOMAXPROCS`) and the iteration count are
/// matched but ignored.
///
/// Digits and whitespace are ASCII only: `\d` and `\s` would also match
/// other Unicode digits and spaces.
pub const LINE_PATTERN: &str = concat!(
    r"^Benchmark(Basic|CNTree)(.*)Res([0-9]*)-[0-9]*",
    r"[\t\n\x0B\f\r ]*[0-9]*[\t\n\x0B\f\r ]*([0-9]*)",
);

/// Benchmarked quadtree implementation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Variant {
    Basic,
    CNTree,
}

impl Variant {
    /// Tag used in benchmark names, also used as legend label.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::CNTree => "CNTree",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "Basic" => Some(Self::Basic),
            "CNTree" => Some(Self::CNTree),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A single benchmark measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub variant: Variant,
    /// benchmark name, e.g. `PointLocation`
    pub name: String,
    /// resolution as found in the benchmark line
    pub resolution: u64,
    /// value on the x axis: either `resolution` or the derived number of
    /// nodes
    pub x: u64,
    /// time per operation, in nanoseconds
    pub time: f64,
}

/// Data points per benchmark name, each in file order.
pub type GroupedResults = BTreeMap<String, Vec<DataPoint>>;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot open benchmark log {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error while reading benchmark log")]
    Read(#[from] io::Error),
    #[error("line {line}: benchmark {name:?} has no known dimension")]
    UnknownBenchmark { line: usize, name: String },
    #[error("line {line}: invalid {field} {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: benchmark {name:?} has resolution 0")]
    ZeroResolution { line: usize, name: String },
    #[error("line {line}: number of nodes of benchmark {name:?} overflows")]
    NodesOverflow { line: usize, name: String },
}

pub struct BenchmarkLogParser<'c> {
    line_regex: Regex,
    config: &'c PlotConfig,
}

impl<'c> BenchmarkLogParser<'c> {
    pub fn new(config: &'c PlotConfig) -> Self {
        let line_regex =
            Regex::new(LINE_PATTERN).expect("line pattern should be valid");
        Self { line_regex, config }
    }

    /// Parses the benchmark log at `path`.
    pub fn parse_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<GroupedResults, ParseError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("parsing {:?}", path);
        self.parse_reader(BufReader::new(file))
    }

    pub fn parse_str(&self, log: &str) -> Result<GroupedResults, ParseError> {
        self.parse_reader(log.as_bytes())
    }

    /// Parses a benchmark log in a single pass. Lines that are not valid
    /// UTF-8 are decoded lossily, since they can only be matched by the
    /// pattern if their relevant part is ASCII.
    pub fn parse_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<GroupedResults, ParseError> {
        let mut results = GroupedResults::new();
        let mut point_count = 0;
        for (index, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            // line numbers start at 1
            if let Some(point) = self.parse_line(index + 1, &line)? {
                point_count += 1;
                results
                    .entry(point.name.clone())
                    .or_insert_with(Vec::new)
                    .push(point);
            }
        }
        tracing::info!(
            "parsed {} data points of {} benchmarks",
            point_count,
            results.len()
        );
        Ok(results)
    }

    /// Parses a single line. Returns `None` if the line is not a benchmark
    /// line.
    pub fn parse_line(
        &self,
        line_number: usize,
        line: &str,
    ) -> Result<Option<DataPoint>, ParseError> {
        let captures = match self.line_regex.captures(line) {
            Some(captures) => captures,
            None => return Ok(None),
        };

        // the pattern only matches known tags
        let variant = Variant::parse(&captures[1])
            .expect("matched variant tag should be known");
        let name = captures[2].to_string();
        let resolution: u64 =
            parse_capture(&captures, 3, "resolution", line_number)?;
        let time: f64 = parse_capture(&captures, 4, "time", line_number)?;

        let x = if self.config.derives_nodes() {
            let dimension = self.config.dimension(&name).ok_or_else(|| {
                ParseError::UnknownBenchmark {
                    line: line_number,
                    name: name.clone(),
                }
            })?;
            if resolution == 0 {
                return Err(ParseError::ZeroResolution {
                    line: line_number,
                    name,
                });
            }
            let pixels = dimension.checked_mul(dimension).ok_or_else(|| {
                ParseError::NodesOverflow {
                    line: line_number,
                    name: name.clone(),
                }
            })?;
            pixels / resolution
        } else {
            resolution
        };

        Ok(Some(DataPoint {
            variant,
            name,
            resolution,
            x,
            time,
        }))
    }
}

fn parse_capture<T: std::str::FromStr>(
    captures: &Captures<'_>,
    group: usize,
    field: &'static str,
    line: usize,
) -> Result<T, ParseError> {
    let value = &captures[group];
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

/// Parses the benchmark log at `path` according to `config`.
pub fn parse_file<P: AsRef<Path>>(
    path: P,
    config: &PlotConfig,
) -> Result<GroupedResults, ParseError> {
    BenchmarkLogParser::new(config).parse_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DIMENSIONS;
    use quickcheck_macros::quickcheck;

    const LOG: &str = "\
goos: linux
goarch: amd64
pkg: github.com/arl/rquad
BenchmarkBasicPointLocationRes32-8   	 1000	   310 ns/op
BenchmarkCNTreePointLocationRes32-8   1000   250
BenchmarkCNTreeCreationRes16-8   	      20	  61234567 ns/op
BenchmarkBasicPointLocationRes64-8   	 2000	   190 ns/op
PASS
ok  	github.com/arl/rquad	12.345s
";

    fn point(
        variant: Variant,
        name: &str,
        resolution: u64,
        x: u64,
        time: f64,
    ) -> DataPoint {
        DataPoint {
            variant,
            name: name.to_string(),
            resolution,
            x,
            time,
        }
    }

    #[test]
    fn parse_line_derives_nodes() {
        let config = PlotConfig::nodes();
        let parser = BenchmarkLogParser::new(&config);
        let parsed = parser
            .parse_line(1, "BenchmarkCNTreePointLocationRes32-8   1000   250")
            .expect("line should parse");
        assert_eq!(
            parsed,
            Some(point(Variant::CNTree, "PointLocation", 32, 32768, 250.0))
        );
    }

    #[test]
    fn parse_line_keeps_resolution() {
        let config = PlotConfig::resolution();
        let parser = BenchmarkLogParser::new(&config);
        let parsed = parser
            .parse_line(1, "BenchmarkBasicLeavesRes8-4  300  4200 ns/op")
            .expect("unknown benchmarks are fine without derivation");
        assert_eq!(parsed, Some(point(Variant::Basic, "Leaves", 8, 8, 4200.0)));
    }

    #[test]
    fn non_matching_lines_are_skipped() {
        let config = PlotConfig::nodes();
        let parser = BenchmarkLogParser::new(&config);
        for line in vec![
            "",
            "PASS",
            "goos: linux",
            "BenchmarkOtherPointLocationRes32-8   1000   250",
            "  BenchmarkBasicCreationRes32-8   1000   250",
            "BenchmarkBasicCreation-8   1000   250",
            // only ASCII digits are numbers
            "BenchmarkBasicCreationRes\u{0663}-8 10 20",
            "BenchmarkBasicCreationRes\u{FF13}\u{FF12}-8 10 20",
        ] {
            assert_eq!(parser.parse_line(1, line).unwrap(), None, "{}", line);
        }
    }

    #[test]
    fn parse_groups_in_file_order() {
        let config = PlotConfig::nodes();
        let results = BenchmarkLogParser::new(&config).parse_str(LOG).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results["PointLocation"],
            vec![
                point(Variant::Basic, "PointLocation", 32, 32768, 310.0),
                point(Variant::CNTree, "PointLocation", 32, 32768, 250.0),
                point(Variant::Basic, "PointLocation", 64, 16384, 190.0),
            ]
        );
        assert_eq!(
            results["Creation"],
            vec![point(Variant::CNTree, "Creation", 16, 1048576, 61234567.0)]
        );
    }

    #[test]
    fn no_matching_lines() {
        let config = PlotConfig::nodes();
        let parser = BenchmarkLogParser::new(&config);
        let results = parser.parse_str("PASS\nok github.com/arl/rquad\n");
        assert!(results.unwrap().is_empty());
    }

    #[test]
    fn unknown_benchmark() {
        let config = PlotConfig::nodes();
        let parser = BenchmarkLogParser::new(&config);
        let log = "PASS\nBenchmarkBasicLeavesRes8-4  300  4200 ns/op\n";
        match parser.parse_str(log) {
            Err(ParseError::UnknownBenchmark { line, name }) => {
                assert_eq!(line, 2);
                assert_eq!(name, "Leaves");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn custom_dimension() {
        let mut config = PlotConfig::nodes();
        config.set_dimension("Leaves", 256);
        let parser = BenchmarkLogParser::new(&config);
        let parsed = parser
            .parse_line(1, "BenchmarkBasicLeavesRes8-4  300  4200 ns/op")
            .unwrap();
        assert_eq!(
            parsed,
            Some(point(Variant::Basic, "Leaves", 8, 8192, 4200.0))
        );
    }

    #[test]
    fn invalid_numbers() {
        let config = PlotConfig::nodes();
        let parser = BenchmarkLogParser::new(&config);
        match parser.parse_line(7, "BenchmarkBasicCreationRes-8  10  20") {
            Err(ParseError::InvalidNumber { line, field, value }) => {
                assert_eq!(line, 7);
                assert_eq!(field, "resolution");
                assert_eq!(value, "");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        match parser.parse_line(3, "BenchmarkBasicCreationRes16-8  10  ") {
            Err(ParseError::InvalidNumber { field, .. }) => {
                assert_eq!(field, "time");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn zero_resolution() {
        let config = PlotConfig::nodes();
        let parser = BenchmarkLogParser::new(&config);
        let result = parser.parse_line(1, "BenchmarkBasicCreationRes0-8 1 2");
        assert!(matches!(result, Err(ParseError::ZeroResolution { .. })));
    }

    #[test]
    fn nodes_overflow() {
        let mut config = PlotConfig::nodes();
        config.set_dimension("Big", u64::MAX);
        let parser = BenchmarkLogParser::new(&config);
        match parser.parse_line(4, "BenchmarkBasicBigRes2-8 10 20") {
            Err(ParseError::NodesOverflow { line, name }) => {
                assert_eq!(line, 4);
                assert_eq!(name, "Big");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        // the largest dimension whose square fits still works
        config.set_dimension("Big", u32::MAX as u64);
        let parser = BenchmarkLogParser::new(&config);
        let parsed = parser
            .parse_line(1, "BenchmarkBasicBigRes1-8 10 20")
            .unwrap()
            .unwrap();
        assert_eq!(parsed.x, (u32::MAX as u64) * (u32::MAX as u64));
    }

    #[test]
    fn unicode_whitespace_is_not_a_separator() {
        let config = PlotConfig::nodes();
        let parser = BenchmarkLogParser::new(&config);
        // U+3000 is an ideographic space: the time capture ends before it
        let result =
            parser.parse_line(2, "BenchmarkBasicCreationRes8-8\u{3000}10 20");
        assert!(matches!(
            result,
            Err(ParseError::InvalidNumber { field: "time", .. })
        ));
    }

    #[test]
    fn missing_file() {
        let config = PlotConfig::nodes();
        let result = parse_file("/this/benchmark/log/does/not/exist", &config);
        assert!(matches!(result, Err(ParseError::Open { .. })));
    }

    #[test]
    fn parse_file_test() {
        let path =
            std::env::temp_dir().join(".rquad_plot_parse_file_test.log");
        std::fs::write(&path, LOG).expect("writing test log should work");

        let config = PlotConfig::nodes();
        let from_file = parse_file(&path, &config).unwrap();
        let from_str = BenchmarkLogParser::new(&config).parse_str(LOG).unwrap();
        assert_eq!(from_file, from_str);

        std::fs::remove_file(&path).expect("removing test log should work");
    }

    #[test]
    fn invalid_utf8_is_tolerated() {
        let config = PlotConfig::nodes();
        let parser = BenchmarkLogParser::new(&config);
        let mut log = vec![0xff, 0xfe, b'\n'];
        log.extend_from_slice(b"BenchmarkBasicCreationRes64-8  10  20\n");
        let results = parser.parse_reader(&log[..]).unwrap();
        assert_eq!(results["Creation"].len(), 1);
    }

    fn benchmark_line(
        variant: bool,
        name: u8,
        resolution: u16,
        time: u32,
    ) -> String {
        let variant = if variant { "Basic" } else { "CNTree" };
        let (name, _) = DIMENSIONS[name as usize % DIMENSIONS.len()];
        // resolution is never 0
        let resolution = resolution as u64 + 1;
        format!(
            "Benchmark{}{}Res{}-8   100   {} ns/op",
            variant, name, resolution, time
        )
    }

    #[quickcheck]
    fn one_point_per_matching_line(
        lines: Vec<(bool, u8, u16, u32)>,
        noise: Vec<String>,
    ) -> bool {
        // interleave benchmark lines with lines that can't match
        let mut log = String::new();
        for (i, (variant, name, resolution, time)) in lines.iter().enumerate()
        {
            if let Some(noise) = noise.get(i) {
                log.push_str("# ");
                log.push_str(&noise.replace('\n', " "));
                log.push('\n');
            }
            log.push_str(&benchmark_line(*variant, *name, *resolution, *time));
            log.push('\n');
        }

        let config = PlotConfig::nodes();
        let parser = BenchmarkLogParser::new(&config);
        let results = parser.parse_str(&log).unwrap();

        // idempotence
        if results != parser.parse_str(&log).unwrap() {
            return false;
        }

        // the union of all groups is the list of expected points, and each
        // group keeps file order
        let mut expected = GroupedResults::new();
        for (variant, name, resolution, time) in lines {
            let line = benchmark_line(variant, name, resolution, time);
            let point = parser.parse_line(1, &line).unwrap().unwrap();
            let dimension = config.dimension(&point.name).unwrap();
            if point.x != dimension * dimension / point.resolution {
                return false;
            }
            expected.entry(point.name.clone()).or_default().push(point);
        }
        results == expected
    }
}
