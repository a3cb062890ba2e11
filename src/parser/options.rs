//! Extraction options and configuration.

/// Options for extracting a report.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Keyword-anchor search
    pub locator: LocatorConfig,

    /// Line-stream table reconstruction
    pub line_stream: LineStreamConfig,

    /// Grid table reconstruction
    pub grid: GridConfig,

    /// Convert panics inside extraction into failed results
    pub catch_panics: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set locator configuration.
    pub fn with_locator(mut self, locator: LocatorConfig) -> Self {
        self.locator = locator;
        self
    }

    /// Set line-stream configuration.
    pub fn with_line_stream(mut self, line_stream: LineStreamConfig) -> Self {
        self.line_stream = line_stream;
        self
    }

    /// Set grid configuration.
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    /// Require keywords to match as whole words.
    pub fn strict_keywords(mut self) -> Self {
        self.locator.match_mode = MatchMode::WholeWord;
        self
    }

    /// Enable or disable panic capture.
    pub fn with_catch_panics(mut self, catch: bool) -> Self {
        self.catch_panics = catch;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            locator: LocatorConfig::default(),
            line_stream: LineStreamConfig::default(),
            grid: GridConfig::default(),
            catch_panics: true,
        }
    }
}

/// How keyword occurrences are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Any substring occurrence
    #[default]
    Substring,
    /// Occurrence bounded by word boundaries
    WholeWord,
}

/// Shape of the search window around an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowShape {
    /// `window / 2` characters either side
    #[default]
    Centered,
    /// `window / 2` before, `window` after
    Trailing,
}

/// Anchor-proximity locator configuration.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Keyword matching mode
    pub match_mode: MatchMode,
    /// Window shape
    pub window_shape: WindowShape,
    /// Factor applied to the distance of anchors that follow the reference
    pub post_reference_discount: f64,
    /// Try the next-ranked anchor when the best one has no value nearby
    pub anchor_fallthrough: bool,
}

impl LocatorConfig {
    /// Set the post-reference discount.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.post_reference_discount = discount;
        self
    }

    /// Set the window shape.
    pub fn with_window_shape(mut self, shape: WindowShape) -> Self {
        self.window_shape = shape;
        self
    }

    /// Enable or disable anchor fallthrough.
    pub fn with_fallthrough(mut self, fallthrough: bool) -> Self {
        self.anchor_fallthrough = fallthrough;
        self
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Substring,
            window_shape: WindowShape::Centered,
            post_reference_discount: 0.5,
            anchor_fallthrough: true,
        }
    }
}

/// Line-stream reconstruction configuration.
///
/// An anchor is a list of parts that must all appear in one line, compared
/// with whitespace removed and case folded.
#[derive(Debug, Clone)]
pub struct LineStreamConfig {
    /// Anchors that open the distribution table
    pub start_anchors: Vec<Vec<String>>,
    /// Anchors that close it (optional)
    pub end_anchors: Vec<Vec<String>>,
}

impl LineStreamConfig {
    /// Add a start anchor.
    pub fn with_start_anchor<S: Into<String>>(mut self, parts: impl IntoIterator<Item = S>) -> Self {
        self.start_anchors.push(parts.into_iter().map(Into::into).collect());
        self
    }

    /// Add an end anchor.
    pub fn with_end_anchor<S: Into<String>>(mut self, parts: impl IntoIterator<Item = S>) -> Self {
        self.end_anchors.push(parts.into_iter().map(Into::into).collect());
        self
    }

    /// Remove all end anchors (scan to end of text).
    pub fn without_end_anchors(mut self) -> Self {
        self.end_anchors.clear();
        self
    }
}

impl Default for LineStreamConfig {
    fn default() -> Self {
        Self {
            start_anchors: vec![
                vec!["NLDFT".to_string(), "详细数据".to_string()],
                vec!["孔直径范围".to_string()],
            ],
            end_anchors: vec![vec!["BJH".to_string(), "详细数据".to_string()]],
        }
    }
}

/// Grid-table reconstruction configuration.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Tokens in a table's opening rows that mark it as a distribution table
    pub table_markers: Vec<String>,
    /// Rows inspected for the markers
    pub marker_rows: usize,
    /// Header keywords of the average-diameter column
    pub average_keywords: Vec<String>,
    /// Header keywords of the integral-volume column
    pub integral_keywords: Vec<String>,
    /// Exact number of decimals an average-diameter cell must carry
    pub average_decimal_places: usize,
    /// Decimals the integral volume is rounded to
    pub integral_decimal_places: i32,
    /// Allowed backwards step between consecutive diameters
    pub monotonic_tolerance: f64,
}

impl GridConfig {
    /// Set the required average-diameter precision.
    pub fn with_average_decimal_places(mut self, places: usize) -> Self {
        self.average_decimal_places = places;
        self
    }

    /// Set the monotonicity tolerance.
    pub fn with_monotonic_tolerance(mut self, tolerance: f64) -> Self {
        self.monotonic_tolerance = tolerance;
        self
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            table_markers: owned(&["nldft", "p/p0"]),
            marker_rows: 3,
            average_keywords: owned(&[
                "平均孔直径",
                "平均孔径",
                "average pore diameter",
                "average pore width",
                "avg pore diameter",
            ]),
            integral_keywords: owned(&["孔积分体积", "pore integral volume", "integral pore volume"]),
            average_decimal_places: 4,
            integral_decimal_places: 6,
            monotonic_tolerance: 1e-8,
        }
    }
}
