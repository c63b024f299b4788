/// Names per row in the generated-name grid.
pub const GRID_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelClass {
    FormLabel,
    ValidationErrorLabel,
}

impl LabelClass {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::FormLabel => "formLabel",
            Self::ValidationErrorLabel => "validationErrorLabel",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub class: LabelClass,
}

impl Label {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: LabelClass::FormLabel,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: LabelClass::ValidationErrorLabel,
        }
    }

    pub fn is_error(&self) -> bool {
        self.class == LabelClass::ValidationErrorLabel
    }
}

pub fn grid_rows(count: usize) -> usize {
    count.div_ceil(GRID_COLUMNS)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NameGrid {
    pub names: Vec<String>,
    pub rows: usize,
}

impl NameGrid {
    pub fn new(names: Vec<String>) -> Self {
        let rows = grid_rows(names.len());
        Self { names, rows }
    }

    pub fn template_columns(&self) -> String {
        format!("repeat({},minmax(100px, 1fr))", GRID_COLUMNS)
    }

    pub fn template_rows(&self) -> String {
        format!("repeat({}, minmax(30px, 50px))", self.rows)
    }
}

/// Contents of the generated-names area.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NameResults {
    #[default]
    Empty,
    Single(String),
    Grid(NameGrid),
    Message(String),
}

impl NameResults {
    /// One name is shown as plain text; several go into the grid.
    pub fn from_names(mut names: Vec<String>) -> Self {
        match names.len() {
            0 => Self::Empty,
            1 => Self::Single(names.remove(0)),
            _ => Self::Grid(NameGrid::new(names)),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Single(text) | Self::Message(text) => escape_html(text),
            Self::Grid(grid) => {
                let cells: String = grid
                    .names
                    .iter()
                    .map(|name| format!("<div>{}</div>", escape_html(name)))
                    .collect();
                format!(
                    "<div style=\"display: grid; grid-template-columns: {}; grid-template-rows: {}\">{}</div>",
                    grid.template_columns(),
                    grid.template_rows(),
                    cells
                )
            }
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
