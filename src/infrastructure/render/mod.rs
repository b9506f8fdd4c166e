pub mod line_renderer;

pub use line_renderer::{
    render, OutputFormat, RenderError, FIELD_SEPARATOR, LIST_SEPARATOR,
};
