pub mod output;
pub mod sink;

pub use output::{output_json, JsonDirSink, RenderOptions, TerminalSink};
pub use sink::{emit_all, view_data, ViewData, ViewSink, ViewSlot};
