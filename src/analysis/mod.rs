/// Background luminance sampling and light/dark text selection.
pub mod luminance;
