use crate::printer::format::backslashify;

/// Renders a message value for display
pub trait ValueFormatter {
    fn format_value(&self, value: &[u8]) -> String;
}

/// Shows the value as an escaped, quoted string
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainValueFormatter;

impl ValueFormatter for PlainValueFormatter {
    fn format_value(&self, value: &[u8]) -> String {
        format!("\"{}\"", backslashify(value).replace('"', "\\\""))
    }
}
