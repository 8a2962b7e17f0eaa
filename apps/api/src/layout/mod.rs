// Text measurement for the PDF renderer: base-14 font metrics, WinAnsi
// encoding, and greedy line breaking with justification.

pub mod encoding;
pub mod font_metrics;
pub mod wrap;

pub use encoding::encode_win_ansi;
pub use font_metrics::{get_metrics, Font};
pub use wrap::{wrap_text, WrappedLine};
