//! General message formatting functions for prettifying the CLI.
//! Includes basic utility functions such as:
//!
//! - Highlight Text (make the text teal but not bold)
//! - System message formatting functions that produce the same
//! format messages.

use colored::Colorize;

use crate::cli::colors::DICTLITE_TEAL;

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a piece of text in the theme color to make it obvious.

    format!("{}", argument.color(DICTLITE_TEAL))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Format a status line according to the command line theme.
    //!
    //! Takes in a source name (like 'store') and the message as a
    //! formatted text; output of [`format!`].

    let source_formatted = format!("{:6}", source_name.color(DICTLITE_TEAL).bold());

    format!("[{}] {}", source_formatted, message)
}
