mod dialogs;
mod help_dialog;
mod line_list;
mod plot;
mod toolbar;

pub use dialogs::{render_dialogs, render_notice};
pub use help_dialog::render_help_dialog;
pub use line_list::render_line_list;
pub use plot::render_plot;
pub use toolbar::render_toolbar;
