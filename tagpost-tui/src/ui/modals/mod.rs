// Modal rendering, one module per overlay
mod alert;
mod composer;
mod help;
mod location;
mod picker;
mod utils;

pub use alert::render_alert_modal;
pub use composer::render_composer_modal;
pub use help::render_help_modal;
pub use location::render_location_editor_modal;
pub use picker::render_tag_picker_modal;
