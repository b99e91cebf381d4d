pub mod destination_picker;
pub mod mouse;
pub mod navigation;
