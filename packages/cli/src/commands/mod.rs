pub mod edit;
pub mod init;
pub mod palette;
pub mod render;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use palette::{palette, PaletteArgs};
pub use render::{render, RenderArgs};
