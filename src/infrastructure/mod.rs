pub mod page_surface;
pub mod surface;

pub use page_surface::PageSurface;
pub use surface::{Locator, RenderSurface};
