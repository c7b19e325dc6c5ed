//! Domain entities - the core business objects.

mod image;
mod post;

pub use image::{IMAGE_FIELD, ImageUpload, UPLOADS_ROUTE};
pub use post::{Post, PostFields};
